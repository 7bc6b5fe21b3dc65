//! # Freshness Check
//!
//! Every envelope carries the sealing time as its associated data: 8 bytes,
//! little-endian Unix seconds. On open, the embedded time must lie within
//! `tolerance` seconds of the verifier's clock, in either direction.
//!
//! This bounds the replay window but is not exactly-once delivery: an
//! envelope replayed inside the window is accepted again.

use crate::error::{Error, Result};

/// Size of the encoded timestamp in bytes
pub const TIMESTAMP_SIZE: usize = 8;

/// Encode a Unix timestamp as envelope associated data
pub fn encode_timestamp(unix_secs: i64) -> [u8; TIMESTAMP_SIZE] {
    (unix_secs as u64).to_le_bytes()
}

/// Decode envelope associated data back into a Unix timestamp
pub fn decode_timestamp(bytes: &[u8; TIMESTAMP_SIZE]) -> i64 {
    u64::from_le_bytes(*bytes) as i64
}

/// Reject timestamps more than `tolerance` seconds away from `now`
///
/// A difference exactly equal to the tolerance is accepted.
pub fn check(timestamp: i64, now: i64, tolerance: u64) -> Result<()> {
    let delta = (i128::from(now) - i128::from(timestamp)).unsigned_abs();

    if delta > u128::from(tolerance) {
        return Err(Error::Freshness {
            timestamp,
            now,
            tolerance,
        });
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn test_timestamp_encoding_is_little_endian() {
        let bytes = encode_timestamp(0x0102_0304);
        assert_eq!(bytes, [0x04, 0x03, 0x02, 0x01, 0, 0, 0, 0]);
        assert_eq!(decode_timestamp(&bytes), 0x0102_0304);
    }

    #[test]
    fn test_within_window() {
        assert!(check(NOW, NOW, 20).is_ok());
        assert!(check(NOW - 5, NOW, 20).is_ok());
        assert!(check(NOW + 5, NOW, 20).is_ok());
    }

    #[test]
    fn test_boundary_is_inclusive() {
        assert!(check(NOW - 20, NOW, 20).is_ok());
        assert!(check(NOW + 20, NOW, 20).is_ok());
    }

    #[test]
    fn test_outside_window() {
        assert_eq!(
            check(NOW - 21, NOW, 20),
            Err(Error::Freshness {
                timestamp: NOW - 21,
                now: NOW,
                tolerance: 20
            })
        );
        assert!(check(NOW + 21, NOW, 20).is_err());
    }

    #[test]
    fn test_extreme_values_do_not_overflow() {
        assert!(check(i64::MIN, i64::MAX, u64::MAX).is_ok());
        assert!(check(i64::MIN, NOW, 20).is_err());
        assert!(check(decode_timestamp(&[0xff; TIMESTAMP_SIZE]), NOW, 20).is_err());
    }
}
