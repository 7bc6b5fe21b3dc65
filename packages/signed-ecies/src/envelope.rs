//! # Envelope Codec
//!
//! The envelope is one flat byte string with fixed-width fields around a
//! single variable-length ciphertext.
//!
//! ## Wire Format
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────────────┐
//! │                           SIGNED ECIES ENVELOPE                           │
//! ├──────────────┬─────────┬──────────────────────────────────────────────────┤
//! │ Offset       │ Size    │ Field                                            │
//! ├──────────────┼─────────┼──────────────────────────────────────────────────┤
//! │ 0            │ 32      │ ephemeral public key X (big-endian, zero-padded) │
//! │ 32           │ 32      │ ephemeral public key Y (big-endian, zero-padded) │
//! │ 64           │ 12      │ AES-GCM nonce                                    │
//! │ 76           │ 32      │ signature r (big-endian, zero-padded)            │
//! │ 108          │ 32      │ signature s (big-endian, zero-padded)            │
//! │ 140          │ L + 16  │ ciphertext ‖ GCM tag                             │
//! │ 156 + L      │ 8       │ additional data: Unix seconds, little-endian     │
//! └──────────────┴─────────┴──────────────────────────────────────────────────┘
//! ```
//!
//! Total length for an `L`-byte message: `64 + 12 + 64 + (L + 16) + 8`.
//!
//! Transports that cannot carry raw bytes (JSON bodies, for instance) use
//! the standard base64 alphabet via [`to_base64`] / [`from_base64`].

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::crypto::{
    Coordinates, Nonce, Signature, COORDINATE_SIZE, NONCE_SIZE, SIGNATURE_SIZE, TAG_SIZE,
};
use crate::error::{Error, Result};
use crate::freshness::{decode_timestamp, TIMESTAMP_SIZE};

/// Size of the embedded ephemeral public key (X ‖ Y)
pub const EPHEMERAL_KEY_SIZE: usize = 2 * COORDINATE_SIZE;

/// Size of everything in front of the ciphertext
pub const HEADER_SIZE: usize = EPHEMERAL_KEY_SIZE + NONCE_SIZE + SIGNATURE_SIZE;

/// Bytes an envelope adds on top of the message
pub const OVERHEAD: usize = HEADER_SIZE + TAG_SIZE + TIMESTAMP_SIZE;

/// Shortest well-formed envelope (empty message)
pub const MIN_ENVELOPE_SIZE: usize = OVERHEAD;

const NONCE_OFFSET: usize = EPHEMERAL_KEY_SIZE;
const SIGNATURE_OFFSET: usize = NONCE_OFFSET + NONCE_SIZE;

/// Length of the envelope produced for a message of `message_len` bytes
pub const fn envelope_len(message_len: usize) -> usize {
    message_len + OVERHEAD
}

/// A decoded view over envelope bytes
///
/// Fixed-width fields are copied out; the ciphertext is borrowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeRef<'a> {
    /// Ephemeral public key coordinates
    pub ephemeral: Coordinates,
    /// AES-GCM nonce
    pub nonce: Nonce,
    /// Sender signature over `ciphertext ‖ additional_data`
    pub signature: Signature,
    /// Ciphertext with the GCM tag appended
    pub ciphertext: &'a [u8],
    /// Encoded sealing timestamp
    pub additional_data: [u8; TIMESTAMP_SIZE],
}

impl<'a> EnvelopeRef<'a> {
    /// Slice an envelope at its fixed offsets
    ///
    /// ## Errors
    ///
    /// `MalformedEnvelope` if the input is shorter than [`MIN_ENVELOPE_SIZE`].
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        if bytes.len() < MIN_ENVELOPE_SIZE {
            return Err(Error::MalformedEnvelope(format!(
                "{} bytes, at least {} required",
                bytes.len(),
                MIN_ENVELOPE_SIZE
            )));
        }

        let (header, rest) = bytes.split_at(HEADER_SIZE);
        let (ciphertext, trailer) = rest.split_at(rest.len() - TIMESTAMP_SIZE);

        let mut x = [0u8; COORDINATE_SIZE];
        let mut y = [0u8; COORDINATE_SIZE];
        x.copy_from_slice(&header[..COORDINATE_SIZE]);
        y.copy_from_slice(&header[COORDINATE_SIZE..EPHEMERAL_KEY_SIZE]);

        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(&header[NONCE_OFFSET..SIGNATURE_OFFSET]);

        let mut signature = [0u8; SIGNATURE_SIZE];
        signature.copy_from_slice(&header[SIGNATURE_OFFSET..HEADER_SIZE]);

        let mut additional_data = [0u8; TIMESTAMP_SIZE];
        additional_data.copy_from_slice(trailer);

        Ok(Self {
            ephemeral: Coordinates { x, y },
            nonce: Nonce::from_bytes(nonce),
            signature: Signature::from_bytes(signature),
            ciphertext,
            additional_data,
        })
    }

    /// The bytes covered by the sender signature: `ciphertext ‖ additional_data`
    pub fn signed_message(&self) -> Vec<u8> {
        signed_message(self.ciphertext, &self.additional_data)
    }

    /// The sealing time carried in the additional data
    pub fn timestamp(&self) -> i64 {
        decode_timestamp(&self.additional_data)
    }

    /// Serialize back into envelope bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        encode(
            &self.ephemeral,
            &self.nonce,
            &self.signature,
            self.ciphertext,
            &self.additional_data,
        )
    }
}

/// Concatenate envelope fields in wire order
pub fn encode(
    ephemeral: &Coordinates,
    nonce: &Nonce,
    signature: &Signature,
    ciphertext: &[u8],
    additional_data: &[u8; TIMESTAMP_SIZE],
) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_SIZE + ciphertext.len() + TIMESTAMP_SIZE);
    out.extend_from_slice(&ephemeral.x);
    out.extend_from_slice(&ephemeral.y);
    out.extend_from_slice(nonce.as_bytes());
    out.extend_from_slice(signature.as_bytes());
    out.extend_from_slice(ciphertext);
    out.extend_from_slice(additional_data);
    out
}

/// Build the byte string the sender signs
pub(crate) fn signed_message(ciphertext: &[u8], additional_data: &[u8; TIMESTAMP_SIZE]) -> Vec<u8> {
    let mut message = Vec::with_capacity(ciphertext.len() + TIMESTAMP_SIZE);
    message.extend_from_slice(ciphertext);
    message.extend_from_slice(additional_data);
    message
}

/// Encode envelope bytes as standard base64
pub fn to_base64(envelope: &[u8]) -> String {
    STANDARD.encode(envelope)
}

/// Decode a standard base64 envelope
pub fn from_base64(encoded: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(encoded.trim())
        .map_err(|e| Error::MalformedEnvelope(format!("invalid base64: {}", e)))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> (Coordinates, Nonce, Signature, Vec<u8>, [u8; TIMESTAMP_SIZE]) {
        // Leading zero bytes everywhere to catch any width trimming
        let mut x = [0x11u8; COORDINATE_SIZE];
        x[0] = 0;
        let mut y = [0x22u8; COORDINATE_SIZE];
        y[..2].copy_from_slice(&[0, 0]);
        let mut sig = [0x33u8; SIGNATURE_SIZE];
        sig[0] = 0;
        sig[COORDINATE_SIZE] = 0;

        (
            Coordinates { x, y },
            Nonce::from_bytes([0x44u8; NONCE_SIZE]),
            Signature::from_bytes(sig),
            vec![0x55u8; 5 + TAG_SIZE],
            1_700_000_000u64.to_le_bytes(),
        )
    }

    #[test]
    fn test_constants() {
        assert_eq!(HEADER_SIZE, 140);
        assert_eq!(MIN_ENVELOPE_SIZE, 164);
        assert_eq!(envelope_len(5), 169);
    }

    #[test]
    fn test_field_offsets() {
        let (ephemeral, nonce, signature, ciphertext, ad) = sample_fields();
        let bytes = encode(&ephemeral, &nonce, &signature, &ciphertext, &ad);

        assert_eq!(bytes.len(), envelope_len(5));
        assert_eq!(&bytes[0..32], &ephemeral.x);
        assert_eq!(&bytes[32..64], &ephemeral.y);
        assert_eq!(&bytes[64..76], nonce.as_bytes());
        assert_eq!(&bytes[76..108], signature.r());
        assert_eq!(&bytes[108..140], signature.s());
        assert_eq!(&bytes[140..161], ciphertext.as_slice());
        assert_eq!(&bytes[161..169], &ad);
    }

    #[test]
    fn test_parse_recovers_fields() {
        let (ephemeral, nonce, signature, ciphertext, ad) = sample_fields();
        let bytes = encode(&ephemeral, &nonce, &signature, &ciphertext, &ad);

        let parsed = EnvelopeRef::parse(&bytes).unwrap();
        assert_eq!(parsed.ephemeral, ephemeral);
        assert_eq!(parsed.nonce, nonce);
        assert_eq!(parsed.signature, signature);
        assert_eq!(parsed.ciphertext, ciphertext.as_slice());
        assert_eq!(parsed.timestamp(), 1_700_000_000);
        assert_eq!(parsed.to_bytes(), bytes);
    }

    #[test]
    fn test_signed_message_layout() {
        let (ephemeral, nonce, signature, ciphertext, ad) = sample_fields();
        let bytes = encode(&ephemeral, &nonce, &signature, &ciphertext, &ad);

        let parsed = EnvelopeRef::parse(&bytes).unwrap();
        assert_eq!(parsed.signed_message(), bytes[HEADER_SIZE..].to_vec());
    }

    #[test]
    fn test_truncated_envelope() {
        let (ephemeral, nonce, signature, ciphertext, ad) = sample_fields();
        let bytes = encode(&ephemeral, &nonce, &signature, &ciphertext, &ad);

        let result = EnvelopeRef::parse(&bytes[..100]);
        assert!(matches!(result, Err(Error::MalformedEnvelope(_))));

        for len in [0, 1, HEADER_SIZE, MIN_ENVELOPE_SIZE - 1] {
            assert!(EnvelopeRef::parse(&bytes[..len]).is_err(), "length {}", len);
        }
    }

    #[test]
    fn test_minimum_length_parses() {
        let bytes = vec![0u8; MIN_ENVELOPE_SIZE];
        let parsed = EnvelopeRef::parse(&bytes).unwrap();
        assert_eq!(parsed.ciphertext.len(), TAG_SIZE);
    }

    #[test]
    fn test_base64() {
        let (ephemeral, nonce, signature, ciphertext, ad) = sample_fields();
        let bytes = encode(&ephemeral, &nonce, &signature, &ciphertext, &ad);

        let text = to_base64(&bytes);
        assert_eq!(from_base64(&text).unwrap(), bytes);
        assert!(matches!(from_base64("%%%"), Err(Error::MalformedEnvelope(_))));
    }
}
