//! Wall-clock helpers.
//!
//! Envelopes carry whole Unix seconds, so that is the only resolution
//! exposed here.

/// Returns the current Unix timestamp in seconds.
pub fn now_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}
