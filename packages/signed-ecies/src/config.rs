//! Tunable parameters for opening envelopes.
//!
//! Keys are never part of the configuration: they are passed explicitly to
//! every call. What lives here are the policy knobs a host application may
//! want to set from its own configuration file.

use serde::{Deserialize, Serialize};

/// Default accepted clock skew between sealing and opening, in seconds
pub const DEFAULT_FRESHNESS_TOLERANCE_SECS: u64 = 20;

/// Configuration for opening envelopes
///
/// ## Example
///
/// ```
/// use signed_ecies::EnvelopeConfig;
///
/// let config = EnvelopeConfig::default().with_freshness_tolerance(60);
/// assert_eq!(config.freshness_tolerance_secs, 60);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeConfig {
    /// Maximum absolute difference between the embedded timestamp and the
    /// verifier's clock. A difference equal to the tolerance is accepted.
    pub freshness_tolerance_secs: u64,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            freshness_tolerance_secs: DEFAULT_FRESHNESS_TOLERANCE_SECS,
        }
    }
}

impl EnvelopeConfig {
    /// Replace the freshness tolerance
    pub fn with_freshness_tolerance(mut self, secs: u64) -> Self {
        self.freshness_tolerance_secs = secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tolerance() {
        assert_eq!(EnvelopeConfig::default().freshness_tolerance_secs, 20);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: EnvelopeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EnvelopeConfig::default());

        let config: EnvelopeConfig =
            serde_json::from_str(r#"{"freshness_tolerance_secs": 5}"#).unwrap();
        assert_eq!(config.freshness_tolerance_secs, 5);
    }
}
