//! # Error Handling
//!
//! Every failure of the envelope pipeline maps to exactly one variant below.
//! The orchestrator never retries or degrades: the first failing step
//! aborts the call and its error kind is surfaced to the caller.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── Key Errors (100-199)                                              │
//! │  │   └── Parse               - Bad PEM / key encoding                   │
//! │  │                                                                      │
//! │  ├── Key Schedule Errors (200-299)                                     │
//! │  │   ├── KeyAgreement        - Invalid point / curve mismatch          │
//! │  │   └── Derivation          - HKDF expansion failed                   │
//! │  │                                                                      │
//! │  ├── Crypto Errors (300-399)                                           │
//! │  │   ├── Encryption          - AEAD seal failed                        │
//! │  │   ├── Decryption          - AEAD tag mismatch                       │
//! │  │   └── Authentication      - ECDSA signature rejected                │
//! │  │                                                                      │
//! │  └── Envelope Errors (400-499)                                         │
//! │      ├── MalformedEnvelope   - Too short or not decodable              │
//! │      └── Freshness           - Timestamp outside the skew window       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Messages never include key material, shared secrets or plaintext.

use thiserror::Error;

/// Result type alias for envelope operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for signed ECIES operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ========================================================================
    // Key Errors (100-199)
    // ========================================================================

    /// PEM block missing or key encoding did not parse as a P-256 key
    #[error("Failed to parse key: {0}")]
    Parse(String),

    // ========================================================================
    // Key Schedule Errors (200-299)
    // ========================================================================

    /// ECDH failed, usually because a point is not on the curve
    #[error("Key agreement failed: {0}")]
    KeyAgreement(String),

    /// HKDF could not produce the symmetric key
    #[error("Key derivation failed: {0}")]
    Derivation(String),

    // ========================================================================
    // Crypto Errors (300-399)
    // ========================================================================

    /// AEAD sealing failed
    #[error("Encryption failed: {0}")]
    Encryption(String),

    /// AEAD authentication tag mismatch
    #[error("Decryption failed: authentication tag mismatch")]
    Decryption,

    /// Sender signature over the ciphertext did not verify
    #[error("Signature verification failed")]
    Authentication,

    // ========================================================================
    // Envelope Errors (400-499)
    // ========================================================================

    /// Envelope is too short to slice or is otherwise structurally invalid
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// Embedded timestamp is outside the accepted clock-skew window
    #[error("Stale or future envelope: timestamp {timestamp}, now {now}, tolerance {tolerance}s")]
    Freshness {
        /// Unix seconds carried in the envelope
        timestamp: i64,
        /// Unix seconds at verification time
        now: i64,
        /// Accepted absolute skew in seconds
        tolerance: u64,
    },
}

impl Error {
    /// Get a stable numeric code for the error
    ///
    /// Codes are organized by category:
    /// - 100-199: Keys
    /// - 200-299: Key schedule
    /// - 300-399: Crypto
    /// - 400-499: Envelope
    pub fn code(&self) -> i32 {
        match self {
            Error::Parse(_) => 100,

            Error::KeyAgreement(_) => 200,
            Error::Derivation(_) => 201,

            Error::Encryption(_) => 300,
            Error::Decryption => 301,
            Error::Authentication => 302,

            Error::MalformedEnvelope(_) => 400,
            Error::Freshness { .. } => 401,
        }
    }

    /// Short machine-readable name of the error kind, safe to log
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Parse(_) => "parse",
            Error::KeyAgreement(_) => "key_agreement",
            Error::Derivation(_) => "derivation",
            Error::Encryption(_) => "encryption",
            Error::Decryption => "decryption",
            Error::Authentication => "authentication",
            Error::MalformedEnvelope(_) => "malformed_envelope",
            Error::Freshness { .. } => "freshness",
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
