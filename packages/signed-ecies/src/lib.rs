//! # Signed ECIES
//!
//! Authenticated public-key encryption of a single message into a single
//! self-contained envelope. Only the intended receiver can read it, the
//! receiver can check which sender sealed it, and envelopes older or newer
//! than a short clock-skew window are refused.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         SIGNED ECIES MODULES                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────────────────────────┐  │
//! │  │                            ecies                                  │  │
//! │  │        encrypt / encrypt_with        decrypt / decrypt_with       │  │
//! │  └──────┬──────────────────┬──────────────────┬──────────────┬───────┘  │
//! │         │                  │                  │              │          │
//! │  ┌──────▼──────┐    ┌──────▼──────┐    ┌──────▼──────┐ ┌─────▼──────┐   │
//! │  │   crypto    │    │  envelope   │    │  freshness  │ │   config   │   │
//! │  │             │    │             │    │             │ │            │   │
//! │  │ - Keys/PEM  │    │ - Layout    │    │ - ad codec  │ │ - Window   │   │
//! │  │ - ECDH      │    │ - Parse     │    │ - Window    │ │   size     │   │
//! │  │ - HKDF      │    │ - Base64    │    │   check     │ │            │   │
//! │  │ - AES-GCM   │    │             │    │             │ │            │   │
//! │  │ - ECDSA     │    │             │    │             │ │            │   │
//! │  └─────────────┘    └─────────────┘    └─────────────┘ └────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error type shared by every operation
//! - [`crypto`] - P-256 keys, key agreement, key derivation, AEAD, signatures
//! - [`envelope`] - Byte layout of the envelope
//! - [`freshness`] - Timestamp encoding and the skew window
//! - [`ecies`] - The encrypt / decrypt orchestration
//! - [`config`] - Tunables
//!
//! ## Security Model
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          SECURITY LAYERS                                │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Confidentiality (ephemeral ECDH + AES-256-GCM)                         │
//! │  ──────────────────────────────────────────────                         │
//! │  Every envelope uses a fresh ephemeral key and nonce. Only the          │
//! │  holder of the receiver private key can recompute the AES key.         │
//! │                                                                         │
//! │  Sender Authentication (ECDSA P-256 / SHA-256)                          │
//! │  ─────────────────────────────────────────────                          │
//! │  The sender signs ciphertext ‖ timestamp. The signature is checked      │
//! │  before anything is decrypted.                                          │
//! │                                                                         │
//! │  Freshness (timestamp as associated data)                               │
//! │  ────────────────────────────────────────                               │
//! │  The sealing time is bound by both the GCM tag and the signature.       │
//! │  Envelopes outside ±20 s (configurable) are refused. Replays inside     │
//! │  the window are not detected.                                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```
//! use rand::rngs::OsRng;
//! use signed_ecies::{decrypt, encrypt, PrivateKey};
//!
//! let sender = PrivateKey::generate(&mut OsRng);
//! let receiver = PrivateKey::generate(&mut OsRng);
//!
//! let envelope = encrypt(b"hello", &sender, &receiver.public_key())?;
//! let message = decrypt(&envelope, &receiver, &sender.public_key())?;
//! assert_eq!(message, b"hello");
//! # Ok::<(), signed_ecies::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod config;
pub mod crypto;
pub mod ecies;
pub mod envelope;
pub mod error;
pub mod freshness;
pub mod time;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use config::EnvelopeConfig;
pub use crypto::{PrivateKey, PublicKey};
pub use ecies::{decrypt, decrypt_with, encrypt, encrypt_with};
pub use error::{Error, Result};

/// Returns the version of this crate
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
