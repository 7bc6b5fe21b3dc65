//! # Digital Signatures Module
//!
//! ECDSA over P-256 with SHA-256, used to prove which long-term key sealed
//! an envelope.
//!
//! ## What Gets Signed
//!
//! ```text
//! signature = ECDSA-Sign(sender_private, SHA-256(ciphertext ‖ additional_data))
//! ```
//!
//! The signature covers the transmitted bytes, not the plaintext, so the
//! receiver can authenticate an envelope before attempting to decrypt it.
//!
//! ## Wire Form
//!
//! `r ‖ s`, each exactly 32 bytes big-endian. Components whose natural
//! encoding is shorter are left-padded with zeros so the envelope keeps
//! fixed offsets.

use p256::ecdsa::{
    signature::{DigestSigner, DigestVerifier},
    Signature as EcdsaSignature, SigningKey, VerifyingKey,
};
use sha2::{Digest, Sha256};

use super::agreement::COORDINATE_SIZE;
use super::keys::{PrivateKey, PublicKey};
use crate::error::{Error, Result};

/// Size of an encoded signature in bytes (r ‖ s)
pub const SIGNATURE_SIZE: usize = 2 * COORDINATE_SIZE;

/// A fixed-width ECDSA signature
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature(pub [u8; SIGNATURE_SIZE]);

impl Signature {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; SIGNATURE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.0
    }

    /// The `r` component, zero-padded
    pub fn r(&self) -> &[u8] {
        &self.0[..COORDINATE_SIZE]
    }

    /// The `s` component, zero-padded
    pub fn s(&self) -> &[u8] {
        &self.0[COORDINATE_SIZE..]
    }

    /// Encode as hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Sign a message using ECDSA P-256 / SHA-256
///
/// Nonces are derived deterministically (RFC 6979), so signing the same
/// message with the same key yields the same signature.
pub fn sign(private_key: &PrivateKey, message: &[u8]) -> Signature {
    let signing_key = SigningKey::from(private_key.as_secret());
    let sig: EcdsaSignature = signing_key.sign_digest(Sha256::new_with_prefix(message));

    let mut bytes = [0u8; SIGNATURE_SIZE];
    bytes.copy_from_slice(&sig.to_bytes());
    Signature(bytes)
}

/// Verify an ECDSA P-256 / SHA-256 signature
///
/// ## Returns
///
/// `Ok(())` if valid, `Err(Authentication)` otherwise, including when `r`
/// or `s` is zero or not below the curve order.
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> Result<()> {
    let sig = EcdsaSignature::from_slice(&signature.0).map_err(|_| Error::Authentication)?;
    let verifying_key = VerifyingKey::from(public_key.as_inner());

    verifying_key
        .verify_digest(Sha256::new_with_prefix(message), &sig)
        .map_err(|_| Error::Authentication)
}

// ============================================================================
// TESTS
// ============================================================================
