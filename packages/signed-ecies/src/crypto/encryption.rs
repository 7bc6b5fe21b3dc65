//! # Authenticated Encryption
//!
//! AES-256-GCM sealing and opening with caller-supplied associated data.
//!
//! ```text
//! seal(key, nonce, plaintext, aad) → ciphertext ‖ tag(16)
//! open(key, nonce, ciphertext ‖ tag, aad) → plaintext | Decryption error
//! ```
//!
//! `open` fails closed: a single flipped bit in the ciphertext, tag, nonce
//! or associated data rejects the whole message and no plaintext is
//! returned.

use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Key, Nonce as AesNonce,
};
use rand_core::{CryptoRng, RngCore};
use zeroize::ZeroizeOnDrop;

use crate::error::{Error, Result};

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Size of the AES-GCM authentication tag in bytes (128 bits)
pub const TAG_SIZE: usize = 16;

/// Size of the encryption key in bytes (256 bits)
pub const KEY_SIZE: usize = 32;

/// A nonce (number used once) for AES-GCM encryption
///
/// ## Critical Security Requirement
///
/// **NEVER reuse a nonce with the same key!**
///
/// Every envelope derives a fresh key from a fresh ephemeral key pair and
/// draws a fresh random nonce, so reuse would need both to repeat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Nonce(pub [u8; NONCE_SIZE]);

impl Nonce {
    /// Generate a cryptographically random nonce
    pub fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        let mut bytes = [0u8; NONCE_SIZE];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from existing bytes
    pub fn from_bytes(bytes: [u8; NONCE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }
}

/// An AES-256-GCM encryption key
///
/// Zeroized when dropped.
#[derive(ZeroizeOnDrop)]
pub struct EncryptionKey([u8; KEY_SIZE]);

impl EncryptionKey {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.0))
    }
}

/// Encrypt a message using AES-256-GCM
///
/// ## Returns
///
/// The ciphertext with the 16-byte tag appended
pub fn seal(key: &EncryptionKey, nonce: &Nonce, plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
    let payload = Payload {
        msg: plaintext,
        aad,
    };

    key.cipher()
        .encrypt(AesNonce::from_slice(&nonce.0), payload)
        .map_err(|e| Error::Encryption(format!("AES-GCM seal failed: {}", e)))
}

/// Decrypt a message using AES-256-GCM
///
/// ## Errors
///
/// Returns `Decryption` if:
/// - The ciphertext or tag was tampered with
/// - The AAD doesn't match
/// - The key is wrong
/// - The nonce is wrong
pub fn open(
    key: &EncryptionKey,
    nonce: &Nonce,
    ciphertext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>> {
    let payload = Payload {
        msg: ciphertext,
        aad,
    };

    key.cipher()
        .decrypt(AesNonce::from_slice(&nonce.0), payload)
        .map_err(|_| Error::Decryption)
}

// ============================================================================
// TESTS
// ============================================================================
