//! # Key Derivation
//!
//! Turns the raw ECDH output into the AES-256-GCM key.
//!
//! ```text
//! HKDF-SHA256(
//!   salt = ephemeral X (32 bytes),
//!   ikm  = Z           (32 bytes),
//!   info = ephemeral Y (32 bytes),
//! ) → 32-byte symmetric key
//! ```
//!
//! Binding both coordinates into the derivation ties the key to the exact
//! ephemeral key of the message, so a repeated Z under a different
//! ephemeral key still yields an unrelated symmetric key.

use hkdf::Hkdf;
use sha2::Sha256;

use super::agreement::{Coordinates, SharedSecret};
use super::encryption::{EncryptionKey, KEY_SIZE};
use crate::error::{Error, Result};

/// Derive the symmetric key for one envelope
pub fn derive_symmetric_key(
    shared_secret: &SharedSecret,
    ephemeral: &Coordinates,
) -> Result<EncryptionKey> {
    derive_key_bytes(shared_secret.as_bytes(), &ephemeral.x, &ephemeral.y)
        .map(EncryptionKey::from_bytes)
}

fn derive_key_bytes(ikm: &[u8], salt: &[u8], info: &[u8]) -> Result<[u8; KEY_SIZE]> {
    let hkdf = Hkdf::<Sha256>::new(Some(salt), ikm);

    let mut key = [0u8; KEY_SIZE];
    hkdf.expand(info, &mut key)
        .map_err(|_| Error::Derivation("HKDF expansion failed".into()))?;

    Ok(key)
}

// ============================================================================
// TESTS
// ============================================================================
