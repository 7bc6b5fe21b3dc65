//! # Signed ECIES
//!
//! The two public entry points, [`encrypt`] and [`decrypt`], and their
//! variants with injectable randomness and clock.
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  encrypt(message, sender_private, receiver_public)                      │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  1. Ephemeral P-256 key pair                                            │
//! │  2. ECDH: ephemeral_private × receiver_public → Z                       │
//! │  3. HKDF-SHA256(salt = eph X, ikm = Z, info = eph Y) → key              │
//! │  4. ad = now as u64 little-endian                                       │
//! │  5. AES-256-GCM(key, random nonce, message, ad) → ciphertext ‖ tag      │
//! │  6. ECDSA(sender_private, SHA-256(ciphertext ‖ ad)) → r ‖ s             │
//! │  7. X ‖ Y ‖ nonce ‖ r ‖ s ‖ ciphertext ‖ ad                             │
//! │                                                                         │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  decrypt(envelope, receiver_private, sender_public)                     │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  1. Slice the envelope              → MalformedEnvelope                 │
//! │  2. ECDH with embedded ephemeral    → KeyAgreement                      │
//! │  3. Re-derive the key               → Derivation                        │
//! │  4. Verify the sender signature     → Authentication                    │
//! │  5. Check the timestamp window      → Freshness                         │
//! │  6. Open the ciphertext             → Decryption                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first failing step aborts the call. The signature is checked before
//! any decryption is attempted.
//!
//! ## Example
//!
//! ```
//! use rand::rngs::OsRng;
//! use signed_ecies::{decrypt, encrypt, PrivateKey};
//!
//! let sender = PrivateKey::generate(&mut OsRng);
//! let receiver = PrivateKey::generate(&mut OsRng);
//!
//! let envelope = encrypt(b"hello", &sender, &receiver.public_key()).unwrap();
//! assert_eq!(envelope.len(), 169);
//!
//! let message = decrypt(&envelope, &receiver, &sender.public_key()).unwrap();
//! assert_eq!(message, b"hello");
//! ```

use rand::rngs::OsRng;
use rand_core::{CryptoRng, RngCore};

use crate::config::EnvelopeConfig;
use crate::crypto::{
    agree, derive_symmetric_key, open, seal, sign, verify, Coordinates, EphemeralKeyPair, Nonce,
    PrivateKey, PublicKey,
};
use crate::envelope::{self, EnvelopeRef};
use crate::error::Result;
use crate::freshness;
use crate::time::now_timestamp;

/// Seal `message` for `receiver_public`, signed by `sender_private`
///
/// Uses the OS random number generator and the system clock. Two calls
/// with identical inputs produce different envelopes.
pub fn encrypt(
    message: &[u8],
    sender_private: &PrivateKey,
    receiver_public: &PublicKey,
) -> Result<Vec<u8>> {
    encrypt_with(
        &mut OsRng,
        now_timestamp(),
        message,
        sender_private,
        receiver_public,
    )
}

/// Seal with a caller-supplied CSPRNG and timestamp
///
/// The output is fully determined by the RNG state, the timestamp and the
/// inputs.
pub fn encrypt_with<R: CryptoRng + RngCore>(
    rng: &mut R,
    timestamp: i64,
    message: &[u8],
    sender_private: &PrivateKey,
    receiver_public: &PublicKey,
) -> Result<Vec<u8>> {
    let ephemeral = EphemeralKeyPair::generate(rng);
    let nonce = Nonce::random(rng);

    seal_envelope(
        ephemeral,
        nonce,
        timestamp,
        message,
        sender_private,
        receiver_public,
    )
}

pub(crate) fn seal_envelope(
    ephemeral: EphemeralKeyPair,
    nonce: Nonce,
    timestamp: i64,
    message: &[u8],
    sender_private: &PrivateKey,
    receiver_public: &PublicKey,
) -> Result<Vec<u8>> {
    let coordinates = Coordinates::of(ephemeral.public_key());

    let key = {
        let shared_secret = ephemeral.agree(receiver_public);
        derive_symmetric_key(&shared_secret, &coordinates)?
    };

    let additional_data = freshness::encode_timestamp(timestamp);
    let ciphertext = seal(&key, &nonce, message, &additional_data)?;

    let signature = sign(
        sender_private,
        &envelope::signed_message(&ciphertext, &additional_data),
    );

    let sealed = envelope::encode(
        &coordinates,
        &nonce,
        &signature,
        &ciphertext,
        &additional_data,
    );

    tracing::debug!(
        "Sealed {} byte message into {} byte envelope for {}",
        message.len(),
        sealed.len(),
        receiver_public.fingerprint()
    );

    Ok(sealed)
}

/// Open an envelope sealed for `receiver_private` by `sender_public`
///
/// Uses the system clock and [`EnvelopeConfig::default`] (20 second window).
pub fn decrypt(
    envelope: &[u8],
    receiver_private: &PrivateKey,
    sender_public: &PublicKey,
) -> Result<Vec<u8>> {
    decrypt_with(
        &EnvelopeConfig::default(),
        now_timestamp(),
        envelope,
        receiver_private,
        sender_public,
    )
}

/// Open an envelope against an explicit configuration and verifier time
pub fn decrypt_with(
    config: &EnvelopeConfig,
    now: i64,
    envelope: &[u8],
    receiver_private: &PrivateKey,
    sender_public: &PublicKey,
) -> Result<Vec<u8>> {
    let result = open_envelope(config, now, envelope, receiver_private, sender_public);

    match &result {
        Ok(message) => tracing::debug!(
            "Opened {} byte envelope from {} ({} byte message)",
            envelope.len(),
            sender_public.fingerprint(),
            message.len()
        ),
        Err(e) => tracing::warn!(
            "Rejected {} byte envelope from {}: {} (code {})",
            envelope.len(),
            sender_public.fingerprint(),
            e.kind(),
            e.code()
        ),
    }

    result
}

fn open_envelope(
    config: &EnvelopeConfig,
    now: i64,
    envelope: &[u8],
    receiver_private: &PrivateKey,
    sender_public: &PublicKey,
) -> Result<Vec<u8>> {
    let parsed = EnvelopeRef::parse(envelope)?;

    let ephemeral_public = parsed.ephemeral.to_public_key()?;
    let key = {
        let shared_secret = agree(receiver_private, &ephemeral_public);
        derive_symmetric_key(&shared_secret, &parsed.ephemeral)?
    };

    verify(sender_public, &parsed.signed_message(), &parsed.signature)?;

    freshness::check(parsed.timestamp(), now, config.freshness_tolerance_secs)?;

    open(&key, &parsed.nonce, parsed.ciphertext, &parsed.additional_data)
}

// ============================================================================
// TESTS
// ============================================================================
