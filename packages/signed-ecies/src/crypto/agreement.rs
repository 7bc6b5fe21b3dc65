//! # Key Agreement
//!
//! P-256 Diffie-Hellman between a per-message ephemeral key and the
//! receiver's long-term key.
//!
//! ```text
//! Sender:    ephemeral_private × receiver_public  → Z
//! Receiver:  receiver_private  × ephemeral_public → Z   (same Z)
//! ```
//!
//! The ephemeral public key travels in the envelope as two fixed-width
//! affine coordinates, X and Y, each [`COORDINATE_SIZE`] bytes.

use p256::ecdh::EphemeralSecret;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand_core::{CryptoRng, RngCore};

use super::keys::{PrivateKey, PublicKey};
use crate::error::{Error, Result};

/// Byte width of one affine coordinate (curve order byte length)
pub const COORDINATE_SIZE: usize = 32;

/// Byte width of the ECDH output
pub const SHARED_SECRET_SIZE: usize = 32;

/// SEC1 tag for an uncompressed point
const UNCOMPRESSED_TAG: u8 = 0x04;

/// The raw ECDH output (the x-coordinate of the shared point)
///
/// Zeroized when dropped. Only ever fed to the key derivation step.
pub struct SharedSecret {
    inner: p256::ecdh::SharedSecret,
}

impl SharedSecret {
    /// Get the raw bytes (for key derivation)
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.inner.raw_secret_bytes().as_slice()
    }
}

/// Fixed-width affine coordinates of a public point
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Coordinates {
    /// X coordinate, big-endian, zero-padded
    pub x: [u8; COORDINATE_SIZE],
    /// Y coordinate, big-endian, zero-padded
    pub y: [u8; COORDINATE_SIZE],
}

impl Coordinates {
    /// Extract the coordinates of a public key
    pub fn of(public: &PublicKey) -> Self {
        let point = public.as_inner().to_encoded_point(false);

        let mut x = [0u8; COORDINATE_SIZE];
        let mut y = [0u8; COORDINATE_SIZE];
        // An uncompressed encoding of a valid public key always has both coordinates
        if let (Some(px), Some(py)) = (point.x(), point.y()) {
            x.copy_from_slice(px);
            y.copy_from_slice(py);
        }

        Self { x, y }
    }

    /// Rebuild the public key, checking that the point lies on the curve
    pub fn to_public_key(&self) -> Result<PublicKey> {
        let mut sec1 = [0u8; 1 + 2 * COORDINATE_SIZE];
        sec1[0] = UNCOMPRESSED_TAG;
        sec1[1..1 + COORDINATE_SIZE].copy_from_slice(&self.x);
        sec1[1 + COORDINATE_SIZE..].copy_from_slice(&self.y);

        p256::PublicKey::from_sec1_bytes(&sec1)
            .map(PublicKey::from)
            .map_err(|_| Error::KeyAgreement("Ephemeral public key is not a point on P-256".into()))
    }
}

/// A per-message key pair
///
/// The secret half can be used for exactly one agreement and is consumed
/// by it.
pub struct EphemeralKeyPair {
    secret: EphemeralSecret,
    public: PublicKey,
}

impl EphemeralKeyPair {
    /// Generate a fresh ephemeral key pair
    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        let secret = EphemeralSecret::random(rng);
        let public = PublicKey::from(secret.public_key());
        Self { secret, public }
    }

    /// Public half, embedded in the envelope
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Perform the sender-side agreement, consuming the ephemeral secret
    pub fn agree(self, their_public: &PublicKey) -> SharedSecret {
        SharedSecret {
            inner: self.secret.diffie_hellman(their_public.as_inner()),
        }
    }
}

/// Perform the receiver-side agreement with a long-term private key
pub fn agree(our_private: &PrivateKey, their_public: &PublicKey) -> SharedSecret {
    let inner = p256::ecdh::diffie_hellman(
        our_private.as_secret().to_nonzero_scalar(),
        their_public.as_inner().as_affine(),
    );
    SharedSecret { inner }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn test_agreement_is_symmetric() {
        let receiver = PrivateKey::generate(&mut OsRng);
        let ephemeral = EphemeralKeyPair::generate(&mut OsRng);
        let ephemeral_public = ephemeral.public_key().clone();

        let sender_side = ephemeral.agree(&receiver.public_key());
        let receiver_side = agree(&receiver, &ephemeral_public);

        assert_eq!(sender_side.as_bytes(), receiver_side.as_bytes());
        assert_eq!(sender_side.as_bytes().len(), SHARED_SECRET_SIZE);
    }

    #[test]
    fn test_different_receivers_different_secrets() {
        let alice = PrivateKey::generate(&mut OsRng);
        let bob = PrivateKey::generate(&mut OsRng);
        let ephemeral = PrivateKey::generate(&mut OsRng);

        let with_alice = agree(&ephemeral, &alice.public_key());
        let with_bob = agree(&ephemeral, &bob.public_key());

        assert_ne!(with_alice.as_bytes(), with_bob.as_bytes());
    }

    #[test]
    fn test_coordinates_round_trip() {
        let public = PrivateKey::generate(&mut OsRng).public_key();
        let coords = Coordinates::of(&public);

        assert_eq!(coords.to_public_key().unwrap(), public);
    }

    #[test]
    fn test_off_curve_point_rejected() {
        let public = PrivateKey::generate(&mut OsRng).public_key();
        let mut coords = Coordinates::of(&public);
        coords.y[COORDINATE_SIZE - 1] ^= 0x01;

        assert!(matches!(coords.to_public_key(), Err(Error::KeyAgreement(_))));
    }

    #[test]
    fn test_zero_point_rejected() {
        let coords = Coordinates {
            x: [0u8; COORDINATE_SIZE],
            y: [0u8; COORDINATE_SIZE],
        };
        assert!(matches!(coords.to_public_key(), Err(Error::KeyAgreement(_))));
    }

    #[test]
    fn test_leading_zero_coordinate_keeps_width() {
        // Roughly one key in 256 has an X coordinate starting with 0x00
        let found = (0..10_000)
            .map(|_| EphemeralKeyPair::generate(&mut OsRng))
            .map(|pair| Coordinates::of(pair.public_key()))
            .find(|coords| coords.x[0] == 0)
            .expect("no leading-zero coordinate found");

        assert_eq!(found.x.len(), COORDINATE_SIZE);
        let rebuilt = found.to_public_key().unwrap();
        assert_eq!(Coordinates::of(&rebuilt), found);
    }
}
