//! # Cryptography Module
//!
//! The primitives the envelope is assembled from.
//!
//! ## Algorithm Choices
//!
//! | Algorithm | Purpose | Parameters |
//! |-----------|---------|------------|
//! | ECDH P-256 | Key agreement | 32-byte shared secret |
//! | HKDF-SHA256 | Key derivation | salt = ephemeral X, info = ephemeral Y |
//! | AES-256-GCM | Encryption | 12-byte nonce, 16-byte tag |
//! | ECDSA P-256 / SHA-256 | Sender authentication | 64-byte `r ‖ s` |
//!
//! ## Security Considerations
//!
//! 1. **Key Zeroization**: Secret scalars, shared secrets and derived keys are zeroized when dropped
//! 2. **Secure Random**: `rand::rngs::OsRng` unless the caller supplies a CSPRNG
//! 3. **No Key Reuse**: A fresh ephemeral key and nonce for every envelope
//! 4. **Fixed Widths**: Coordinates and signature components are always 32 bytes

mod agreement;
mod encryption;
mod kdf;
mod keys;
mod signing;

pub use agreement::{agree, Coordinates, EphemeralKeyPair, SharedSecret, COORDINATE_SIZE, SHARED_SECRET_SIZE};
pub use encryption::{open, seal, EncryptionKey, Nonce, KEY_SIZE, NONCE_SIZE, TAG_SIZE};
pub use kdf::derive_symmetric_key;
pub use keys::{PrivateKey, PublicKey};
pub use signing::{sign, verify, Signature, SIGNATURE_SIZE};
