//! Keyforge Cryptographic Primitives
//!
//! Primitive interfaces ([`Aead`], [`Mac`]) and the algorithm bodies behind
//! them. Key managers build these objects from validated key material; this
//! crate knows nothing about key types, versions, or envelopes.
//!
//! # Nonces
//!
//! The trait methods draw nonces from the OS RNG. Each algorithm also exposes
//! a pure `seal_with_nonce` function taking a caller-provided nonce, for
//! deterministic known-answer testing.
//!
//! # Ciphertext Layout
//!
//! ```text
//! AES-GCM:            nonce (12) || ciphertext || tag (16)
//! XChaCha20-Poly1305: nonce (24) || ciphertext || tag (16)
//! ```
//!
//! # Security
//!
//! - Key bytes and derived key schedules are zeroized when a primitive is
//!   dropped
//! - MAC verification is constant-time
//! - Failed authentication reveals nothing beyond "failed"

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod aead;
pub mod error;
pub mod mac;

pub use aead::{Aead, AesGcm, XChaCha20Poly1305};
pub use error::CryptoError;
pub use mac::{Hmac, HmacHash, Mac};

/// Fill `buf` from the OS cryptographic RNG.
pub(crate) fn random_bytes(buf: &mut [u8]) -> Result<(), CryptoError> {
    getrandom::fill(buf).map_err(|e| CryptoError::Randomness(e.to_string()))
}
