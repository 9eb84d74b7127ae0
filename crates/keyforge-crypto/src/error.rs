//! Error types for primitive construction and use

use thiserror::Error;

/// Errors from building or using a primitive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Key has a length the algorithm does not accept
    #[error("invalid key length for {algorithm}: {actual} bytes")]
    InvalidKeyLength {
        /// Algorithm that rejected the key
        algorithm: &'static str,
        /// Length that was provided
        actual: usize,
    },

    /// Algorithm parameter out of range (e.g. tag size)
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Encryption failed
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    /// Ciphertext too short, tampered, or encrypted under another key
    #[error("decryption failed: {reason}")]
    DecryptionFailed {
        /// Reason for failure
        reason: String,
    },

    /// MAC tag does not match
    #[error("MAC verification failed")]
    VerificationFailed,

    /// OS RNG unavailable
    #[error("randomness unavailable: {0}")]
    Randomness(String),
}
