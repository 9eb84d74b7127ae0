//! Authenticated encryption with associated data
//!
//! Both ciphers prefix the ciphertext with the nonce they used, so a
//! ciphertext is self-contained: decrypting needs only the key and the same
//! associated data.

use aes_gcm::{
    Aes128Gcm, Aes256Gcm,
    aead::{Aead as _, KeyInit, Payload},
};
use chacha20poly1305::XNonce;

use crate::{error::CryptoError, random_bytes};

/// AES-GCM nonce size (12 bytes)
pub const AES_GCM_NONCE_SIZE: usize = 12;

/// XChaCha20 nonce size (24 bytes)
pub const XCHACHA_NONCE_SIZE: usize = 24;

/// Poly1305 / GHASH tag size (16 bytes)
pub const TAG_SIZE: usize = 16;

/// Authenticated encryption primitive.
///
/// # Security
///
/// - `decrypt` succeeds only for ciphertexts produced by `encrypt` under the
///   same key with identical associated data
/// - Implementations choose a fresh random nonce per `encrypt` call
pub trait Aead: Send + Sync {
    /// Encrypt `plaintext`, authenticating `associated_data` alongside it.
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Decrypt and authenticate a ciphertext produced by [`Aead::encrypt`].
    fn decrypt(&self, ciphertext: &[u8], associated_data: &[u8])
    -> Result<Vec<u8>, CryptoError>;
}

enum AesGcmCipher {
    Aes128(Aes128Gcm),
    Aes256(Aes256Gcm),
}

/// AES-GCM with 128- or 256-bit keys.
pub struct AesGcm {
    cipher: AesGcmCipher,
}

impl AesGcm {
    /// Build a cipher from a 16- or 32-byte key.
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        let invalid = |_| CryptoError::InvalidKeyLength { algorithm: "AES-GCM", actual: key.len() };

        let cipher = match key.len() {
            16 => AesGcmCipher::Aes128(Aes128Gcm::new_from_slice(key).map_err(invalid)?),
            32 => AesGcmCipher::Aes256(Aes256Gcm::new_from_slice(key).map_err(invalid)?),
            actual => return Err(CryptoError::InvalidKeyLength { algorithm: "AES-GCM", actual }),
        };

        Ok(Self { cipher })
    }

    /// Encrypt under a caller-provided nonce.
    ///
    /// Returns `nonce || ciphertext || tag`. Callers MUST NOT reuse a nonce
    /// under the same key.
    pub fn seal_with_nonce(
        &self,
        nonce: &[u8; AES_GCM_NONCE_SIZE],
        plaintext: &[u8],
        associated_data: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let payload = Payload { msg: plaintext, aad: associated_data };
        let nonce_ga = aes_gcm::Nonce::from_slice(nonce);

        let sealed = match &self.cipher {
            AesGcmCipher::Aes128(c) => c.encrypt(nonce_ga, payload),
            AesGcmCipher::Aes256(c) => c.encrypt(nonce_ga, payload),
        }
        .map_err(|_| CryptoError::EncryptionFailed("AES-GCM rejected input".to_string()))?;

        let mut out = Vec::with_capacity(AES_GCM_NONCE_SIZE + sealed.len());
        out.extend_from_slice(nonce);
        out.extend_from_slice(&sealed);
        Ok(out)
    }
}

impl Aead for AesGcm {
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut nonce = [0u8; AES_GCM_NONCE_SIZE];
        random_bytes(&mut nonce)?;
        self.seal_with_nonce(&nonce, plaintext, associated_data)
    }

    fn decrypt(
        &self,
        ciphertext: &[u8],
        associated_data: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        if ciphertext.len() < AES_GCM_NONCE_SIZE + TAG_SIZE {
            return Err(CryptoError::DecryptionFailed { reason: "ciphertext too short".to_string() });
        }

        let (nonce, sealed) = ciphertext.split_at(AES_GCM_NONCE_SIZE);
        let nonce = aes_gcm::Nonce::from_slice(nonce);
        let payload = Payload { msg: sealed, aad: associated_data };

        match &self.cipher {
            AesGcmCipher::Aes128(c) => c.decrypt(nonce, payload),
            AesGcmCipher::Aes256(c) => c.decrypt(nonce, payload),
        }
        .map_err(|_| CryptoError::DecryptionFailed { reason: "authentication failed".to_string() })
    }
}

/// XChaCha20-Poly1305 with a 256-bit key.
pub struct XChaCha20Poly1305 {
    cipher: chacha20poly1305::XChaCha20Poly1305,
}

impl XChaCha20Poly1305 {
    /// Key size in bytes.
    pub const KEY_SIZE: usize = 32;

    /// Build a cipher from a 32-byte key.
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        let cipher = chacha20poly1305::XChaCha20Poly1305::new_from_slice(key).map_err(|_| {
            CryptoError::InvalidKeyLength { algorithm: "XChaCha20-Poly1305", actual: key.len() }
        })?;

        Ok(Self { cipher })
    }

    /// Encrypt under a caller-provided nonce.
    ///
    /// Returns `nonce || ciphertext || tag`.
    pub fn seal_with_nonce(
        &self,
        nonce: &[u8; XCHACHA_NONCE_SIZE],
        plaintext: &[u8],
        associated_data: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let sealed = self
            .cipher
            .encrypt(XNonce::from_slice(nonce), Payload { msg: plaintext, aad: associated_data })
            .map_err(|_| {
                CryptoError::EncryptionFailed("XChaCha20-Poly1305 rejected input".to_string())
            })?;

        let mut out = Vec::with_capacity(XCHACHA_NONCE_SIZE + sealed.len());
        out.extend_from_slice(nonce);
        out.extend_from_slice(&sealed);
        Ok(out)
    }
}

impl Aead for XChaCha20Poly1305 {
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut nonce = [0u8; XCHACHA_NONCE_SIZE];
        random_bytes(&mut nonce)?;
        self.seal_with_nonce(&nonce, plaintext, associated_data)
    }

    fn decrypt(
        &self,
        ciphertext: &[u8],
        associated_data: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        if ciphertext.len() < XCHACHA_NONCE_SIZE + TAG_SIZE {
            return Err(CryptoError::DecryptionFailed { reason: "ciphertext too short".to_string() });
        }

        let (nonce, sealed) = ciphertext.split_at(XCHACHA_NONCE_SIZE);

        self.cipher
            .decrypt(XNonce::from_slice(nonce), Payload { msg: sealed, aad: associated_data })
            .map_err(|_| CryptoError::DecryptionFailed {
                reason: "authentication failed".to_string(),
            })
    }
}
