//! Key material and key format messages for the built-in key types.
//!
//! Each key type has two messages: the key material itself (key bytes plus a
//! `version`) and the format used to request a new key. Key messages zeroize
//! their bytes on drop and never print them in `Debug` output. Key bytes are
//! encoded as CBOR byte strings.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Writes key bytes as a length only.
struct Redacted(usize);

impl fmt::Debug for Redacted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<redacted {} bytes>", self.0)
    }
}

/// AES-GCM key material.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AesGcmKey {
    /// Key format version this material was produced under
    pub version: u32,
    /// Raw AES key (16 or 32 bytes)
    #[serde(with = "serde_bytes")]
    pub key_value: Vec<u8>,
}

/// Parameters for generating an AES-GCM key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AesGcmKeyFormat {
    /// Requested key size in bytes
    pub key_size: u32,
    /// Requested key format version
    pub version: u32,
}

impl AesGcmKeyFormat {
    /// Format requesting a key of `key_size` bytes at version 0.
    pub fn with_key_size(key_size: u32) -> Self {
        Self { key_size, version: 0 }
    }
}

/// XChaCha20-Poly1305 key material.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct XChaCha20Poly1305Key {
    /// Key format version this material was produced under
    pub version: u32,
    /// Raw 32-byte key
    #[serde(with = "serde_bytes")]
    pub key_value: Vec<u8>,
}

/// Parameters for generating an XChaCha20-Poly1305 key.
///
/// The key size is fixed, so only the version can be requested.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct XChaCha20Poly1305KeyFormat {
    /// Requested key format version
    pub version: u32,
}

/// Hash function underlying an HMAC key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashType {
    /// SHA-256 (32-byte digest)
    Sha256,
    /// SHA-512 (64-byte digest)
    Sha512,
}

impl HashType {
    /// Digest size in bytes.
    pub const fn digest_size(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }
}

/// HMAC parameters shared by keys and key formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HmacParams {
    /// Hash function
    pub hash: HashType,
    /// Length of the emitted tag in bytes
    pub tag_size: u32,
}

/// HMAC key material.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HmacKey {
    /// Key format version this material was produced under
    pub version: u32,
    /// Hash function and tag size
    pub params: HmacParams,
    /// Raw HMAC key
    #[serde(with = "serde_bytes")]
    pub key_value: Vec<u8>,
}

/// Parameters for generating an HMAC key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HmacKeyFormat {
    /// Hash function and tag size
    pub params: HmacParams,
    /// Requested key size in bytes
    pub key_size: u32,
    /// Requested key format version
    pub version: u32,
}

impl fmt::Debug for AesGcmKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesGcmKey")
            .field("version", &self.version)
            .field("key_value", &Redacted(self.key_value.len()))
            .finish()
    }
}

impl fmt::Debug for XChaCha20Poly1305Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XChaCha20Poly1305Key")
            .field("version", &self.version)
            .field("key_value", &Redacted(self.key_value.len()))
            .finish()
    }
}

impl fmt::Debug for HmacKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacKey")
            .field("version", &self.version)
            .field("params", &self.params)
            .field("key_value", &Redacted(self.key_value.len()))
            .finish()
    }
}

// Zeroize key bytes when the message goes out of scope
impl Drop for AesGcmKey {
    fn drop(&mut self) {
        self.key_value.zeroize();
    }
}

impl Drop for XChaCha20Poly1305Key {
    fn drop(&mut self) {
        self.key_value.zeroize();
    }
}

impl Drop for HmacKey {
    fn drop(&mut self) {
        self.key_value.zeroize();
    }
}
