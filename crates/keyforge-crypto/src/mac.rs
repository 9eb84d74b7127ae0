//! Message authentication codes

use hmac::Mac as _;
use sha2::{Sha256, Sha512};
use zeroize::Zeroize;

use crate::error::CryptoError;

type HmacSha256 = hmac::Hmac<Sha256>;
type HmacSha512 = hmac::Hmac<Sha512>;

/// Shortest HMAC key accepted (16 bytes)
pub const MIN_HMAC_KEY_SIZE: usize = 16;

/// Shortest tag accepted (10 bytes)
pub const MIN_TAG_SIZE: usize = 10;

/// Message authentication primitive.
pub trait Mac: Send + Sync {
    /// Compute a tag over `data`.
    fn compute_mac(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Check `tag` against `data` in constant time.
    fn verify_mac(&self, tag: &[u8], data: &[u8]) -> Result<(), CryptoError>;
}

/// Hash function for [`Hmac`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HmacHash {
    /// HMAC-SHA256
    Sha256,
    /// HMAC-SHA512
    Sha512,
}

impl HmacHash {
    /// Full (untruncated) tag size in bytes.
    pub const fn output_size(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }
}

/// HMAC with a truncated tag.
pub struct Hmac {
    hash: HmacHash,
    key: Vec<u8>,
    tag_size: usize,
}

impl Hmac {
    /// Build an HMAC primitive.
    ///
    /// `tag_size` must lie in `MIN_TAG_SIZE..=hash.output_size()`.
    pub fn new(hash: HmacHash, key: &[u8], tag_size: usize) -> Result<Self, CryptoError> {
        if key.len() < MIN_HMAC_KEY_SIZE {
            return Err(CryptoError::InvalidKeyLength { algorithm: "HMAC", actual: key.len() });
        }

        if tag_size < MIN_TAG_SIZE || tag_size > hash.output_size() {
            return Err(CryptoError::InvalidParameter(format!(
                "tag size {tag_size} outside {MIN_TAG_SIZE}..={} for {hash:?}",
                hash.output_size()
            )));
        }

        Ok(Self { hash, key: key.to_vec(), tag_size })
    }

    /// Tag size in bytes.
    pub fn tag_size(&self) -> usize {
        self.tag_size
    }

    fn full_tag(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let invalid = |_| CryptoError::InvalidKeyLength { algorithm: "HMAC", actual: self.key.len() };

        let tag = match self.hash {
            HmacHash::Sha256 => {
                let mut mac = <HmacSha256 as hmac::Mac>::new_from_slice(&self.key).map_err(invalid)?;
                mac.update(data);
                mac.finalize().into_bytes().to_vec()
            },
            HmacHash::Sha512 => {
                let mut mac = <HmacSha512 as hmac::Mac>::new_from_slice(&self.key).map_err(invalid)?;
                mac.update(data);
                mac.finalize().into_bytes().to_vec()
            },
        };

        Ok(tag)
    }
}

impl Mac for Hmac {
    fn compute_mac(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut tag = self.full_tag(data)?;
        tag.truncate(self.tag_size);
        Ok(tag)
    }

    fn verify_mac(&self, tag: &[u8], data: &[u8]) -> Result<(), CryptoError> {
        // Length is public; reject before the constant-time comparison so a
        // short tag cannot verify against a prefix.
        if tag.len() != self.tag_size {
            return Err(CryptoError::VerificationFailed);
        }

        let ok = match self.hash {
            HmacHash::Sha256 => <HmacSha256 as hmac::Mac>::new_from_slice(&self.key)
                .map(|mut mac| {
                    mac.update(data);
                    mac.verify_truncated_left(tag).is_ok()
                }),
            HmacHash::Sha512 => <HmacSha512 as hmac::Mac>::new_from_slice(&self.key)
                .map(|mut mac| {
                    mac.update(data);
                    mac.verify_truncated_left(tag).is_ok()
                }),
        };

        match ok {
            Ok(true) => Ok(()),
            Ok(false) | Err(_) => Err(CryptoError::VerificationFailed),
        }
    }
}

impl Drop for Hmac {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}
