//! Key type identifiers and limits for the built-in key managers.

/// Type URL of AES-GCM keys.
pub const AES_GCM_TYPE_URL: &str = "type.googleapis.com/google.crypto.tink.AesGcmKey";

/// Type URL of XChaCha20-Poly1305 keys.
pub const XCHACHA20_POLY1305_TYPE_URL: &str =
    "type.googleapis.com/google.crypto.tink.XChaCha20Poly1305Key";

/// Type URL of HMAC keys.
pub const HMAC_TYPE_URL: &str = "type.googleapis.com/google.crypto.tink.HmacKey";

/// Highest AES-GCM key version understood.
pub const AES_GCM_VERSION: u32 = 0;

/// Highest XChaCha20-Poly1305 key version understood.
pub const XCHACHA20_POLY1305_VERSION: u32 = 0;

/// Highest HMAC key version understood.
pub const HMAC_VERSION: u32 = 0;

/// XChaCha20-Poly1305 key size in bytes.
pub const XCHACHA20_POLY1305_KEY_SIZE: usize = 32;

/// Shortest HMAC key accepted, in bytes.
pub const MIN_HMAC_KEY_SIZE: usize = 16;

/// Longest HMAC key accepted, in bytes.
///
/// An HMAC key of this size, wrapped in `KeyData`, stays well below
/// `keyforge_proto::MAX_MESSAGE_SIZE`.
pub const MAX_HMAC_KEY_SIZE: usize = 4096;

/// Shortest HMAC tag accepted, in bytes.
pub const MIN_HMAC_TAG_SIZE: usize = 10;
