//! The `KeyData` transport envelope.
//!
//! `KeyData` is what keyset storage persists for every key: the type URL that
//! selects a key manager, the serialized key material, and a coarse
//! classification of that material.

use serde::{Deserialize, Serialize};

/// Classification of the key material carried in a [`KeyData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyMaterialType {
    /// Secret key for a symmetric primitive
    Symmetric,
    /// Private half of an asymmetric key pair
    AsymmetricPrivate,
    /// Public half of an asymmetric key pair
    AsymmetricPublic,
    /// Key held by a remote service (e.g. a KMS)
    Remote,
}

impl KeyMaterialType {
    /// Whether material of this type must be kept secret.
    pub const fn is_secret(self) -> bool {
        matches!(self, Self::Symmetric | Self::AsymmetricPrivate)
    }
}

/// Transport envelope for serialized key material.
///
/// # Invariants
///
/// - `type_url` is matched by exact string equality only
/// - `value` decodes to the key material message of the manager registered
///   under `type_url`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyData {
    /// Stable identifier of the key's structural type, e.g.
    /// `type.googleapis.com/google.crypto.tink.AesGcmKey`
    pub type_url: String,

    /// Serialized key material
    #[serde(with = "serde_bytes")]
    pub value: Vec<u8>,

    /// Classification of the key material
    pub key_material_type: KeyMaterialType,
}

impl KeyData {
    /// Build an envelope from its parts.
    pub fn new(
        type_url: impl Into<String>,
        value: Vec<u8>,
        key_material_type: KeyMaterialType,
    ) -> Self {
        Self { type_url: type_url.into(), value, key_material_type }
    }
}

impl std::fmt::Debug for KeyData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = if self.key_material_type.is_secret() { "<redacted>" } else { "<public>" };
        f.debug_struct("KeyData")
            .field("type_url", &self.type_url)
            .field("value", &format_args!("{value} ({} bytes)", self.value.len()))
            .field("key_material_type", &self.key_material_type)
            .finish()
    }
}
