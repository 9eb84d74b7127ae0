//! The per-key-type manager contract.
//!
//! An [`InternalKeyManager`] holds everything specific to one key type: its
//! identifier, version ceiling, validation rules, and the fixed set of
//! primitive interfaces it can build. Key generation is an optional
//! capability, declared by also implementing [`KeyGenerator`] and returning
//! `Some(self)` from [`InternalKeyManager::key_generator`].
//!
//! Every primitive built from a key type, whatever interface is requested,
//! passes through the same `validate_key` gate.
//!
//! # Concurrency
//!
//! Managers are shared across threads (`Send + Sync`) and must not hold
//! mutable state that concurrent validation or key creation could race on.

use keyforge_proto::{Decode, KeyMaterialType, Message};

use crate::{
    error::KeyError,
    key_factory::FormatHandler,
    primitive::{PrimitiveFactory, PrimitiveSet},
};

/// Key-type-specific validation and primitive construction.
pub trait InternalKeyManager: Send + Sync {
    /// Key material message handled by this manager.
    type Key: Message + Decode;

    /// Stable identifier used verbatim for dispatch.
    fn key_type(&self) -> &str;

    /// Highest key version this manager accepts.
    fn version(&self) -> u32;

    /// Classification of the key material.
    fn key_material_type(&self) -> KeyMaterialType;

    /// Check key material before any primitive is built from it.
    ///
    /// Must at least reject versions above [`Self::version`]. Failures are
    /// `OutOfRange`.
    fn validate_key(&self, key: &Self::Key) -> Result<(), KeyError>;

    /// Primitive factories declared at construction.
    fn primitives(&self) -> &PrimitiveSet<Self::Key>;

    /// Key generation capability, or `None` if this key type has no format.
    fn key_generator(&self) -> Option<&dyn FormatHandler<Self::Key>> {
        None
    }

    /// Whether new keys can be generated.
    fn has_key_generation(&self) -> bool {
        self.key_generator().is_some()
    }

    /// Factory for primitive interface `P`.
    ///
    /// Absence is not an error here; adapters turn it into one.
    fn primitive_factory<P: ?Sized + 'static>(&self) -> Option<&PrimitiveFactory<Self::Key, P>>
    where
        Self: Sized,
    {
        self.primitives().get::<P>()
    }
}

/// Key generation for managers that have a key format.
pub trait KeyGenerator: InternalKeyManager {
    /// Key format message describing a key to generate.
    type KeyFormat: Message + Decode;

    /// Check requested parameters. Failures are `OutOfRange`.
    fn validate_key_format(&self, format: &Self::KeyFormat) -> Result<(), KeyError>;

    /// Produce fresh key material satisfying `format`.
    ///
    /// Only called after `validate_key_format` succeeded. Must draw key bytes
    /// from a cryptographically secure source.
    fn create_key(&self, format: &Self::KeyFormat) -> Result<Self::Key, KeyError>;
}
