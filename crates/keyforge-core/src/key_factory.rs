//! Generating and packaging new key material.
//!
//! Key generation always runs in the same order:
//!
//! ```text
//! format bytes ─decode─► KeyFormat ─validate_key_format─► create_key ─validate_key─► Key ─encode─► KeyData
//! ```
//!
//! Format validation strictly precedes key creation on every path; if it
//! fails, `create_key` is never called and the validation error is returned
//! unchanged. Managers without a key format fail every entry point with
//! `Unimplemented` before looking at the input.

use std::any::type_name;

use keyforge_proto::{Decode, KeyData, Message};

use crate::{
    error::KeyError,
    manager::{InternalKeyManager, KeyGenerator},
};

/// Type-erased key generation for one key type.
///
/// Implemented for every [`KeyGenerator`]; managers expose it through
/// [`InternalKeyManager::key_generator`].
pub trait FormatHandler<K>: Send + Sync {
    /// Generate a key from a format message of the manager's format type.
    fn generate(&self, format: &dyn Message) -> Result<K, KeyError>;

    /// Decode a serialized format, then generate a key from it.
    fn generate_from_bytes(&self, serialized_format: &[u8]) -> Result<K, KeyError>;
}

impl<T: KeyGenerator> FormatHandler<T::Key> for T {
    fn generate(&self, format: &dyn Message) -> Result<T::Key, KeyError> {
        let Some(format) = format.as_any().downcast_ref::<T::KeyFormat>() else {
            return Err(KeyError::InvalidArgument(format!(
                "expected key format {}, got {}",
                type_name::<T::KeyFormat>(),
                format.type_name()
            )));
        };

        generate_validated(self, format)
    }

    fn generate_from_bytes(&self, serialized_format: &[u8]) -> Result<T::Key, KeyError> {
        let format = <T::KeyFormat as Decode>::decode(serialized_format)?;
        generate_validated(self, &format)
    }
}

fn generate_validated<T: KeyGenerator>(
    manager: &T,
    format: &T::KeyFormat,
) -> Result<T::Key, KeyError> {
    tracing::trace!(key_type = manager.key_type(), "validating key format");
    manager.validate_key_format(format)?;

    let key = manager.create_key(format)?;
    manager.validate_key(&key)?;

    tracing::debug!(key_type = manager.key_type(), version = manager.version(), "generated key");
    Ok(key)
}

/// Operations for generating new key material, with the key type erased.
pub trait KeyFactory {
    /// Generate key material from a format message.
    fn new_key(&self, format: &dyn Message) -> Result<Box<dyn Message>, KeyError>;

    /// Generate key material from a serialized format.
    fn new_key_from_bytes(&self, serialized_format: &[u8]) -> Result<Box<dyn Message>, KeyError>;

    /// Generate key material from a serialized format and package it as
    /// [`KeyData`].
    fn new_key_data(&self, serialized_format: &[u8]) -> Result<KeyData, KeyError>;
}

/// [`KeyFactory`] over one borrowed manager.
pub struct ManagerKeyFactory<'a, M> {
    manager: &'a M,
}

impl<'a, M: InternalKeyManager> ManagerKeyFactory<'a, M> {
    /// Factory delegating to `manager`.
    pub fn new(manager: &'a M) -> Self {
        Self { manager }
    }

    fn handler(&self) -> Result<&'a dyn FormatHandler<M::Key>, KeyError> {
        self.manager.key_generator().ok_or_else(|| {
            KeyError::Unimplemented(format!(
                "creating new keys is not supported for {}",
                self.manager.key_type()
            ))
        })
    }

    /// Like [`KeyFactory::new_key`], keeping the concrete key type.
    pub fn new_typed_key(&self, format: &dyn Message) -> Result<M::Key, KeyError> {
        self.handler()?.generate(format)
    }

    /// Like [`KeyFactory::new_key_from_bytes`], keeping the concrete key type.
    pub fn new_typed_key_from_bytes(&self, serialized_format: &[u8]) -> Result<M::Key, KeyError> {
        self.handler()?.generate_from_bytes(serialized_format)
    }
}

impl<M: InternalKeyManager> KeyFactory for ManagerKeyFactory<'_, M> {
    fn new_key(&self, format: &dyn Message) -> Result<Box<dyn Message>, KeyError> {
        Ok(Box::new(self.new_typed_key(format)?))
    }

    fn new_key_from_bytes(&self, serialized_format: &[u8]) -> Result<Box<dyn Message>, KeyError> {
        Ok(Box::new(self.new_typed_key_from_bytes(serialized_format)?))
    }

    fn new_key_data(&self, serialized_format: &[u8]) -> Result<KeyData, KeyError> {
        let key = self.new_typed_key_from_bytes(serialized_format)?;

        Ok(KeyData::new(
            self.manager.key_type(),
            key.encode()?,
            self.manager.key_material_type(),
        ))
    }
}
