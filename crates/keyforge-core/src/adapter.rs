//! Single-primitive view of a key manager.
//!
//! Callers usually know which primitive interface they want (`dyn Aead`,
//! `dyn Mac`, ...) but not which key type will serve it. [`make_key_manager`]
//! binds a borrowed [`InternalKeyManager`] to one interface `P` and hides the
//! manager's concrete type behind [`KeyManager<P>`].
//!
//! Binding never fails. Whether the manager actually declared a factory for
//! `P` is resolved on every [`KeyManager::get_primitive`] call, which is the
//! single place that failure is reported.
//!
//! # Pipeline
//!
//! ```text
//! KeyData ─decode─► Key ─validate_key─► PrimitiveFactory<Key, P> ─create─► Box<P>
//! ```
//!
//! The factory for `P` is resolved before the key is looked at, so asking for
//! an unsupported interface fails `InvalidArgument` whatever the key. Key
//! material reaches a factory only after `validate_key` accepted it. The
//! adapter does not compare `KeyData::type_url` against the manager's key
//! type; routing by type URL is the caller's job (see
//! [`KeyManager::does_support`]).

use std::{any::type_name, marker::PhantomData};

use keyforge_proto::{Decode, KeyData, Message};

use crate::{
    error::KeyError,
    key_factory::{KeyFactory, ManagerKeyFactory},
    manager::InternalKeyManager,
    primitive::PrimitiveFactory,
};

/// Key manager for primitive interface `P`, with the key type erased.
pub trait KeyManager<P: ?Sized> {
    /// Build a `P` from serialized key material.
    fn get_primitive(&self, key_data: &KeyData) -> Result<Box<P>, KeyError>;

    /// Build a `P` from key material of the manager's key type.
    fn get_primitive_from_key(&self, key: &dyn Message) -> Result<Box<P>, KeyError>;

    /// Factory for generating new keys of this type.
    fn key_factory(&self) -> &dyn KeyFactory;

    /// Key type identifier of the underlying manager.
    fn key_type(&self) -> &str;

    /// Version ceiling of the underlying manager.
    fn version(&self) -> u32;

    /// Whether `type_url` names this manager's key type (exact match).
    fn does_support(&self, type_url: &str) -> bool;
}

/// Binds a borrowed manager to primitive interface `P`.
pub struct KeyManagerAdapter<'a, P: ?Sized, M> {
    manager: &'a M,
    factory: ManagerKeyFactory<'a, M>,
    _primitive: PhantomData<fn() -> Box<P>>,
}

impl<'a, P, M> KeyManagerAdapter<'a, P, M>
where
    P: ?Sized + 'static,
    M: InternalKeyManager,
{
    /// Adapter over `manager` for interface `P`. Never fails, even if the
    /// manager has no factory for `P`.
    pub fn new(manager: &'a M) -> Self {
        Self { manager, factory: ManagerKeyFactory::new(manager), _primitive: PhantomData }
    }

    /// Build a `P` from key material, keeping the concrete key type.
    pub fn primitive_for(&self, key: &M::Key) -> Result<Box<P>, KeyError> {
        let factory = self.factory_for_primitive()?;

        tracing::trace!(key_type = self.manager.key_type(), "validating key");
        self.manager.validate_key(key)?;

        let primitive = factory.create(key)?;
        tracing::debug!(
            key_type = self.manager.key_type(),
            primitive = type_name::<P>(),
            "built primitive"
        );
        Ok(primitive)
    }

    fn factory_for_primitive(&self) -> Result<&'a PrimitiveFactory<M::Key, P>, KeyError> {
        self.manager.primitive_factory::<P>().ok_or_else(|| {
            tracing::debug!(
                key_type = self.manager.key_type(),
                primitive = type_name::<P>(),
                "no factory for requested primitive"
            );
            KeyError::InvalidArgument(format!(
                "No PrimitiveFactory was registered for type {} in key manager {}",
                type_name::<P>(),
                self.manager.key_type()
            ))
        })
    }
}

impl<P, M> KeyManager<P> for KeyManagerAdapter<'_, P, M>
where
    P: ?Sized + 'static,
    M: InternalKeyManager,
{
    fn get_primitive(&self, key_data: &KeyData) -> Result<Box<P>, KeyError> {
        self.factory_for_primitive()?;

        let key = <M::Key as Decode>::decode(&key_data.value)?;
        self.primitive_for(&key)
    }

    fn get_primitive_from_key(&self, key: &dyn Message) -> Result<Box<P>, KeyError> {
        self.factory_for_primitive()?;

        let Some(typed) = key.as_any().downcast_ref::<M::Key>() else {
            return Err(KeyError::InvalidArgument(format!(
                "expected key material {}, got {}",
                type_name::<M::Key>(),
                key.type_name()
            )));
        };

        self.primitive_for(typed)
    }

    fn key_factory(&self) -> &dyn KeyFactory {
        &self.factory
    }

    fn key_type(&self) -> &str {
        self.manager.key_type()
    }

    fn version(&self) -> u32 {
        self.manager.version()
    }

    fn does_support(&self, type_url: &str) -> bool {
        type_url == self.manager.key_type()
    }
}

/// Bind `manager` to primitive interface `P`.
///
/// The returned adapter borrows the manager and cannot outlive it.
pub fn make_key_manager<'a, P, M>(manager: &'a M) -> Box<dyn KeyManager<P> + 'a>
where
    P: ?Sized + 'static,
    M: InternalKeyManager,
{
    Box::new(KeyManagerAdapter::<P, M>::new(manager))
}
