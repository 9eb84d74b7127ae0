//! Primitive factories and the per-manager primitive set.
//!
//! A key type can serve several primitive interfaces from the same key bytes.
//! Each interface gets one [`PrimitiveFactory`]; a manager declares all of
//! them once, at construction, in a [`PrimitiveSet`].
//!
//! Primitive interfaces are identified by the `TypeId` of their type, usually
//! a trait object such as `dyn Aead`. The set stores factories type-erased
//! and recovers the concrete `PrimitiveFactory<K, P>` by downcasting, so a
//! lookup for an interface the manager never declared simply yields `None`.
//!
//! # Invariants
//!
//! - At most one factory per primitive interface (duplicates fail `build`)
//! - The set is immutable after `build`; there is no registration afterwards
//! - Declaration order is preserved

use std::{
    any::{Any, TypeId},
    fmt,
    marker::PhantomData,
};

use crate::error::KeyError;

type CreateFn<K, P> = dyn Fn(&K) -> Result<Box<P>, KeyError> + Send + Sync;

/// Builds one primitive interface `P` from key material `K`.
///
/// Factories are pure: they hold no state and see only material that has
/// already passed key validation. A factory error means the algorithm itself
/// rejected the material.
pub struct PrimitiveFactory<K, P: ?Sized> {
    create: Box<CreateFn<K, P>>,
}

impl<K, P: ?Sized> PrimitiveFactory<K, P> {
    /// Wrap a creation function.
    pub fn new<F>(create: F) -> Self
    where
        F: Fn(&K) -> Result<Box<P>, KeyError> + Send + Sync + 'static,
    {
        Self { create: Box::new(create) }
    }

    /// Build the primitive from validated key material.
    pub fn create(&self, key: &K) -> Result<Box<P>, KeyError> {
        (self.create)(key)
    }
}

struct Entry {
    tag: TypeId,
    name: &'static str,
    factory: Box<dyn Any + Send + Sync>,
}

/// The fixed set of primitive factories declared by one key manager.
pub struct PrimitiveSet<K> {
    entries: Vec<Entry>,
    _key: PhantomData<fn(&K)>,
}

impl<K: 'static> PrimitiveSet<K> {
    /// Start declaring a primitive set.
    pub fn builder() -> PrimitiveSetBuilder<K> {
        PrimitiveSetBuilder { entries: Vec::new(), duplicate: None, _key: PhantomData }
    }

    /// Factory for primitive interface `P`, if one was declared.
    pub fn get<P: ?Sized + 'static>(&self) -> Option<&PrimitiveFactory<K, P>> {
        let tag = TypeId::of::<P>();
        self.entries
            .iter()
            .find(|entry| entry.tag == tag)
            .and_then(|entry| entry.factory.downcast_ref::<PrimitiveFactory<K, P>>())
    }

    /// Whether a factory for `P` was declared.
    pub fn supports<P: ?Sized + 'static>(&self) -> bool {
        self.get::<P>().is_some()
    }

    /// Names of the declared primitive interfaces, in declaration order.
    pub fn primitive_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    /// Number of declared primitive interfaces.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no primitive interface was declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K> fmt::Debug for PrimitiveSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter().map(|entry| entry.name)).finish()
    }
}

/// Collects factories for a [`PrimitiveSet`].
pub struct PrimitiveSetBuilder<K> {
    entries: Vec<Entry>,
    duplicate: Option<&'static str>,
    _key: PhantomData<fn(&K)>,
}

impl<K: 'static> PrimitiveSetBuilder<K> {
    /// Declare the factory for primitive interface `P`.
    pub fn add<P, F>(mut self, create: F) -> Self
    where
        P: ?Sized + 'static,
        F: Fn(&K) -> Result<Box<P>, KeyError> + Send + Sync + 'static,
    {
        let tag = TypeId::of::<P>();
        let name = std::any::type_name::<P>();

        if self.entries.iter().any(|entry| entry.tag == tag) {
            self.duplicate.get_or_insert(name);
            return self;
        }

        let factory: PrimitiveFactory<K, P> = PrimitiveFactory::new(create);
        self.entries.push(Entry { tag, name, factory: Box::new(factory) });
        self
    }

    /// Finish the set.
    ///
    /// # Errors
    ///
    /// - `Internal` if any primitive interface was declared twice
    pub fn build(self) -> Result<PrimitiveSet<K>, KeyError> {
        if let Some(name) = self.duplicate {
            return Err(KeyError::Internal(format!(
                "more than one PrimitiveFactory declared for {name}"
            )));
        }

        Ok(PrimitiveSet { entries: self.entries, _key: PhantomData })
    }
}
