//! Keyforge Core
//!
//! Adapters that turn a per-key-type [`InternalKeyManager`] into the
//! primitive-oriented [`KeyManager<P>`] and [`KeyFactory`] interfaces that
//! keyset code consumes.
//!
//! # Architecture
//!
//! ```text
//! KeyManager<dyn Aead> ──┐
//! KeyManager<dyn Mac>  ──┼─► KeyManagerAdapter ─► InternalKeyManager
//! KeyFactory           ──┘                          ├─ validate_key
//!                                                   ├─ PrimitiveSet
//!                                                   └─ KeyGenerator (optional)
//! ```
//!
//! A manager knows one key type. It declares which primitive interfaces it
//! can build in a [`PrimitiveSet`] and, if the key type has a format, how to
//! generate keys through [`KeyGenerator`]. [`make_key_manager`] binds a
//! manager to one interface and erases the key type.
//!
//! # Errors
//!
//! Every failure is a [`KeyError`] carrying one of four [`ErrorKind`]s:
//!
//! - `InvalidArgument`: malformed input or an unsupported primitive interface
//! - `OutOfRange`: key or format outside what the manager accepts
//! - `Unimplemented`: key generation on a manager without a key format
//! - `Internal`: the underlying algorithm failed
//!
//! # Security
//!
//! - Key material reaches a primitive factory only after `validate_key`
//! - Generated key bytes come from the injected [`Environment`]
//!
//! # Example
//!
//! ```
//! use keyforge_core::{AesGcmKeyManager, make_key_manager};
//! use keyforge_crypto::Aead;
//! use keyforge_proto::{AesGcmKeyFormat, Message};
//!
//! let manager = AesGcmKeyManager::new()?;
//! let aead_manager = make_key_manager::<dyn Aead, _>(&manager);
//!
//! let format = AesGcmKeyFormat::with_key_size(32).encode()?;
//! let key_data = aead_manager.key_factory().new_key_data(&format)?;
//! let aead = aead_manager.get_primitive(&key_data)?;
//!
//! let ciphertext = aead.encrypt(b"hello", b"context")?;
//! assert_eq!(aead.decrypt(&ciphertext, b"context")?, b"hello");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod adapter;
pub mod constants;
pub mod env;
pub mod error;
pub mod key_factory;
pub mod manager;
pub mod managers;
pub mod primitive;
pub mod validation;

pub use adapter::{KeyManager, KeyManagerAdapter, make_key_manager};
pub use env::{Environment, SystemEnv};
pub use error::{ErrorKind, KeyError};
pub use key_factory::{FormatHandler, KeyFactory, ManagerKeyFactory};
pub use manager::{InternalKeyManager, KeyGenerator};
pub use managers::{AesGcmKeyManager, HmacKeyManager, XChaCha20Poly1305KeyManager};
pub use primitive::{PrimitiveFactory, PrimitiveSet, PrimitiveSetBuilder};
