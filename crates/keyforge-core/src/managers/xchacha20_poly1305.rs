//! XChaCha20-Poly1305 key manager

use keyforge_crypto::{Aead, XChaCha20Poly1305};
use keyforge_proto::{KeyMaterialType, XChaCha20Poly1305Key, XChaCha20Poly1305KeyFormat};

use crate::{
    constants::{XCHACHA20_POLY1305_KEY_SIZE, XCHACHA20_POLY1305_TYPE_URL, XCHACHA20_POLY1305_VERSION},
    env::{Environment, SystemEnv},
    error::KeyError,
    key_factory::FormatHandler,
    manager::{InternalKeyManager, KeyGenerator},
    primitive::PrimitiveSet,
    validation::validate_version,
};

/// Manages 256-bit XChaCha20-Poly1305 keys.
///
/// Serves [`Aead`]. The 24-byte nonce is large enough to pick at random for
/// every message without a practical collision risk.
pub struct XChaCha20Poly1305KeyManager<E: Environment = SystemEnv> {
    env: E,
    primitives: PrimitiveSet<XChaCha20Poly1305Key>,
}

impl XChaCha20Poly1305KeyManager<SystemEnv> {
    /// Manager drawing key bytes from the OS RNG.
    pub fn new() -> Result<Self, KeyError> {
        Self::with_env(SystemEnv)
    }
}

impl<E: Environment> XChaCha20Poly1305KeyManager<E> {
    /// Manager drawing key bytes from `env`.
    pub fn with_env(env: E) -> Result<Self, KeyError> {
        let primitives = PrimitiveSet::builder().add::<dyn Aead, _>(new_aead).build()?;
        Ok(Self { env, primitives })
    }
}

fn new_aead(key: &XChaCha20Poly1305Key) -> Result<Box<dyn Aead>, KeyError> {
    Ok(Box::new(XChaCha20Poly1305::new(&key.key_value)?))
}

impl<E: Environment> InternalKeyManager for XChaCha20Poly1305KeyManager<E> {
    type Key = XChaCha20Poly1305Key;

    fn key_type(&self) -> &str {
        XCHACHA20_POLY1305_TYPE_URL
    }

    fn version(&self) -> u32 {
        XCHACHA20_POLY1305_VERSION
    }

    fn key_material_type(&self) -> KeyMaterialType {
        KeyMaterialType::Symmetric
    }

    fn validate_key(&self, key: &XChaCha20Poly1305Key) -> Result<(), KeyError> {
        validate_version(key.version, self.version())?;

        if key.key_value.len() != XCHACHA20_POLY1305_KEY_SIZE {
            return Err(KeyError::OutOfRange(format!(
                "XChaCha20-Poly1305 key has {} bytes; expected {XCHACHA20_POLY1305_KEY_SIZE}",
                key.key_value.len()
            )));
        }

        Ok(())
    }

    fn primitives(&self) -> &PrimitiveSet<XChaCha20Poly1305Key> {
        &self.primitives
    }

    fn key_generator(&self) -> Option<&dyn FormatHandler<XChaCha20Poly1305Key>> {
        Some(self)
    }
}

impl<E: Environment> KeyGenerator for XChaCha20Poly1305KeyManager<E> {
    type KeyFormat = XChaCha20Poly1305KeyFormat;

    fn validate_key_format(&self, format: &XChaCha20Poly1305KeyFormat) -> Result<(), KeyError> {
        validate_version(format.version, self.version())
    }

    fn create_key(&self, _format: &XChaCha20Poly1305KeyFormat) -> Result<XChaCha20Poly1305Key, KeyError> {
        Ok(XChaCha20Poly1305Key {
            version: self.version(),
            key_value: self.env.random_key(XCHACHA20_POLY1305_KEY_SIZE),
        })
    }
}
