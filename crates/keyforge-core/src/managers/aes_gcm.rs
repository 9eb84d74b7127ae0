//! AES-GCM key manager

use keyforge_crypto::{Aead, AesGcm};
use keyforge_proto::{AesGcmKey, AesGcmKeyFormat, KeyMaterialType};

use crate::{
    constants::{AES_GCM_TYPE_URL, AES_GCM_VERSION},
    env::{Environment, SystemEnv},
    error::KeyError,
    key_factory::FormatHandler,
    manager::{InternalKeyManager, KeyGenerator},
    primitive::PrimitiveSet,
    validation::{validate_aes_key_size, validate_version},
};

/// Manages AES-128-GCM and AES-256-GCM keys.
///
/// Serves [`Aead`]. Generates 16- or 32-byte keys.
pub struct AesGcmKeyManager<E: Environment = SystemEnv> {
    env: E,
    primitives: PrimitiveSet<AesGcmKey>,
}

impl AesGcmKeyManager<SystemEnv> {
    /// Manager drawing key bytes from the OS RNG.
    pub fn new() -> Result<Self, KeyError> {
        Self::with_env(SystemEnv)
    }
}

impl<E: Environment> AesGcmKeyManager<E> {
    /// Manager drawing key bytes from `env`.
    pub fn with_env(env: E) -> Result<Self, KeyError> {
        let primitives = PrimitiveSet::builder().add::<dyn Aead, _>(new_aead).build()?;
        Ok(Self { env, primitives })
    }
}

fn new_aead(key: &AesGcmKey) -> Result<Box<dyn Aead>, KeyError> {
    Ok(Box::new(AesGcm::new(&key.key_value)?))
}

impl<E: Environment> InternalKeyManager for AesGcmKeyManager<E> {
    type Key = AesGcmKey;

    fn key_type(&self) -> &str {
        AES_GCM_TYPE_URL
    }

    fn version(&self) -> u32 {
        AES_GCM_VERSION
    }

    fn key_material_type(&self) -> KeyMaterialType {
        KeyMaterialType::Symmetric
    }

    fn validate_key(&self, key: &AesGcmKey) -> Result<(), KeyError> {
        validate_version(key.version, self.version())?;
        validate_aes_key_size(key.key_value.len())
    }

    fn primitives(&self) -> &PrimitiveSet<AesGcmKey> {
        &self.primitives
    }

    fn key_generator(&self) -> Option<&dyn FormatHandler<AesGcmKey>> {
        Some(self)
    }
}

impl<E: Environment> KeyGenerator for AesGcmKeyManager<E> {
    type KeyFormat = AesGcmKeyFormat;

    fn validate_key_format(&self, format: &AesGcmKeyFormat) -> Result<(), KeyError> {
        validate_version(format.version, self.version())?;
        validate_aes_key_size(format.key_size as usize)
    }

    fn create_key(&self, format: &AesGcmKeyFormat) -> Result<AesGcmKey, KeyError> {
        Ok(AesGcmKey {
            version: self.version(),
            key_value: self.env.random_key(format.key_size as usize),
        })
    }
}
