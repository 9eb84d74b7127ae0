//! HMAC key manager

use keyforge_crypto::{Hmac, HmacHash, Mac};
use keyforge_proto::{HashType, HmacKey, HmacKeyFormat, HmacParams, KeyMaterialType};

use crate::{
    constants::{HMAC_TYPE_URL, HMAC_VERSION, MAX_HMAC_KEY_SIZE, MIN_HMAC_KEY_SIZE, MIN_HMAC_TAG_SIZE},
    env::{Environment, SystemEnv},
    error::KeyError,
    key_factory::FormatHandler,
    manager::{InternalKeyManager, KeyGenerator},
    primitive::PrimitiveSet,
    validation::{validate_key_size_at_least, validate_key_size_at_most, validate_version},
};

/// Manages HMAC-SHA256 and HMAC-SHA512 keys.
///
/// Serves [`Mac`]. Keys are between [`MIN_HMAC_KEY_SIZE`] and
/// [`MAX_HMAC_KEY_SIZE`] bytes.
pub struct HmacKeyManager<E: Environment = SystemEnv> {
    env: E,
    primitives: PrimitiveSet<HmacKey>,
}

impl HmacKeyManager<SystemEnv> {
    /// Manager drawing key bytes from the OS RNG.
    pub fn new() -> Result<Self, KeyError> {
        Self::with_env(SystemEnv)
    }
}

impl<E: Environment> HmacKeyManager<E> {
    /// Manager drawing key bytes from `env`.
    pub fn with_env(env: E) -> Result<Self, KeyError> {
        let primitives = PrimitiveSet::builder().add::<dyn Mac, _>(new_mac).build()?;
        Ok(Self { env, primitives })
    }
}

fn new_mac(key: &HmacKey) -> Result<Box<dyn Mac>, KeyError> {
    let hash = match key.params.hash {
        HashType::Sha256 => HmacHash::Sha256,
        HashType::Sha512 => HmacHash::Sha512,
    };

    Ok(Box::new(Hmac::new(hash, &key.key_value, key.params.tag_size as usize)?))
}

fn validate_params(params: &HmacParams) -> Result<(), KeyError> {
    let tag_size = params.tag_size as usize;
    let max = params.hash.digest_size();

    if tag_size < MIN_HMAC_TAG_SIZE {
        return Err(KeyError::OutOfRange(format!(
            "tag size {tag_size} is too small; at least {MIN_HMAC_TAG_SIZE} bytes are required"
        )));
    }

    if tag_size > max {
        return Err(KeyError::OutOfRange(format!(
            "tag size {tag_size} is too big for {:?}; at most {max} bytes are allowed",
            params.hash
        )));
    }

    Ok(())
}

impl<E: Environment> InternalKeyManager for HmacKeyManager<E> {
    type Key = HmacKey;

    fn key_type(&self) -> &str {
        HMAC_TYPE_URL
    }

    fn version(&self) -> u32 {
        HMAC_VERSION
    }

    fn key_material_type(&self) -> KeyMaterialType {
        KeyMaterialType::Symmetric
    }

    fn validate_key(&self, key: &HmacKey) -> Result<(), KeyError> {
        validate_version(key.version, self.version())?;
        validate_key_size_at_least(key.key_value.len(), MIN_HMAC_KEY_SIZE, "HMAC key")?;
        validate_key_size_at_most(key.key_value.len(), MAX_HMAC_KEY_SIZE, "HMAC key")?;
        validate_params(&key.params)
    }

    fn primitives(&self) -> &PrimitiveSet<HmacKey> {
        &self.primitives
    }

    fn key_generator(&self) -> Option<&dyn FormatHandler<HmacKey>> {
        Some(self)
    }
}

impl<E: Environment> KeyGenerator for HmacKeyManager<E> {
    type KeyFormat = HmacKeyFormat;

    fn validate_key_format(&self, format: &HmacKeyFormat) -> Result<(), KeyError> {
        validate_version(format.version, self.version())?;
        validate_key_size_at_least(format.key_size as usize, MIN_HMAC_KEY_SIZE, "HMAC key format")?;
        validate_key_size_at_most(format.key_size as usize, MAX_HMAC_KEY_SIZE, "HMAC key format")?;
        validate_params(&format.params)
    }

    fn create_key(&self, format: &HmacKeyFormat) -> Result<HmacKey, KeyError> {
        Ok(HmacKey {
            version: self.version(),
            params: format.params,
            key_value: self.env.random_key(format.key_size as usize),
        })
    }
}
