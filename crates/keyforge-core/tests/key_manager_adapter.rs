//! Adapter behavior against a configurable test manager
//!
//! `ExampleKeyManager` handles AES-GCM key material and serves two
//! interfaces, `dyn Aead` and `dyn RawKeyView`. Its validation hooks can be
//! forced to fail so each pipeline step can be observed short-circuiting.

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    thread,
};

use keyforge_core::{
    ErrorKind, FormatHandler, InternalKeyManager, KeyError, KeyGenerator, KeyManager,
    KeyManagerAdapter, PrimitiveSet, constants::AES_GCM_TYPE_URL, make_key_manager,
    validation::{validate_aes_key_size, validate_version},
};
use keyforge_crypto::{Aead, AesGcm};
use keyforge_proto::{
    AesGcmKey, AesGcmKeyFormat, Decode, KeyData, KeyMaterialType, Message,
    XChaCha20Poly1305KeyFormat,
};

/// Second interface served from the same key bytes.
trait RawKeyView {
    fn raw_key(&self) -> Vec<u8>;
}

struct RawKey(Vec<u8>);

impl RawKeyView for RawKey {
    fn raw_key(&self) -> Vec<u8> {
        self.0.clone()
    }
}

/// Interface no manager declares.
trait NotSupported {}

fn new_aead(key: &AesGcmKey) -> Result<Box<dyn Aead>, KeyError> {
    Ok(Box::new(AesGcm::new(&key.key_value)?))
}

fn new_raw_view(key: &AesGcmKey) -> Result<Box<dyn RawKeyView>, KeyError> {
    Ok(Box::new(RawKey(key.key_value.clone())))
}

fn example_primitives() -> PrimitiveSet<AesGcmKey> {
    PrimitiveSet::builder()
        .add::<dyn Aead, _>(new_aead)
        .add::<dyn RawKeyView, _>(new_raw_view)
        .build()
        .unwrap()
}

struct ExampleKeyManager {
    version: u32,
    key_error: Option<KeyError>,
    format_error: Option<KeyError>,
    creates: AtomicUsize,
    primitives: PrimitiveSet<AesGcmKey>,
}

impl ExampleKeyManager {
    fn new() -> Self {
        Self {
            version: 0,
            key_error: None,
            format_error: None,
            creates: AtomicUsize::new(0),
            primitives: example_primitives(),
        }
    }

    fn with_key_error(message: &str) -> Self {
        Self { key_error: Some(KeyError::OutOfRange(message.to_string())), ..Self::new() }
    }

    fn with_format_error(message: &str) -> Self {
        Self { format_error: Some(KeyError::OutOfRange(message.to_string())), ..Self::new() }
    }

    fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }
}

impl InternalKeyManager for ExampleKeyManager {
    type Key = AesGcmKey;

    fn key_type(&self) -> &str {
        AES_GCM_TYPE_URL
    }

    fn version(&self) -> u32 {
        self.version
    }

    fn key_material_type(&self) -> KeyMaterialType {
        KeyMaterialType::Symmetric
    }

    fn validate_key(&self, key: &AesGcmKey) -> Result<(), KeyError> {
        if let Some(err) = &self.key_error {
            return Err(err.clone());
        }
        validate_version(key.version, self.version)?;
        validate_aes_key_size(key.key_value.len())
    }

    fn primitives(&self) -> &PrimitiveSet<AesGcmKey> {
        &self.primitives
    }

    fn key_generator(&self) -> Option<&dyn FormatHandler<AesGcmKey>> {
        Some(self)
    }
}

impl KeyGenerator for ExampleKeyManager {
    type KeyFormat = AesGcmKeyFormat;

    fn validate_key_format(&self, format: &AesGcmKeyFormat) -> Result<(), KeyError> {
        if let Some(err) = &self.format_error {
            return Err(err.clone());
        }
        validate_aes_key_size(format.key_size as usize)
    }

    fn create_key(&self, format: &AesGcmKeyFormat) -> Result<AesGcmKey, KeyError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        Ok(AesGcmKey { version: 0, key_value: vec![0x2a; format.key_size as usize] })
    }
}

/// Manager for a key type that has no key format.
struct ImportOnlyKeyManager {
    primitives: PrimitiveSet<AesGcmKey>,
}

impl ImportOnlyKeyManager {
    fn new() -> Self {
        Self { primitives: example_primitives() }
    }
}

impl InternalKeyManager for ImportOnlyKeyManager {
    type Key = AesGcmKey;

    fn key_type(&self) -> &str {
        AES_GCM_TYPE_URL
    }

    fn version(&self) -> u32 {
        0
    }

    fn key_material_type(&self) -> KeyMaterialType {
        KeyMaterialType::Symmetric
    }

    fn validate_key(&self, key: &AesGcmKey) -> Result<(), KeyError> {
        validate_aes_key_size(key.key_value.len())
    }

    fn primitives(&self) -> &PrimitiveSet<AesGcmKey> {
        &self.primitives
    }
}

fn key_data_16() -> KeyData {
    let key = AesGcmKey { version: 0, key_value: vec![7u8; 16] };
    KeyData::new(AES_GCM_TYPE_URL, key.encode().unwrap(), KeyMaterialType::Symmetric)
}

fn format_bytes(key_size: u32) -> Vec<u8> {
    AesGcmKeyFormat::with_key_size(key_size).encode().unwrap()
}

#[test]
fn factory_new_key_from_message() {
    let km = ExampleKeyManager::new();
    let adapter = make_key_manager::<dyn Aead, _>(&km);

    let key = adapter.key_factory().new_key(&AesGcmKeyFormat::with_key_size(16)).unwrap();
    let key = key.as_any().downcast_ref::<AesGcmKey>().unwrap();

    assert_eq!(key.key_value.len(), 16);
    assert_eq!(km.creates(), 1);
}

#[test]
fn factory_new_key_from_bytes() {
    let km = ExampleKeyManager::new();
    let adapter = make_key_manager::<dyn Aead, _>(&km);

    let key = adapter.key_factory().new_key_from_bytes(&format_bytes(32)).unwrap();
    let key = key.as_any().downcast_ref::<AesGcmKey>().unwrap();

    assert_eq!(key.key_value.len(), 32);
}

#[test]
fn factory_new_key_data() {
    let km = ExampleKeyManager::new();
    let adapter = make_key_manager::<dyn Aead, _>(&km);

    let key_data = adapter.key_factory().new_key_data(&format_bytes(16)).unwrap();

    assert_eq!(key_data.type_url, AES_GCM_TYPE_URL);
    assert_eq!(key_data.key_material_type, KeyMaterialType::Symmetric);
    let key = AesGcmKey::decode(&key_data.value).unwrap();
    assert_eq!(key.key_value.len(), 16);
}

#[test]
fn factory_rejects_garbage_format_bytes() {
    let km = ExampleKeyManager::new();
    let adapter = make_key_manager::<dyn Aead, _>(&km);

    let err = adapter.key_factory().new_key_from_bytes(b"\xff not cbor").err().unwrap();

    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(km.creates(), 0);
}

#[test]
fn factory_rejects_wrong_format_message() {
    let km = ExampleKeyManager::new();
    let adapter = make_key_manager::<dyn Aead, _>(&km);

    let err = adapter.key_factory().new_key(&XChaCha20Poly1305KeyFormat::default()).err().unwrap();

    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(err.message().contains("XChaCha20Poly1305KeyFormat"));
    assert_eq!(km.creates(), 0);
}

#[test]
fn factory_validate_format_failure_skips_creation() {
    let km = ExampleKeyManager::with_format_error("X");
    let adapter = make_key_manager::<dyn Aead, _>(&km);
    let factory = adapter.key_factory();
    let expected = KeyError::OutOfRange("X".to_string());

    assert_eq!(factory.new_key(&AesGcmKeyFormat::with_key_size(16)).err().unwrap(), expected);
    assert_eq!(factory.new_key_from_bytes(&format_bytes(16)).err().unwrap(), expected);
    assert_eq!(factory.new_key_data(&format_bytes(16)).unwrap_err(), expected);

    // INVARIANT: create_key never runs after a failed format validation
    assert_eq!(km.creates(), 0);
}

#[test]
fn factory_rejects_24_byte_format() {
    let km = ExampleKeyManager::new();
    let adapter = make_key_manager::<dyn Aead, _>(&km);

    let err = adapter.key_factory().new_key_data(&format_bytes(24)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::OutOfRange);
    assert_eq!(km.creates(), 0);
}

#[test]
fn factory_without_format_is_unimplemented() {
    let km = ImportOnlyKeyManager::new();
    let adapter = make_key_manager::<dyn Aead, _>(&km);
    let factory = adapter.key_factory();

    let errors = [
        factory.new_key(&AesGcmKeyFormat::with_key_size(16)).err().unwrap(),
        factory.new_key_from_bytes(&format_bytes(16)).err().unwrap(),
        factory.new_key_data(&format_bytes(16)).unwrap_err(),
        // Input is never parsed, so garbage fails the same way
        factory.new_key_data(b"garbage").unwrap_err(),
    ];

    for err in errors {
        assert_eq!(err.kind(), ErrorKind::Unimplemented);
        assert!(err.message().contains(AES_GCM_TYPE_URL));
    }
    assert!(!km.has_key_generation());
}

#[test]
fn import_only_manager_still_builds_primitives() {
    let km = ImportOnlyKeyManager::new();
    let adapter = make_key_manager::<dyn RawKeyView, _>(&km);

    let view = adapter.get_primitive(&key_data_16()).unwrap();
    assert_eq!(hex::encode(view.raw_key()), "07".repeat(16));
}

#[test]
fn create_aead_from_key_data() {
    let km = ExampleKeyManager::new();
    let adapter = make_key_manager::<dyn Aead, _>(&km);
    let key_data = adapter.key_factory().new_key_data(&format_bytes(16)).unwrap();

    let aead = adapter.get_primitive(&key_data).unwrap();

    let ct = aead.encrypt(b"Hi", b"aad").unwrap();
    assert_eq!(aead.decrypt(&ct, b"aad").unwrap(), b"Hi");
    assert!(aead.decrypt(&ct, b"bad").is_err());
}

#[test]
fn create_aead_from_key() {
    let km = ExampleKeyManager::new();
    let adapter = make_key_manager::<dyn Aead, _>(&km);
    let key = AesGcmKey { version: 0, key_value: vec![1u8; 32] };

    let aead = adapter.get_primitive_from_key(&key).unwrap();

    let ct = aead.encrypt(b"Hi", b"aad").unwrap();
    assert_eq!(aead.decrypt(&ct, b"aad").unwrap(), b"Hi");
}

#[test]
fn both_interfaces_share_key_material() {
    let km = ExampleKeyManager::new();
    let key_data = key_data_16();

    let view = make_key_manager::<dyn RawKeyView, _>(&km).get_primitive(&key_data).unwrap();
    let aead = make_key_manager::<dyn Aead, _>(&km).get_primitive(&key_data).unwrap();

    assert_eq!(view.raw_key(), vec![7u8; 16]);

    let reference = AesGcm::new(&view.raw_key()).unwrap();
    let ct = aead.encrypt(b"shared", b"").unwrap();
    assert_eq!(reference.decrypt(&ct, b"").unwrap(), b"shared");
}

#[test]
fn unsupported_primitive_is_invalid_argument() {
    let km = ExampleKeyManager::new();
    let adapter = make_key_manager::<dyn NotSupported, _>(&km);

    let err = adapter.get_primitive(&key_data_16()).err().unwrap();

    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(err.message().contains("No PrimitiveFactory was registered for type"));
    assert!(err.message().contains("NotSupported"));
    assert!(err.message().contains(AES_GCM_TYPE_URL));
}

#[test]
fn unsupported_primitive_wins_over_invalid_key() {
    let km = ExampleKeyManager::with_key_error("X");
    let adapter = make_key_manager::<dyn NotSupported, _>(&km);

    // Key validation would fail, but the missing factory is reported first
    let err = adapter.get_primitive(&key_data_16()).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = adapter.get_primitive(&KeyData::new("", b"junk".to_vec(), KeyMaterialType::Symmetric));
    assert_eq!(err.err().unwrap().kind(), ErrorKind::InvalidArgument);
}

#[test]
fn validate_key_failure_is_returned_unchanged() {
    let km = ExampleKeyManager::with_key_error("X");
    let adapter = make_key_manager::<dyn Aead, _>(&km);
    let expected = KeyError::OutOfRange("X".to_string());

    assert_eq!(adapter.get_primitive(&key_data_16()).err().unwrap(), expected);

    let key = AesGcmKey { version: 0, key_value: vec![7u8; 16] };
    assert_eq!(adapter.get_primitive_from_key(&key).err().unwrap(), expected);
}

#[test]
fn future_key_version_is_out_of_range() {
    let km = ExampleKeyManager::new();
    let adapter = make_key_manager::<dyn Aead, _>(&km);
    let key = AesGcmKey { version: 1, key_value: vec![7u8; 16] };

    let err = adapter.get_primitive_from_key(&key).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
}

#[test]
fn garbage_key_bytes_are_invalid_argument() {
    let km = ExampleKeyManager::new();
    let adapter = make_key_manager::<dyn Aead, _>(&km);
    let key_data = KeyData::new(AES_GCM_TYPE_URL, vec![0xff, 0x00, 0x13], KeyMaterialType::Symmetric);

    let err = adapter.get_primitive(&key_data).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn wrong_key_message_is_invalid_argument() {
    let km = ExampleKeyManager::new();
    let adapter = make_key_manager::<dyn Aead, _>(&km);

    let err = adapter.get_primitive_from_key(&AesGcmKeyFormat::with_key_size(16)).err().unwrap();

    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(err.message().contains("AesGcmKeyFormat"));
}

#[test]
fn type_url_is_not_checked_by_adapter() {
    let km = ExampleKeyManager::new();
    let adapter = make_key_manager::<dyn Aead, _>(&km);
    let mut key_data = key_data_16();
    key_data.type_url = "some.other/Key".to_string();

    assert!(adapter.get_primitive(&key_data).is_ok());
    assert!(!adapter.does_support(&key_data.type_url));
}

#[test]
fn does_support_is_exact() {
    let km = ExampleKeyManager::new();
    let adapter = make_key_manager::<dyn Aead, _>(&km);

    assert!(adapter.does_support(AES_GCM_TYPE_URL));
    assert!(!adapter.does_support(&AES_GCM_TYPE_URL[1..]));
    assert!(!adapter.does_support(&AES_GCM_TYPE_URL[..AES_GCM_TYPE_URL.len() - 1]));
    assert!(!adapter.does_support(&format!("{AES_GCM_TYPE_URL} ")));
    assert!(!adapter.does_support(""));
}

#[test]
fn key_type_and_version_pass_through() {
    let km = ExampleKeyManager { version: 121_351, ..ExampleKeyManager::new() };
    let adapter = make_key_manager::<dyn Aead, _>(&km);

    assert_eq!(adapter.version(), 121_351);
    assert_eq!(adapter.key_type(), AES_GCM_TYPE_URL);
}

#[test]
fn adapter_is_shared_across_threads() {
    let km = ExampleKeyManager::new();
    let adapter = KeyManagerAdapter::<dyn Aead, _>::new(&km);
    let key_data = adapter.key_factory().new_key_data(&format_bytes(32)).unwrap();

    thread::scope(|s| {
        for i in 0..4u8 {
            let (adapter, key_data) = (&adapter, &key_data);
            s.spawn(move || {
                let aead = adapter.get_primitive(key_data).unwrap();
                let ct = aead.encrypt(&[i], b"thread").unwrap();
                assert_eq!(aead.decrypt(&ct, b"thread").unwrap(), vec![i]);
            });
        }
    });
}
