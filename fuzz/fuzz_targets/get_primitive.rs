//! Fuzz target for the adapter pipeline
//!
//! Drives decode, validation and primitive construction of every built-in
//! manager with attacker-controlled key material.
//!
//! # Invariants
//!
//! - NEVER panic
//! - Key material that fails validation never reaches a primitive factory,
//!   so untrusted bytes never produce `Internal`
//! - Generation from arbitrary format bytes either fails or yields a key the
//!   same manager accepts
//! - Caller-chosen key sizes are bounded before any allocation

#![no_main]

use arbitrary::Arbitrary;
use keyforge_core::{
    AesGcmKeyManager, ErrorKind, HmacKeyManager, InternalKeyManager, KeyError,
    XChaCha20Poly1305KeyManager, make_key_manager,
};
use keyforge_crypto::{Aead, Mac};
use keyforge_proto::{Decode, KeyData, KeyMaterialType};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Target {
    AesGcm,
    XChaCha20Poly1305,
    Hmac,
}

#[derive(Debug, Arbitrary)]
struct Input {
    target: Target,
    key_bytes: Vec<u8>,
    format_bytes: Vec<u8>,
}

fn assert_untrusted_failure(err: &KeyError) {
    assert!(
        matches!(err.kind(), ErrorKind::InvalidArgument | ErrorKind::OutOfRange),
        "untrusted input produced {err}"
    );
}

fn exercise<M: InternalKeyManager>(manager: &M, input: &Input) {
    let key_data = KeyData::new(manager.key_type(), input.key_bytes.clone(), KeyMaterialType::Symmetric);

    let aead = make_key_manager::<dyn Aead, _>(manager);
    let mac = make_key_manager::<dyn Mac, _>(manager);
    for result in [aead.get_primitive(&key_data).err(), mac.get_primitive(&key_data).err()] {
        if let Some(err) = result {
            assert_untrusted_failure(&err);
        }
    }

    match aead.key_factory().new_key_data(&input.format_bytes) {
        Ok(generated) => {
            let key = M::Key::decode(&generated.value).expect("generated key must decode");
            manager.validate_key(&key).expect("generated key must validate");
        }
        Err(err) => assert_untrusted_failure(&err),
    }
}

fuzz_target!(|input: Input| {
    match input.target {
        Target::AesGcm => {
            let Ok(manager) = AesGcmKeyManager::new() else { return };
            exercise(&manager, &input);
        }
        Target::XChaCha20Poly1305 => {
            let Ok(manager) = XChaCha20Poly1305KeyManager::new() else { return };
            exercise(&manager, &input);
        }
        Target::Hmac => {
            let Ok(manager) = HmacKeyManager::new() else { return };
            exercise(&manager, &input);
        }
    }
});
