//! Fuzz target for message decoding
//!
//! Keyset storage hands the core bytes it did not produce. This target feeds
//! arbitrary input to every message decoder.
//!
//! # Invariants
//!
//! - NEVER panic on malformed CBOR
//! - Anything that decodes re-encodes and decodes to the same message

#![no_main]

use keyforge_proto::{
    AesGcmKey, AesGcmKeyFormat, Decode, HmacKey, HmacKeyFormat, KeyData, Message,
    XChaCha20Poly1305Key, XChaCha20Poly1305KeyFormat,
};
use libfuzzer_sys::fuzz_target;

fn check<T: Message + Decode + PartialEq>(data: &[u8]) {
    let Ok(message) = T::decode(data) else {
        return;
    };

    let encoded = message.encode().expect("decoded message must re-encode");
    let again = T::decode(&encoded).expect("re-encoded message must decode");
    assert!(again == message, "{} changed across re-encoding", message.type_name());
}

fuzz_target!(|data: &[u8]| {
    check::<KeyData>(data);
    check::<AesGcmKey>(data);
    check::<AesGcmKeyFormat>(data);
    check::<XChaCha20Poly1305Key>(data);
    check::<XChaCha20Poly1305KeyFormat>(data);
    check::<HmacKey>(data);
    check::<HmacKeyFormat>(data);
});
