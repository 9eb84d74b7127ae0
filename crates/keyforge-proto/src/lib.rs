//! Keyforge Wire Messages
//!
//! Messages exchanged between the key-management core and keyset storage:
//! the [`KeyData`] transport envelope, plus the key material and key format
//! messages of the built-in key types.
//!
//! Every message is a plain `serde` struct. The [`Message`] and [`Decode`]
//! traits give the rest of the workspace a single, type-erased serialization
//! contract over them, so the core never needs to know which concrete message
//! it is holding until it downcasts.
//!
//! # Encoding
//!
//! Messages are encoded as CBOR. CBOR is self-describing and needs no code
//! generation, and `ciborium` writes it deterministically, so the same
//! message always produces the same bytes.
//!
//! # Security
//!
//! - Key bytes are zeroized when a key message is dropped
//! - `Debug` output of key messages redacts key bytes
//! - Decoding rejects inputs larger than [`MAX_MESSAGE_SIZE`] before parsing

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod errors;
pub mod key_data;
pub mod keys;
pub mod message;

pub use errors::{ProtoError, Result};
pub use key_data::{KeyData, KeyMaterialType};
pub use keys::{
    AesGcmKey, AesGcmKeyFormat, HashType, HmacKey, HmacKeyFormat, HmacParams,
    XChaCha20Poly1305Key, XChaCha20Poly1305KeyFormat,
};
pub use message::{Decode, MAX_MESSAGE_SIZE, Message};
