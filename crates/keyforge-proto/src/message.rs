//! Type-erased serialization contract.
//!
//! The key-management core handles key material and key formats of many
//! concrete types through `&dyn Message`. Callers recover the concrete type
//! with [`Message::as_any`] and a downcast, the same way they would inspect
//! any other trait object.
//!
//! Both traits are implemented for every `serde` message type, so defining a
//! new key type only requires deriving `Serialize` and `Deserialize`.

use std::{any::Any, fmt};

use serde::{Serialize, de::DeserializeOwned};

use crate::errors::{ProtoError, Result};

/// Maximum size of an encoded message accepted by [`Decode::decode`] (64 KiB).
///
/// Key material and key formats are small; anything larger is rejected before
/// the CBOR parser sees it.
pub const MAX_MESSAGE_SIZE: usize = 64 * 1024;

/// A serializable message whose concrete type may be erased.
pub trait Message: Any + fmt::Debug + Send + Sync {
    /// Serialize this message to bytes.
    fn encode(&self) -> Result<Vec<u8>>;

    /// Borrow this message as [`Any`] for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Fully qualified Rust type name of the concrete message.
    fn type_name(&self) -> &'static str;
}

/// Parse a message from bytes.
pub trait Decode: Sized {
    /// Deserialize a message, rejecting malformed or oversized input.
    fn decode(bytes: &[u8]) -> Result<Self>;
}

impl<T> Message for T
where
    T: Serialize + fmt::Debug + Send + Sync + 'static,
{
    fn encode(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::ser::into_writer(self, &mut buf).map_err(|e| ProtoError::Encode {
            message: short_name::<T>(),
            reason: e.to_string(),
        })?;
        Ok(buf)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl<T> Decode for T
where
    T: DeserializeOwned,
{
    fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > MAX_MESSAGE_SIZE {
            return Err(ProtoError::MessageTooLarge { size: bytes.len(), max: MAX_MESSAGE_SIZE });
        }

        ciborium::de::from_reader(bytes)
            .map_err(|e| ProtoError::Decode { message: short_name::<T>(), reason: e.to_string() })
    }
}

/// Last path segment of a type name, for error messages.
fn short_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
