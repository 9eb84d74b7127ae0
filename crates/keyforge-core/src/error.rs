//! Error types for key management.
//!
//! Every failure in the adapter pipeline is one of four kinds. The first
//! failing step short-circuits the pipeline and its error reaches the caller
//! unchanged, so errors are `Clone + Eq` and tests can compare them exactly.
//!
//! None of these errors is transient: a key that fails validation today fails
//! it tomorrow, so callers must never retry.

use std::fmt;

use keyforge_crypto::CryptoError;
use keyforge_proto::ProtoError;
use thiserror::Error;

/// Coarse classification of a [`KeyError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input, or a request the manager cannot serve
    InvalidArgument,
    /// Key or format failed semantic validation
    OutOfRange,
    /// Operation not supported by this key type
    Unimplemented,
    /// Primitive construction rejected validated material
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::OutOfRange => "OUT_OF_RANGE",
            Self::Unimplemented => "UNIMPLEMENTED",
            Self::Internal => "INTERNAL",
        };
        f.write_str(name)
    }
}

/// Errors returned by key managers, key factories and adapters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// Malformed serialized bytes, wrong message type, or no factory for the
    /// requested primitive
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Key or key format failed validation (bad size, stale version)
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// Key generation requested from a manager without a key format
    #[error("unimplemented: {0}")]
    Unimplemented(String),

    /// Primitive construction rejected otherwise-valid key material
    #[error("internal: {0}")]
    Internal(String),
}

impl KeyError {
    /// Kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::OutOfRange(_) => ErrorKind::OutOfRange,
            Self::Unimplemented(_) => ErrorKind::Unimplemented,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Diagnostic message, without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidArgument(m)
            | Self::OutOfRange(m)
            | Self::Unimplemented(m)
            | Self::Internal(m) => m,
        }
    }
}

/// Decoding failures mean the caller handed us malformed bytes.
impl From<ProtoError> for KeyError {
    fn from(err: ProtoError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

/// Validated material was rejected by the algorithm itself.
impl From<CryptoError> for KeyError {
    fn from(err: CryptoError) -> Self {
        Self::Internal(err.to_string())
    }
}
