//! Error types for message encoding and decoding.

use thiserror::Error;

/// Result alias for message operations.
pub type Result<T> = std::result::Result<T, ProtoError>;

/// Errors raised while encoding or decoding wire messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtoError {
    /// CBOR serialization failed
    #[error("failed to encode {message}: {reason}")]
    Encode {
        /// Message type being encoded
        message: &'static str,
        /// Underlying encoder error
        reason: String,
    },

    /// CBOR deserialization failed (malformed or mismatched bytes)
    #[error("failed to decode {message}: {reason}")]
    Decode {
        /// Message type being decoded
        message: &'static str,
        /// Underlying decoder error
        reason: String,
    },

    /// Input exceeds the maximum accepted message size
    #[error("message too large: {size} bytes exceeds maximum {max}")]
    MessageTooLarge {
        /// Size of the rejected input
        size: usize,
        /// Maximum accepted size
        max: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_names_the_message() {
        let err = ProtoError::Decode { message: "AesGcmKey", reason: "eof".to_string() };
        assert_eq!(err.to_string(), "failed to decode AesGcmKey: eof");
    }

    #[test]
    fn too_large_reports_both_sizes() {
        let err = ProtoError::MessageTooLarge { size: 70_000, max: 65_536 };
        let msg = err.to_string();
        assert!(msg.contains("70000"));
        assert!(msg.contains("65536"));
    }
}
