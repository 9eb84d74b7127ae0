//! Reusable validators for key managers.
//!
//! Managers call these explicitly from `validate_key` and
//! `validate_key_format`. All of them report `OutOfRange`: the input parsed
//! fine, but its values are not acceptable.

use crate::error::KeyError;

/// Reject key material newer than the manager understands.
pub fn validate_version(candidate: u32, max_expected: u32) -> Result<(), KeyError> {
    if candidate > max_expected {
        return Err(KeyError::OutOfRange(format!(
            "key has version {candidate}; only keys with version in range [0..{max_expected}] are supported"
        )));
    }

    Ok(())
}

/// Accept only 128- and 256-bit AES keys.
pub fn validate_aes_key_size(size: usize) -> Result<(), KeyError> {
    if size != 16 && size != 32 {
        return Err(KeyError::OutOfRange(format!(
            "AES key has {size} bytes; supported sizes: 16 or 32 bytes"
        )));
    }

    Ok(())
}

/// Reject sizes below a minimum.
pub fn validate_key_size_at_least(size: usize, min: usize, what: &str) -> Result<(), KeyError> {
    if size < min {
        return Err(KeyError::OutOfRange(format!(
            "{what} has {size} bytes; at least {min} bytes are required"
        )));
    }

    Ok(())
}

/// Reject sizes above a maximum.
pub fn validate_key_size_at_most(size: usize, max: usize, what: &str) -> Result<(), KeyError> {
    if size > max {
        return Err(KeyError::OutOfRange(format!(
            "{what} has {size} bytes; at most {max} bytes are allowed"
        )));
    }

    Ok(())
}
