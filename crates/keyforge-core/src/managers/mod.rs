//! Built-in key managers.
//!
//! | Manager | Key sizes | Serves |
//! |---------|-----------|--------|
//! | [`AesGcmKeyManager`] | 16 or 32 bytes | `dyn Aead` |
//! | [`XChaCha20Poly1305KeyManager`] | 32 bytes | `dyn Aead` |
//! | [`HmacKeyManager`] | at least 16 bytes | `dyn Mac` |

mod aes_gcm;
mod hmac;
mod xchacha20_poly1305;

pub use aes_gcm::AesGcmKeyManager;
pub use hmac::HmacKeyManager;
pub use xchacha20_poly1305::XChaCha20Poly1305KeyManager;
