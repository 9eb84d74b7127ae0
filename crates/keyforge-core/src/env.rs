//! Environment abstraction for key generation.
//!
//! Decouples key generation from the system RNG. Production managers use
//! [`SystemEnv`] (OS entropy); tests inject [`test_utils::SeededEnv`] to make
//! generated keys reproducible.

/// Source of randomness for key generation.
///
/// # Safety
///
/// Implementations MUST guarantee:
///
/// - `random_bytes()` uses cryptographically secure entropy in production
/// - Methods are safe to call concurrently from multiple threads
pub trait Environment: Clone + Send + Sync + 'static {
    /// Fills the provided buffer with random bytes.
    ///
    /// # Invariants
    ///
    /// - Given the same RNG seed, this produces the same sequence of bytes
    /// - Uses cryptographically secure RNG
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Fresh random key bytes of the given length.
    fn random_key(&self, len: usize) -> Vec<u8> {
        let mut key = vec![0u8; len];
        self.random_bytes(&mut key);
        key
    }
}

/// Production environment backed by the OS cryptographic RNG (getrandom).
///
/// # Panics
///
/// Panics if the OS RNG fails. Generating keys without working entropy would
/// silently produce weak keys, and RNG failure indicates an OS-level fault.
/// The only blocking point is entropy-source initialization on first use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl Environment for SystemEnv {
    #[allow(clippy::expect_used)]
    fn random_bytes(&self, buffer: &mut [u8]) {
        getrandom::fill(buffer)
            .expect("invariant: OS RNG failure is unrecoverable - keys cannot be generated securely");
    }
}

/// Deterministic environments for tests.
pub mod test_utils {
    use std::sync::{Arc, Mutex, PoisonError};

    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    use super::Environment;

    /// Environment with a seeded ChaCha20 RNG.
    ///
    /// Clones share one RNG stream, so two managers built from clones of the
    /// same `SeededEnv` never produce the same key.
    #[derive(Clone)]
    pub struct SeededEnv {
        rng: Arc<Mutex<ChaCha20Rng>>,
    }

    impl SeededEnv {
        /// Environment whose RNG is seeded with `seed`.
        pub fn new(seed: u64) -> Self {
            Self { rng: Arc::new(Mutex::new(ChaCha20Rng::seed_from_u64(seed))) }
        }
    }

    impl Environment for SeededEnv {
        fn random_bytes(&self, buffer: &mut [u8]) {
            self.rng.lock().unwrap_or_else(PoisonError::into_inner).fill_bytes(buffer);
        }
    }
}
