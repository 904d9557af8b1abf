//! Deterministic random number generation utilities.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// A seed for deterministic random number generation.
///
/// Training seeds all pseudo-randomness from one configured value before any
/// data preparation, so the same seed reproduces the same run.
///
/// # Example
///
/// ```rust
/// use panelcast_core::Seed;
/// use rand::Rng;
///
/// let mut rng = Seed::new(42).to_rng();
/// let mut rng2 = Seed::new(42).to_rng();
/// let val1: f32 = rng.gen();
/// let val2: f32 = rng2.gen();
/// assert_eq!(val1, val2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seed(u64);

impl Seed {
    /// Create a new seed with the given value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the underlying seed value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Create a new random number generator from this seed.
    #[must_use]
    pub fn to_rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.0)
    }

    /// Derive an independent seed from this seed using a key.
    ///
    /// Useful for giving separate random streams (e.g. weight init vs.
    /// shuffling inside an engine) their own seeds from one master value.
    #[must_use]
    pub fn derive(&self, key: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        self.0.hash(&mut hasher);
        key.hash(&mut hasher);
        Self(hasher.finish())
    }
}

impl Default for Seed {
    fn default() -> Self {
        Self::new(0)
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<Seed> for u64 {
    fn from(seed: Seed) -> Self {
        seed.0
    }
}
