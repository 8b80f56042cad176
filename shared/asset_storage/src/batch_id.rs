//! Random identifiers shared by all objects written in one upload batch

use std::fmt;
use std::sync::Mutex;

use rand::{distributions::Alphanumeric, rngs::StdRng, Rng, SeedableRng};

/// Number of characters in a batch identifier
pub const BATCH_ID_LENGTH: usize = 32;

/// Filename prefix shared by the image, animation and manifest of one batch
///
/// Drawn per character from the 62 ASCII alphanumerics. Not cryptographically
/// secure and not checked for uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BatchId(String);

impl BatchId {
    /// Samples a new identifier from `rng`
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let id = (0..BATCH_ID_LENGTH)
            .map(|_| char::from(rng.sample(Alphanumeric)))
            .collect();
        Self(id)
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Injectable source of batch identifiers
///
/// Wraps a seedable RNG so production code draws from entropy while tests can
/// pin the sequence of generated ids.
pub struct BatchIdGenerator {
    rng: Mutex<StdRng>,
}

impl BatchIdGenerator {
    /// Creates a generator seeded from operating system entropy
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Creates a deterministic generator
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Produces the next identifier
    pub fn next_id(&self) -> BatchId {
        // A poisoned lock only means another sampler panicked; the RNG state is still usable.
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        BatchId::generate(&mut *rng)
    }
}

impl Default for BatchIdGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl fmt::Debug for BatchIdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchIdGenerator").finish_non_exhaustive()
    }
}
