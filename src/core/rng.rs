//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Context streams**: Independent sequences for different purposes
//!
//! The game draws deck shuffles and triple orderings from one stream and
//! opponent delays from another, so changing how often the agent wakes up
//! never changes which cards get dealt.
//!
//! ```
//! use triples::core::GameRng;
//!
//! let rng = GameRng::new(42);
//! let mut deck = rng.for_context("deck");
//! let mut agent = rng.for_context("agent");
//!
//! let a: Vec<_> = (0..5).map(|_| deck.gen_range(0..1000)).collect();
//! let b: Vec<_> = (0..5).map(|_| agent.gen_range(0..1000)).collect();
//! assert_ne!(a, b);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};
use std::ops::Range;

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a random integer in the given range.
    pub fn gen_range(&mut self, range: Range<i32>) -> i32 {
        self.inner.gen_range(range)
    }

    /// Uniform float in `[range.start, range.end)`.
    ///
    /// An empty or inverted range yields `range.start`.
    pub fn gen_range_f64(&mut self, range: Range<f64>) -> f64 {
        if range.start >= range.end {
            return range.start;
        }
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place (Fisher-Yates).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}
