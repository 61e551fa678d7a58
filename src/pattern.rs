//! # Deterministic Pattern Generator
//!
//! Produces the pseudo-random 64-bit word sequence the soak loop writes
//! and later verifies. The generator is seeded with the cycle counter,
//! so the write pass and the verify pass of a cycle regenerate exactly
//! the same sequence, on this process or any other, and the expected
//! region contents never have to be stored.
//!
//! ChaCha8 is used because its seeded output is specified to be
//! identical across platforms and library versions, which is the whole
//! contract here; cryptographic strength is incidental.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone)]
pub struct PatternGenerator {
    rng: ChaCha8Rng,
}

impl PatternGenerator {
    /// Deterministically initializes the sequence for one cycle. The
    /// same cycle counter always yields the identical sequence.
    pub fn for_cycle(cycle: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(cycle),
        }
    }

    /// Next 64-bit word, advancing the internal state. The sequence is
    /// infinite; restarting it means constructing a new generator for
    /// the same cycle.
    pub fn next_word(&mut self) -> u64 {
        self.rng.next_u64()
    }
}
