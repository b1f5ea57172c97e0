//! Seeded Park-Miller generator
//!
//! A multiplicative linear-congruential generator (`16807 * s mod 2^31 - 1`).
//! The exact stream is part of the output contract: zone shapes for a given
//! seed must stay identical across runs and implementations, so this is used
//! instead of any platform random source.

use rand::{Error, RngCore, SeedableRng};
use rand_core::impls;

/// Prime modulus `2^31 - 1`
pub const MODULUS: i64 = 2_147_483_647;

/// Park-Miller multiplier
pub const MULTIPLIER: i64 = 16_807;

/// Deterministic generator producing floats in `[0, 1)`
///
/// Each generator owns its state; independent calls must use independent
/// instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    state: i64,
}

impl SeededRng {
    /// Create a generator from any integer seed
    ///
    /// The seed is reduced modulo `2^31 - 1`; non-positive results are shifted
    /// up by `2^31 - 2` so the state stays in `(0, 2^31 - 1)`.
    pub fn new(seed: i64) -> Self {
        let mut state = seed % MODULUS;
        if state <= 0 {
            state += MODULUS - 1;
        }
        // -(2^31 - 2) is the one seed the shift maps onto 0, which is absorbing
        if state == 0 {
            state = 1;
        }
        Self { state }
    }

    /// Current internal state
    #[inline]
    pub fn state(&self) -> i64 {
        self.state
    }

    /// Advance the state and return it, in `[1, 2^31 - 2]`
    #[inline]
    pub fn next_state(&mut self) -> i64 {
        self.state = self.state * MULTIPLIER % MODULUS;
        self.state
    }

    /// Next float in `[0, 1)`
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_state() - 1) as f64 / (MODULUS - 1) as f64
    }

    /// Next float in `[low, high)`
    #[inline]
    pub fn next_range(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_f64() * (high - low)
    }
}

impl RngCore for SeededRng {
    /// Top 16 bits of two successive states
    ///
    /// A raw state has only 31 significant bits, and `rand` reads floats and
    /// bools from the high bits.
    fn next_u32(&mut self) -> u32 {
        let hi = (self.next_state() >> 15) as u32;
        let lo = (self.next_state() >> 15) as u32;
        (hi << 16) | lo
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SeededRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(i64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as i64)
    }
}
