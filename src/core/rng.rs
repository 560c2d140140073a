//! Deterministic Random Number Generator
//!
//! Uses the Mulberry32 algorithm seeded from a djb2 hash of the session seed.
//! Given the same seed string, produces an identical sequence on all platforms
//! and in every client that implements the same two functions.

use serde::{Serialize, Deserialize};

/// Initial accumulator for [`seed_hash`].
pub const SEED_HASH_INIT: u32 = 5381;

/// Per-draw state increment for Mulberry32.
const MULBERRY_INCREMENT: u32 = 0x6D2B_79F5;

/// 2^32 as a float, the divisor for [`DeterministicRng::next_f64`].
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Hash an opaque session seed into a 32-bit generator state (djb2).
///
/// Every byte of the UTF-8 encoding is folded in with `acc * 33 + byte`,
/// wrapping at 32 bits. The empty string hashes to [`SEED_HASH_INIT`].
///
/// ```
/// use tile_match::core::rng::seed_hash;
///
/// assert_eq!(seed_hash(""), 5381);
/// assert_eq!(seed_hash("abc"), 193485963);
/// ```
pub fn seed_hash(seed: &str) -> u32 {
    seed.bytes().fold(SEED_HASH_INIT, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(byte as u32)
    })
}

/// Deterministic PRNG using the Mulberry32 algorithm.
///
/// # Determinism Guarantee
///
/// Given the same state, this RNG produces the exact same sequence on any
/// platform. The bit-level construction must never change: clients derive
/// the same boards and refills from the same seed.
///
/// Zero is a valid state.
///
/// # Example
///
/// ```
/// use tile_match::core::rng::DeterministicRng;
///
/// let mut rng = DeterministicRng::new(0);
/// assert_eq!(rng.next_u32(), 1144304738); // Always the same!
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeterministicRng {
    state: u32,
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl DeterministicRng {
    /// Create a new RNG from a raw 32-bit state.
    pub const fn new(state: u32) -> Self {
        Self { state }
    }

    /// Create an RNG from a session seed string via [`seed_hash`].
    pub fn from_seed_str(seed: &str) -> Self {
        Self::new(seed_hash(seed))
    }

    /// Generate the next 32-bit random value.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        let mut x = self.state;
        x = (x ^ (x >> 15)).wrapping_mul(x | 1);
        x ^= x.wrapping_add((x ^ (x >> 7)).wrapping_mul(x | 61));
        x ^ (x >> 14)
    }

    /// Generate a float in [0, 1).
    ///
    /// Exactly `next_u32() / 2^32`; the division is by a power of two and
    /// loses no precision.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / TWO_POW_32
    }

    /// Generate an index in [0, n).
    ///
    /// Equal to `floor(next_f64() * n)`, computed in integer arithmetic so
    /// no rounding mode can disturb it.
    #[inline]
    pub fn next_index(&mut self, n: u32) -> u32 {
        ((self.next_u32() as u64 * n as u64) >> 32) as u32
    }

    /// Get current state (for checkpointing/debugging).
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Restore from saved state.
    pub fn set_state(&mut self, state: u32) {
        self.state = state;
    }
}

// =============================================================================
// TESTS
// =============================================================================
