//! Core deterministic primitives.
//!
//! Everything in this module is bit-exact across platforms. A client that
//! implements the same seed hash and generator derives the same boards.

pub mod rng;
pub mod hash;

// Re-export core types
pub use rng::{DeterministicRng, seed_hash};
pub use hash::{StateHash, StateHasher};
