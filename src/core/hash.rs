//! Board Hashing for Verification
//!
//! Provides deterministic hashing of board state for:
//! - Integrity checks between client and server
//! - Session transcripts
//! - Replay validation

use sha2::{Sha256, Digest};

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher for engine state.
///
/// Wraps SHA-256 with typed update helpers.
/// Order of updates is critical for determinism.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for board contents.
    pub fn for_board() -> Self {
        Self::new(b"TILE_MATCH_BOARD_V1")
    }

    /// Create hasher for a move list.
    pub fn for_moves() -> Self {
        Self::new(b"TILE_MATCH_MOVES_V1")
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an i32 value (little-endian).
    #[inline]
    pub fn update_i32(&mut self, value: i32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a length-prefixed string.
    #[inline]
    pub fn update_str(&mut self, value: &str) {
        self.update_u32(value.len() as u32);
        self.hasher.update(value.as_bytes());
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Short hex prefix of a hash, for log lines.
pub fn short_hex(hash: &StateHash) -> String {
    hex::encode(&hash[..8])
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_hasher_determinism() {
        let make_hash = || {
            let mut hasher = StateHasher::for_board();
            hasher.update_u32(6);
            hasher.update_u32(6);
            hasher.update_u8(3);
            hasher.update_str("L1");
            hasher.finalize()
        };

        assert_eq!(make_hash(), make_hash());
    }

    #[test]
    fn test_hash_order_matters() {
        let hash1 = {
            let mut h = StateHasher::new(b"test");
            h.update_u32(1);
            h.update_u32(2);
            h.finalize()
        };

        let hash2 = {
            let mut h = StateHasher::new(b"test");
            h.update_u32(2);
            h.update_u32(1);
            h.finalize()
        };

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_domain_separation() {
        let hash_in = |domain: &[u8]| {
            let mut h = StateHasher::new(domain);
            h.update_u32(1234);
            h.finalize()
        };

        let hash1 = hash_in(b"DOMAIN_A");
        let hash2 = hash_in(b"DOMAIN_B");

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_str_is_length_prefixed() {
        let hash1 = {
            let mut h = StateHasher::for_moves();
            h.update_str("ab");
            h.update_str("c");
            h.finalize()
        };
        let hash2 = {
            let mut h = StateHasher::for_moves();
            h.update_str("a");
            h.update_str("bc");
            h.finalize()
        };

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_short_hex() {
        let hash = [0xABu8; 32];
        assert_eq!(short_hex(&hash), "abababababababab");
    }
}
