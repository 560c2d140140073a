//! Engine Configuration
//!
//! Defaults match the production scoring rules. Operators may tighten the
//! anti-abuse bounds through the environment.

use std::str::FromStr;

use crate::{DEFAULT_MAX_CASCADE_PASSES, DEFAULT_MAX_MOVES};

/// Environment variable overriding [`EngineConfig::max_moves`].
pub const ENV_MAX_MOVES: &str = "TILE_MATCH_MAX_MOVES";

/// Environment variable overriding [`EngineConfig::max_cascade_passes`].
pub const ENV_MAX_CASCADE_PASSES: &str = "TILE_MATCH_MAX_CASCADE_PASSES";

/// Lowest cascade ceiling accepted from the environment.
pub const MIN_CASCADE_PASSES: u32 = 1;

/// Simulation bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Moves beyond this many are discarded before processing.
    pub max_moves: usize,
    /// Safety ceiling on clear/gravity/refill passes per move.
    ///
    /// At 0 a scoring swap still applies but clears nothing.
    /// [`EngineConfig::from_env`] never produces a value below
    /// [`MIN_CASCADE_PASSES`].
    pub max_cascade_passes: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_moves: DEFAULT_MAX_MOVES,
            max_cascade_passes: DEFAULT_MAX_CASCADE_PASSES,
        }
    }
}

impl EngineConfig {
    /// Config with a specific move cap and the default pass ceiling.
    pub fn with_max_moves(max_moves: usize) -> Self {
        Self {
            max_moves,
            ..Self::default()
        }
    }

    /// Create config from environment variables.
    ///
    /// Missing or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from any key lookup, with the same rules as
    /// [`EngineConfig::from_env`].
    ///
    /// A cascade ceiling below [`MIN_CASCADE_PASSES`] is raised to it.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let max_cascade_passes =
            parse_or(lookup(ENV_MAX_CASCADE_PASSES), defaults.max_cascade_passes);
        Self {
            max_moves: parse_or(lookup(ENV_MAX_MOVES), defaults.max_moves),
            max_cascade_passes: max_cascade_passes.max(MIN_CASCADE_PASSES),
        }
    }
}

/// Parse an environment variable, falling back to `default`.
pub fn env_or<T: FromStr>(key: &str, default: T) -> T {
    parse_or(std::env::var(key).ok(), default)
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_moves, 30);
        assert_eq!(config.max_cascade_passes, 256);
    }

    #[test]
    fn test_with_max_moves() {
        let config = EngineConfig::with_max_moves(5);
        assert_eq!(config.max_moves, 5);
        assert_eq!(config.max_cascade_passes, DEFAULT_MAX_CASCADE_PASSES);
    }

    fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_env_or_fallback() {
        assert_eq!(env_or("TILE_MATCH_TEST_UNSET_VARIABLE", 17usize), 17);
    }

    #[test]
    fn test_env_or_reads_set_value() {
        std::env::set_var("TILE_MATCH_TEST_ENV_OR_SET", " 12 ");
        assert_eq!(env_or("TILE_MATCH_TEST_ENV_OR_SET", 0usize), 12);

        std::env::set_var("TILE_MATCH_TEST_ENV_OR_SET", "twelve");
        assert_eq!(env_or("TILE_MATCH_TEST_ENV_OR_SET", 5usize), 5);
        std::env::remove_var("TILE_MATCH_TEST_ENV_OR_SET");
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = EngineConfig::from_lookup(lookup(&[
            (ENV_MAX_MOVES, "45"),
            (ENV_MAX_CASCADE_PASSES, "12"),
        ]));
        assert_eq!(config, EngineConfig { max_moves: 45, max_cascade_passes: 12 });
    }

    #[test]
    fn test_from_lookup_bad_values_keep_defaults() {
        let config = EngineConfig::from_lookup(lookup(&[
            (ENV_MAX_MOVES, "-3"),
            (ENV_MAX_CASCADE_PASSES, "lots"),
        ]));
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_zero_cascade_ceiling_raised() {
        let config = EngineConfig::from_lookup(lookup(&[(ENV_MAX_CASCADE_PASSES, "0")]));
        assert_eq!(config.max_cascade_passes, MIN_CASCADE_PASSES);
        assert_eq!(config.max_moves, DEFAULT_MAX_MOVES);
    }

    #[test]
    fn test_zero_move_cap_allowed() {
        let config = EngineConfig::from_lookup(lookup(&[(ENV_MAX_MOVES, "0")]));
        assert_eq!(config.max_moves, 0);
    }
}
