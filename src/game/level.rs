//! Level Specification
//!
//! A `LevelSpec` fixes the deterministic universe of one session: the seed,
//! board dimensions and number of tile colours. It is validated once at
//! construction so the engine never runs with a configuration that could
//! divide by zero or reject draws forever.

use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Fewest tile colours that guarantee board generation terminates.
pub const MIN_COLOR_COUNT: u8 = 3;

/// Largest accepted row or column count.
pub const MAX_DIMENSION: usize = 64;

/// Configuration errors, raised when a level is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    /// Rows or columns is zero.
    #[error("Board dimensions must be positive (got {rows}x{cols})")]
    EmptyBoard {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
    },

    /// Rows or columns exceeds [`MAX_DIMENSION`].
    #[error("Board dimensions {rows}x{cols} exceed the {max}x{max} limit")]
    BoardTooLarge {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
        /// Largest accepted dimension.
        max: usize,
    },

    /// Fewer colours than [`MIN_COLOR_COUNT`].
    #[error("At least {min} tile colours are required (got {got})")]
    TooFewColors {
        /// Requested colour count.
        got: u8,
        /// Minimum colour count.
        min: u8,
    },
}

/// Immutable, validated description of one level instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LevelShape")]
pub struct LevelSpec {
    level_id: String,
    seed: String,
    rows: usize,
    cols: usize,
    color_count: u8,
}

/// Unvalidated level fields, as they arrive from request data.
#[derive(Clone, Debug, Deserialize)]
pub struct LevelShape {
    /// Level identifier.
    pub level_id: String,
    /// Opaque session seed.
    pub seed: String,
    /// Board rows.
    pub rows: usize,
    /// Board columns.
    pub cols: usize,
    /// Number of tile colours.
    pub color_count: u8,
}

impl TryFrom<LevelShape> for LevelSpec {
    type Error = LevelError;

    fn try_from(shape: LevelShape) -> Result<Self, Self::Error> {
        LevelSpec::new(shape.level_id, shape.seed, shape.rows, shape.cols, shape.color_count)
    }
}

impl LevelSpec {
    /// Validate and build a level.
    pub fn new(
        level_id: impl Into<String>,
        seed: impl Into<String>,
        rows: usize,
        cols: usize,
        color_count: u8,
    ) -> Result<Self, LevelError> {
        if rows == 0 || cols == 0 {
            return Err(LevelError::EmptyBoard { rows, cols });
        }
        if rows > MAX_DIMENSION || cols > MAX_DIMENSION {
            return Err(LevelError::BoardTooLarge { rows, cols, max: MAX_DIMENSION });
        }
        if color_count < MIN_COLOR_COUNT {
            return Err(LevelError::TooFewColors { got: color_count, min: MIN_COLOR_COUNT });
        }

        Ok(Self {
            level_id: level_id.into(),
            seed: seed.into(),
            rows,
            cols,
            color_count,
        })
    }

    /// Level identifier.
    pub fn level_id(&self) -> &str {
        &self.level_id
    }

    /// Opaque session seed.
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Board rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Board columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of tile colours.
    pub fn color_count(&self) -> u8 {
        self.color_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_level() {
        let spec = LevelSpec::new("L1", "abc", 6, 7, 5).unwrap();
        assert_eq!(spec.level_id(), "L1");
        assert_eq!(spec.seed(), "abc");
        assert_eq!(spec.rows(), 6);
        assert_eq!(spec.cols(), 7);
        assert_eq!(spec.color_count(), 5);
    }

    #[test]
    fn test_empty_seed_is_valid() {
        assert!(LevelSpec::new("L1", "", 3, 3, 3).is_ok());
    }

    #[test]
    fn test_rejects_too_few_colors() {
        for colors in 0..MIN_COLOR_COUNT {
            let err = LevelSpec::new("L1", "abc", 6, 6, colors).unwrap_err();
            assert_eq!(err, LevelError::TooFewColors { got: colors, min: 3 });
        }
    }

    #[test]
    fn test_rejects_empty_board() {
        assert!(matches!(
            LevelSpec::new("L1", "abc", 0, 6, 5),
            Err(LevelError::EmptyBoard { rows: 0, cols: 6 })
        ));
        assert!(matches!(
            LevelSpec::new("L1", "abc", 6, 0, 5),
            Err(LevelError::EmptyBoard { .. })
        ));
    }

    #[test]
    fn test_rejects_oversized_board() {
        assert!(matches!(
            LevelSpec::new("L1", "abc", MAX_DIMENSION + 1, 6, 5),
            Err(LevelError::BoardTooLarge { .. })
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: LevelSpec = serde_json::from_str(
            r#"{"level_id":"L1","seed":"abc","rows":6,"cols":6,"color_count":5}"#,
        ).unwrap();
        assert_eq!(ok.rows(), 6);

        let bad = serde_json::from_str::<LevelSpec>(
            r#"{"level_id":"L1","seed":"abc","rows":6,"cols":6,"color_count":2}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_serialize_round_trip_fields() {
        let spec = LevelSpec::new("L9", "seed", 4, 5, 6).unwrap();
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["level_id"], "L9");
        assert_eq!(json["color_count"], 6);
    }
}
