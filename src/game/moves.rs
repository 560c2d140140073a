//! Player Moves
//!
//! Moves come from the client and are untrusted. Validation never fails the
//! simulation: a bad move is reported as a [`RejectReason`] and skipped.

use std::fmt;
use serde::{Serialize, Deserialize};

/// Client-supplied cell coordinate.
///
/// Signed so that negative input survives decoding and is rejected as out
/// of bounds rather than failing to parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Row index (0 = top).
    pub row: i32,
    /// Column index (0 = left).
    pub col: i32,
}

impl Coord {
    /// Create a coordinate.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another coordinate.
    pub fn manhattan(self, other: Coord) -> u64 {
        let dr = (self.row as i64 - other.row as i64).unsigned_abs();
        let dc = (self.col as i64 - other.col as i64).unsigned_abs();
        dr + dc
    }

    /// Convert to board indices if inside `rows x cols`.
    pub fn to_index(self, rows: usize, cols: usize) -> Option<(usize, usize)> {
        let row = usize::try_from(self.row).ok()?;
        let col = usize::try_from(self.col).ok()?;
        (row < rows && col < cols).then_some((row, col))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A single player move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Move {
    /// Swap two orthogonally adjacent tiles.
    Swap {
        /// First cell.
        from: Coord,
        /// Second cell.
        to: Coord,
    },

    /// A move type this engine does not understand. Kept in place so list
    /// positions (and therefore the move cap) match what the client sent.
    Unsupported {
        /// The type tag the client used, if any.
        kind: String,
    },
}

impl Move {
    /// Convenience constructor for a swap.
    pub fn swap(from: (i32, i32), to: (i32, i32)) -> Self {
        Move::Swap {
            from: Coord::new(from.0, from.1),
            to: Coord::new(to.0, to.1),
        }
    }
}

/// Why a move was skipped before touching the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Unknown move variant.
    Unsupported,
    /// The two cells are not orthogonal neighbours.
    NotAdjacent,
    /// A cell lies outside the board.
    OutOfBounds,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => write!(f, "unsupported move type"),
            Self::NotAdjacent => write!(f, "cells are not adjacent"),
            Self::OutOfBounds => write!(f, "cell out of bounds"),
        }
    }
}

/// Board indices of a swap that passed validation.
pub type ValidSwap = ((usize, usize), (usize, usize));

/// Check a move against a `rows x cols` board.
///
/// Checks run in order: variant, adjacency, bounds.
pub fn validate(mv: &Move, rows: usize, cols: usize) -> Result<ValidSwap, RejectReason> {
    let (from, to) = match mv {
        Move::Swap { from, to } => (*from, *to),
        Move::Unsupported { .. } => return Err(RejectReason::Unsupported),
    };

    if from.manhattan(to) != 1 {
        return Err(RejectReason::NotAdjacent);
    }

    match (from.to_index(rows, cols), to.to_index(rows, cols)) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(RejectReason::OutOfBounds),
    }
}
