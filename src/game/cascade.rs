//! Cascade Resolution
//!
//! After a successful swap the board is drained pass by pass:
//! detect, clear, score, gravity, refill, repeat until no run remains.
//! Refills continue the same generator that built the board.

use serde::{Serialize, Deserialize};
use tracing::trace;

use crate::core::rng::DeterministicRng;
use crate::game::board::Board;
use crate::game::matcher::find_matches;

/// Flat points per cleared tile.
pub const POINTS_PER_TILE: u64 = 10;

/// Highest combo multiplier.
pub const MAX_COMBO_MULTIPLIER: u64 = 5;

/// Score multiplier for the `combo`-th pass of a cascade (1-based).
///
/// `min(1 + combo / 2, 5)`.
#[inline]
pub fn combo_multiplier(combo: u32) -> u64 {
    (1 + combo as u64 / 2).min(MAX_COMBO_MULTIPLIER)
}

/// Points for clearing `cleared` tiles on the `combo`-th pass.
#[inline]
pub fn combo_points(cleared: u32, combo: u32) -> u64 {
    cleared as u64 * POINTS_PER_TILE * combo_multiplier(combo)
}

/// One clear/gravity/refill pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboPass {
    /// 1-based pass number.
    pub combo: u32,
    /// Tiles cleared.
    pub cleared: u32,
    /// Points awarded.
    pub points: u64,
}

/// Totals for one cascade.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeOutcome {
    /// Tiles cleared across all passes.
    pub cleared: u32,
    /// Passes that cleared at least one tile.
    pub combos: u32,
    /// Points across all passes.
    pub score: u64,
    /// Per-pass breakdown.
    pub passes: Vec<ComboPass>,
    /// The pass ceiling stopped the cascade with matches still on the board.
    pub limit_reached: bool,
}

/// Drain every match on `board`.
///
/// Stops when a scan finds nothing, or after `max_passes` passes. A board
/// with no match yields an empty outcome and is left untouched.
pub fn resolve_cascade(
    board: &mut Board,
    rng: &mut DeterministicRng,
    color_count: u8,
    max_passes: u32,
) -> CascadeOutcome {
    let mut outcome = CascadeOutcome::default();

    loop {
        let mask = find_matches(board);
        if !mask.any() {
            break;
        }
        if outcome.combos >= max_passes {
            outcome.limit_reached = true;
            break;
        }

        let cleared = board.clear(&mask);
        outcome.combos += 1;
        let points = combo_points(cleared, outcome.combos);

        outcome.cleared += cleared;
        outcome.score += points;
        outcome.passes.push(ComboPass {
            combo: outcome.combos,
            cleared,
            points,
        });

        board.apply_gravity();
        board.refill(rng, color_count);

        trace!(combo = outcome.combos, cleared, points, "combo pass resolved");
        #[cfg(feature = "debug-tracing")]
        trace!("board after pass {}:\n{}", outcome.combos, board);
    }

    outcome
}
