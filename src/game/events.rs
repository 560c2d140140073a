//! Simulation Events
//!
//! Events generated while folding over a move list, for replay inspection
//! and anti-cheat analysis. They never influence the score.

use serde::{Serialize, Deserialize};
use crate::game::moves::RejectReason;

/// Something that happened during a simulation.
///
/// `index` and `move_index` are positions in the submitted move list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimEvent {
    /// The list was longer than the move cap; the tail was dropped.
    MovesTruncated {
        /// Moves submitted.
        submitted: usize,
        /// Moves kept.
        processed: usize,
    },

    /// Move skipped before touching the board.
    MoveRejected {
        /// Position in the move list.
        index: usize,
        /// Failed check.
        reason: RejectReason,
    },

    /// Swap produced no match and was undone.
    MoveReverted {
        /// Position in the move list.
        index: usize,
    },

    /// Swap produced a match and counts toward `moves_applied`.
    MoveApplied {
        /// Position in the move list.
        index: usize,
    },

    /// One clear, gravity and refill pass.
    ComboResolved {
        /// Move that started the cascade.
        move_index: usize,
        /// 1-based pass number within this move's cascade.
        combo: u32,
        /// Tiles cleared by this pass.
        cleared: u32,
        /// Points awarded by this pass.
        points: u64,
    },

    /// The cascade stopped at the pass ceiling with matches left.
    CascadeLimitReached {
        /// Move whose cascade was cut short.
        move_index: usize,
    },
}

impl SimEvent {
    /// Move-list position this event refers to, if any.
    pub fn move_index(&self) -> Option<usize> {
        match self {
            Self::MovesTruncated { .. } => None,
            Self::MoveRejected { index, .. }
            | Self::MoveReverted { index }
            | Self::MoveApplied { index } => Some(*index),
            Self::ComboResolved { move_index, .. }
            | Self::CascadeLimitReached { move_index } => Some(*move_index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_index() {
        assert_eq!(SimEvent::MoveApplied { index: 4 }.move_index(), Some(4));
        assert_eq!(
            SimEvent::ComboResolved { move_index: 2, combo: 1, cleared: 3, points: 30 }.move_index(),
            Some(2)
        );
        assert_eq!(SimEvent::MovesTruncated { submitted: 40, processed: 30 }.move_index(), None);
    }

    #[test]
    fn test_json_shape() {
        let event = SimEvent::MoveRejected { index: 1, reason: RejectReason::NotAdjacent };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "move_rejected");
        assert_eq!(json["reason"], "not_adjacent");
    }
}
