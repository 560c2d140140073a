//! Authoritative Simulation
//!
//! Folds a client move list over a freshly generated board and computes the
//! score the server trusts. The client's own score is never an input.
//!
//! # Determinism
//!
//! One call owns one board and one generator. Identical inputs give
//! bit-identical results on every platform and in every thread.

use serde::{Serialize, Deserialize};
use tracing::{debug, instrument, warn};

use crate::config::EngineConfig;
use crate::core::hash::{short_hex, StateHash};
use crate::game::board::{generate_with_rng, Board};
use crate::game::cascade::resolve_cascade;
use crate::game::events::SimEvent;
use crate::game::level::LevelSpec;
use crate::game::matcher::find_matches;
use crate::game::moves::{validate, Move};

/// Outcome of one simulation, the only value that leaves the core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Authoritative score.
    pub score: u64,
    /// Combo passes across all applied moves.
    pub total_combos: u32,
    /// Moves that produced a match.
    pub moves_applied: u32,
}

/// Full record of a simulation, for transcripts and diagnostics.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Score, combos and applied moves.
    pub result: SimulationResult,
    /// Fingerprint of the generated board.
    pub initial_board_hash: StateHash,
    /// Fingerprint of the board after the last move.
    pub final_board_hash: StateHash,
    /// Board after the last move.
    pub final_board: Board,
    /// What happened, in order.
    pub events: Vec<SimEvent>,
}

/// Simulate a move list and return the authoritative result.
///
/// Only the first `max_moves` entries are considered.
pub fn simulate(spec: &LevelSpec, moves: &[Move], max_moves: usize) -> SimulationResult {
    simulate_with(spec, moves, &EngineConfig::with_max_moves(max_moves)).result
}

/// Simulate a move list and keep the full report.
#[instrument(skip(spec, moves), fields(level = spec.level_id(), moves = moves.len()))]
pub fn simulate_with(spec: &LevelSpec, moves: &[Move], config: &EngineConfig) -> SimulationReport {
    let (mut board, mut rng) = generate_with_rng(spec);
    let initial_board_hash = board.compute_hash();

    let mut result = SimulationResult::default();
    let mut events = Vec::new();

    let processed = moves.len().min(config.max_moves);
    if processed < moves.len() {
        debug!(submitted = moves.len(), processed, "move list truncated");
        events.push(SimEvent::MovesTruncated {
            submitted: moves.len(),
            processed,
        });
    }

    for (index, mv) in moves[..processed].iter().enumerate() {
        let (a, b) = match validate(mv, board.rows(), board.cols()) {
            Ok(cells) => cells,
            Err(reason) => {
                debug!(index, %reason, "move rejected");
                events.push(SimEvent::MoveRejected { index, reason });
                continue;
            }
        };

        board.swap(a, b);
        if !find_matches(&board).any() {
            board.swap(a, b);
            debug!(index, "swap made no match, reverted");
            events.push(SimEvent::MoveReverted { index });
            continue;
        }

        result.moves_applied += 1;
        events.push(SimEvent::MoveApplied { index });

        let cascade = resolve_cascade(
            &mut board,
            &mut rng,
            spec.color_count(),
            config.max_cascade_passes,
        );

        result.score += cascade.score;
        result.total_combos += cascade.combos;
        events.extend(cascade.passes.iter().map(|pass| SimEvent::ComboResolved {
            move_index: index,
            combo: pass.combo,
            cleared: pass.cleared,
            points: pass.points,
        }));

        if cascade.limit_reached {
            warn!(index, passes = cascade.combos, "cascade pass ceiling reached");
            events.push(SimEvent::CascadeLimitReached { move_index: index });
        }
    }

    let final_board_hash = board.compute_hash();
    debug!(
        score = result.score,
        combos = result.total_combos,
        applied = result.moves_applied,
        final_hash = %short_hex(&final_board_hash),
        "simulation complete"
    );

    SimulationReport {
        result,
        initial_board_hash,
        final_board_hash,
        final_board: board,
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::generate_board;
    use crate::game::moves::RejectReason;

    fn abc_spec() -> LevelSpec {
        LevelSpec::new("L1", "abc", 6, 6, 5).unwrap()
    }

    #[test]
    fn test_empty_move_list() {
        let report = simulate_with(&abc_spec(), &[], &EngineConfig::default());
        assert_eq!(report.result, SimulationResult::default());
        assert_eq!(report.initial_board_hash, report.final_board_hash);
        assert!(report.events.is_empty());
    }

    #[test]
    fn test_single_match_known_result() {
        let moves = [Move::swap((2, 1), (2, 2))];
        let result = simulate(&abc_spec(), &moves, 30);
        assert_eq!(result, SimulationResult { score: 30, total_combos: 1, moves_applied: 1 });
    }

    #[test]
    fn test_two_combo_cascade_known_result() {
        let moves = [Move::swap((1, 4), (2, 4))];
        let result = simulate(&abc_spec(), &moves, 30);
        assert_eq!(result, SimulationResult { score: 90, total_combos: 2, moves_applied: 1 });
    }

    #[test]
    fn test_mixed_move_list_known_result() {
        let moves = [
            Move::swap((2, 1), (2, 2)),
            Move::swap((2, 2), (2, 3)),
            Move::swap((0, 0), (0, 2)),
            Move::swap((3, 3), (4, 3)),
        ];
        let report = simulate_with(&abc_spec(), &moves, &EngineConfig::default());
        assert_eq!(
            report.result,
            SimulationResult { score: 120, total_combos: 3, moves_applied: 2 }
        );
        assert!(report.events.contains(&SimEvent::MoveRejected {
            index: 2,
            reason: RejectReason::NotAdjacent,
        }));
        assert_eq!(
            report.final_board.to_rows().unwrap(),
            vec![
                vec![0, 3, 1, 1, 2, 4],
                vec![0, 2, 3, 1, 3, 1],
                vec![3, 0, 1, 0, 2, 0],
                vec![4, 1, 0, 4, 1, 1],
                vec![0, 2, 1, 1, 4, 4],
                vec![0, 2, 0, 4, 1, 0],
            ]
        );
    }

    #[test]
    fn test_reverted_swap_leaves_board_unchanged() {
        let spec = abc_spec();
        let moves = [Move::swap((2, 2), (2, 3))];
        let report = simulate_with(&spec, &moves, &EngineConfig::default());

        assert_eq!(report.result.moves_applied, 0);
        assert_eq!(report.result.score, 0);
        assert_eq!(report.final_board, generate_board(&spec));
        assert_eq!(report.events, vec![SimEvent::MoveReverted { index: 0 }]);
    }

    #[test]
    fn test_unsupported_move_skipped() {
        let moves = [
            Move::Unsupported { kind: "bomb".to_string() },
            Move::swap((2, 1), (2, 2)),
        ];
        let report = simulate_with(&abc_spec(), &moves, &EngineConfig::default());
        assert_eq!(report.result.moves_applied, 1);
        assert_eq!(
            report.events[0],
            SimEvent::MoveRejected { index: 0, reason: RejectReason::Unsupported }
        );
    }

    #[test]
    fn test_truncation_drops_tail() {
        let moves = [
            Move::swap((2, 2), (2, 3)),
            Move::swap((2, 1), (2, 2)),
        ];
        let report = simulate_with(&abc_spec(), &moves, &EngineConfig::with_max_moves(1));
        assert_eq!(report.result.moves_applied, 0);
        assert_eq!(
            report.events[0],
            SimEvent::MovesTruncated { submitted: 2, processed: 1 }
        );
    }

    #[test]
    fn test_zero_move_cap() {
        let moves = [Move::swap((2, 1), (2, 2))];
        assert_eq!(simulate(&abc_spec(), &moves, 0), SimulationResult::default());
    }

    #[test]
    fn test_final_board_resolved_and_match_free() {
        let moves = [
            Move::swap((1, 4), (2, 4)),
            Move::swap((2, 1), (2, 2)),
            Move::swap((3, 3), (4, 3)),
        ];
        let report = simulate_with(&abc_spec(), &moves, &EngineConfig::default());
        assert!(report.final_board.is_resolved());
        assert!(!find_matches(&report.final_board).any());
    }

    #[test]
    fn test_combo_events_sum_to_score() {
        let moves = [Move::swap((1, 4), (2, 4))];
        let report = simulate_with(&abc_spec(), &moves, &EngineConfig::default());
        let points: u64 = report.events.iter().filter_map(|e| match e {
            SimEvent::ComboResolved { points, .. } => Some(*points),
            _ => None,
        }).sum();
        assert_eq!(points, report.result.score);
    }

    #[test]
    fn test_cascade_ceiling_keeps_partial_score() {
        let config = EngineConfig { max_moves: 30, max_cascade_passes: 1 };
        let moves = [Move::swap((1, 4), (2, 4)), Move::swap((0, 0), (0, 1))];
        let report = simulate_with(&abc_spec(), &moves, &config);

        assert_eq!(
            report.result,
            SimulationResult { score: 30, total_combos: 1, moves_applied: 1 }
        );
        assert_eq!(
            report.events,
            vec![
                SimEvent::MoveApplied { index: 0 },
                SimEvent::ComboResolved { move_index: 0, combo: 1, cleared: 3, points: 30 },
                SimEvent::CascadeLimitReached { move_index: 0 },
                SimEvent::MoveReverted { index: 1 },
            ]
        );

        // Second pass never ran: the refilled top row still holds a run,
        // and the reverted swap leaves it in place
        assert!(report.final_board.is_resolved());
        assert_eq!(report.final_board.to_rows().unwrap()[0], vec![0, 3, 3, 3, 1, 0]);
        assert_eq!(find_matches(&report.final_board).count(), 3);
    }
}
