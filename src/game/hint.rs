//! Move Hints
//!
//! Lists swaps that would score on a board. Used for client hints, dead
//! board detection, and to drive demos and benchmarks with real moves.

use crate::game::board::Board;
use crate::game::matcher::find_matches;
use crate::game::moves::Move;

/// Every adjacent swap that creates at least one match.
///
/// Candidates are each cell paired with its right then lower neighbour,
/// in row-major order. The board is not modified.
pub fn legal_swaps(board: &Board) -> Vec<Move> {
    let mut scratch = board.clone();
    let mut swaps = Vec::new();

    for row in 0..board.rows() {
        for col in 0..board.cols() {
            let neighbours = [(row, col + 1), (row + 1, col)];
            for (r2, c2) in neighbours {
                if r2 >= board.rows() || c2 >= board.cols() {
                    continue;
                }
                if board.get(row, col) == board.get(r2, c2) {
                    continue;
                }

                scratch.swap((row, col), (r2, c2));
                if find_matches(&scratch).any() {
                    swaps.push(Move::swap(
                        (row as i32, col as i32),
                        (r2 as i32, c2 as i32),
                    ));
                }
                scratch.swap((row, col), (r2, c2));
            }
        }
    }

    swaps
}

/// True when at least one scoring swap exists.
pub fn has_legal_swap(board: &Board) -> bool {
    !legal_swaps(board).is_empty()
}
