//! Tile Board
//!
//! A fixed `rows x cols` grid stored row-major. A cell is `None` only while a
//! cascade pass is between clearing and refilling; every board handed out
//! of the engine is fully resolved.

use std::fmt;
use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::hash::{StateHash, StateHasher};
use crate::core::rng::DeterministicRng;
use crate::game::level::LevelSpec;
use crate::game::matcher::MatchMask;

/// A tile colour index in `[0, color_count)`.
pub type Tile = u8;

/// Marker byte hashed for an empty cell. At most 255 colours exist, so
/// index 255 is never drawn.
const EMPTY_HASH_MARKER: u8 = 0xFF;

/// Board data that does not describe a grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Rows or columns is zero.
    #[error("Board dimensions must be positive (got {rows}x{cols})")]
    EmptyBoard {
        /// Stated rows.
        rows: usize,
        /// Stated columns.
        cols: usize,
    },

    /// Cell count disagrees with the stated dimensions.
    #[error("Board {rows}x{cols} cannot hold {cells} cells")]
    CellCountMismatch {
        /// Stated rows.
        rows: usize,
        /// Stated columns.
        cols: usize,
        /// Cells supplied.
        cells: usize,
    },
}

/// Grid of tiles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardShape")]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Tile>>,
}

/// Unchecked board fields, as they arrive from stored reports.
#[derive(Deserialize)]
struct BoardShape {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Tile>>,
}

impl TryFrom<BoardShape> for Board {
    type Error = BoardError;

    fn try_from(shape: BoardShape) -> Result<Self, Self::Error> {
        let BoardShape { rows, cols, cells } = shape;
        if rows == 0 || cols == 0 {
            return Err(BoardError::EmptyBoard { rows, cols });
        }
        if rows.checked_mul(cols) != Some(cells.len()) {
            return Err(BoardError::CellCountMismatch { rows, cols, cells: cells.len() });
        }
        Ok(Self { rows, cols, cells })
    }
}

impl Board {
    /// Create a board with every cell empty.
    pub(crate) fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Build a resolved board from nested rows.
    ///
    /// Returns `None` for an empty or ragged input.
    pub fn from_rows(rows: &[Vec<Tile>]) -> Option<Self> {
        let cols = rows.first()?.len();
        if cols == 0 || rows.iter().any(|r| r.len() != cols) {
            return None;
        }
        let cells = rows.iter().flatten().map(|&t| Some(t)).collect();
        Some(Self { rows: rows.len(), cols, cells })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Tile at a cell, `None` if empty or out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        if row < self.rows && col < self.cols {
            self.cells[self.index(row, col)]
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, tile: Option<Tile>) {
        let idx = self.index(row, col);
        self.cells[idx] = tile;
    }

    /// Swap two in-bounds cells.
    pub(crate) fn swap(&mut self, a: (usize, usize), b: (usize, usize)) {
        let ia = self.index(a.0, a.1);
        let ib = self.index(b.0, b.1);
        self.cells.swap(ia, ib);
    }

    /// True when no cell is empty.
    pub fn is_resolved(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Nested row view of a resolved board, `None` if any cell is empty.
    pub fn to_rows(&self) -> Option<Vec<Vec<Tile>>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().copied().collect::<Option<Vec<Tile>>>())
            .collect()
    }

    /// Empty every cell marked in `mask`, returning how many were cleared.
    pub(crate) fn clear(&mut self, mask: &MatchMask) -> u32 {
        let mut cleared = 0;
        for (cell, &marked) in self.cells.iter_mut().zip(mask.cells()) {
            if marked && cell.is_some() {
                *cell = None;
                cleared += 1;
            }
        }
        cleared
    }

    /// Compact each column downward, keeping relative order.
    ///
    /// Empty cells end up at the top of their column.
    pub(crate) fn apply_gravity(&mut self) {
        for col in 0..self.cols {
            let mut write = self.rows;
            for row in (0..self.rows).rev() {
                if let Some(tile) = self.get(row, col) {
                    write -= 1;
                    if write != row {
                        self.set(write, col, Some(tile));
                        self.set(row, col, None);
                    }
                }
            }
        }
    }

    /// Fill every empty cell with a fresh draw, row-major.
    ///
    /// No anti-match constraint applies here; the cascade resolves any
    /// runs the refill creates.
    pub(crate) fn refill(&mut self, rng: &mut DeterministicRng, color_count: u8) -> u32 {
        let mut filled = 0;
        for cell in self.cells.iter_mut().filter(|c| c.is_none()) {
            *cell = Some(rng.next_index(color_count as u32) as Tile);
            filled += 1;
        }
        filled
    }

    /// Compute a deterministic fingerprint of the board.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_board();
        hasher.update_u32(self.rows as u32);
        hasher.update_u32(self.cols as u32);
        for cell in &self.cells {
            hasher.update_u8(cell.unwrap_or(EMPTY_HASH_MARKER));
        }
        hasher.finalize()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.cols).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                match cell {
                    Some(tile) => write!(f, "{}", tile)?,
                    None => write!(f, ".")?,
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// GENERATION
// =============================================================================

/// Build the initial board for a level.
///
/// Deterministic: the same level always yields the same grid. No horizontal
/// or vertical run of three exists on the result.
pub fn generate_board(spec: &LevelSpec) -> Board {
    generate_with_rng(spec).0
}

/// Build the initial board and hand back the generator that built it.
///
/// Cascade refills continue from the returned stream.
pub(crate) fn generate_with_rng(spec: &LevelSpec) -> (Board, DeterministicRng) {
    let mut rng = DeterministicRng::from_seed_str(spec.seed());
    let mut board = Board::empty(spec.rows(), spec.cols());
    let colors = spec.color_count() as u32;

    for row in 0..spec.rows() {
        for col in 0..spec.cols() {
            // colour_count >= 3 always leaves at least one acceptable draw
            let tile = loop {
                let candidate = rng.next_index(colors) as Tile;
                if !completes_run(&board, row, col, candidate) {
                    break candidate;
                }
            };
            board.set(row, col, Some(tile));
        }
    }

    (board, rng)
}

/// Would placing `tile` at (row, col) make a third equal tile in a row,
/// looking left and up only?
fn completes_run(board: &Board, row: usize, col: usize, tile: Tile) -> bool {
    let left = col >= 2
        && board.get(row, col - 1) == Some(tile)
        && board.get(row, col - 2) == Some(tile);
    let up = row >= 2
        && board.get(row - 1, col) == Some(tile)
        && board.get(row - 2, col) == Some(tile);
    left || up
}

// =============================================================================
// TESTS
// =============================================================================
