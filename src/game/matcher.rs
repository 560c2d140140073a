//! Match Detection
//!
//! Two independent linear scans (rows, then columns) mark every cell that
//! belongs to a run of three or more equal tiles. Empty cells never match.

use crate::game::board::Board;

/// Shortest run that counts as a match.
pub const MIN_RUN: usize = 3;

/// Parallel boolean grid of matched cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchMask {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl MatchMask {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// Is (row, col) part of a match?
    #[inline]
    pub fn is_marked(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row * self.cols + col]
    }

    #[inline]
    fn mark(&mut self, row: usize, col: usize) {
        self.cells[row * self.cols + col] = true;
    }

    /// True if any cell is marked.
    pub fn any(&self) -> bool {
        self.cells.iter().any(|&c| c)
    }

    /// Number of marked cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Row-major marks.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }
}

/// Scan `board` and mark every cell in a run of [`MIN_RUN`] or more.
pub fn find_matches(board: &Board) -> MatchMask {
    let rows = board.rows();
    let cols = board.cols();
    let mut mask = MatchMask::new(rows, cols);

    for row in 0..rows {
        scan_line(cols, |i| board.get(row, i), |i| mask.mark(row, i));
    }
    for col in 0..cols {
        scan_line(rows, |i| board.get(i, col), |i| mask.mark(i, col));
    }

    mask
}

/// Walk one line of `len` cells, calling `mark` for every cell in a run.
fn scan_line<G, M>(len: usize, get: G, mut mark: M)
where
    G: Fn(usize) -> Option<u8>,
    M: FnMut(usize),
{
    let mut run_start = 0;
    for i in 1..=len {
        let continues = i < len && get(i).is_some() && get(i) == get(i - 1);
        if !continues {
            if i - run_start >= MIN_RUN {
                (run_start..i).for_each(&mut mark);
            }
            run_start = i;
        }
    }
}
