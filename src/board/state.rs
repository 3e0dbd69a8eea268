//! Board representation.
//!
//! Holds the square grid of tile values. Cells are stored row-major; `0`
//! marks an empty cell and every other value is a power of two between 2
//! and [`MAX_TILE`].

use std::fmt;

/// Errors raised while constructing a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board size must be at least 2, got {0}")]
    InvalidSize(usize),

    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("cell ({row}, {col}) holds {value}, which is not a power of two in 2..=2^30")]
    InvalidTile { row: usize, col: usize, value: u32 },
}

/// Largest tile a board may hold. Two of them never merge, so every merge
/// result fits in a `u32`.
pub const MAX_TILE: u32 = 1 << 30;

/// Returns true if `value` may appear on the board (empty or a power of two
/// in `2..=MAX_TILE`).
pub const fn is_valid_tile(value: u32) -> bool {
    value == 0 || (value >= 2 && value <= MAX_TILE && value.is_power_of_two())
}

/// Returns true if two equal tiles of `value` combine when slid together.
#[inline]
pub(crate) const fn can_merge(value: u32) -> bool {
    value != 0 && value < MAX_TILE
}

/// An `N x N` grid of tile values.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    pub(crate) size: usize,
    pub(crate) cells: Vec<u32>,
}

impl Board {
    /// Creates an empty board of the given size. Sizes below 2 are rejected.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if size <= 1 {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Board {
            size,
            cells: vec![0; size * size],
        })
    }

    /// Builds a board from explicit rows. The row count defines the size.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, BoardError> {
        let mut board = Board::new(rows.len())?;
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != board.size {
                return Err(BoardError::RaggedRow {
                    row: r,
                    expected: board.size,
                    got: row.len(),
                });
            }
            for (c, &value) in row.iter().enumerate() {
                if !is_valid_tile(value) {
                    return Err(BoardError::InvalidTile { row: r, col: c, value });
                }
                board.cells[r * board.size + c] = value;
            }
        }
        Ok(board)
    }

    /// Side length of the board.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major view of all cells.
    #[inline]
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Value at `(row, col)`, or `None` if out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if row < self.size && col < self.size {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    /// Writes a value into a cell. Returns false if the position is out of
    /// range or the value is not a legal tile.
    pub fn set(&mut self, row: usize, col: usize, value: u32) -> bool {
        if row >= self.size || col >= self.size || !is_valid_tile(value) {
            return false;
        }
        self.cells[row * self.size + col] = value;
        true
    }

    /// Copies the grid out as nested rows.
    pub fn rows(&self) -> Vec<Vec<u32>> {
        self.cells.chunks(self.size).map(|r| r.to_vec()).collect()
    }

    /// Resets every cell to empty.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = 0);
    }

    /// Positions of all empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 0)
            .map(|(i, _)| (i / self.size, i % self.size))
            .collect()
    }

    /// True if no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&v| v != 0)
    }

    /// True if some horizontally or vertically adjacent pair of cells holds
    /// equal values that can merge.
    pub fn has_adjacent_pair(&self) -> bool {
        let n = self.size;
        for r in 0..n {
            for c in 0..n {
                let v = self.cells[r * n + c];
                if !can_merge(v) {
                    continue;
                }
                if c + 1 < n && self.cells[r * n + c + 1] == v {
                    return true;
                }
                if r + 1 < n && self.cells[(r + 1) * n + c] == v {
                    return true;
                }
            }
        }
        false
    }

    /// True if the board is full and nothing can merge: no move can change it.
    pub fn is_stuck(&self) -> bool {
        self.is_full() && !self.has_adjacent_pair()
    }

    /// Sum of all tile values.
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().map(|&v| v as u64).sum()
    }

    /// Largest tile on the board (0 when empty).
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("size", &self.size)
            .field("rows", &self.rows())
            .finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.max_tile().max(1).to_string().len();
        for (r, row) in self.cells.chunks(self.size).enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for (c, &v) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, " ")?;
                }
                if v == 0 {
                    write!(f, "{:>width$}", ".", width = width)?;
                } else {
                    write!(f, "{:>width$}", v, width = width)?;
                }
            }
        }
        Ok(())
    }
}
