//! Rotation and the slide/merge algorithm.
//!
//! Only the upward slide is implemented. The other three directions rotate
//! the grid so their leading edge sits on top, slide up, and rotate back.

use super::direction::Direction;
use super::state::{can_merge, Board};

/// Result of one slide over the whole grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlideOutcome {
    /// Whether any cell changed value or position.
    pub moved: bool,
    /// Number of merges performed.
    pub merges: u32,
    /// Whether some merge produced exactly the winning tile.
    pub reached_win: bool,
}

impl Board {
    /// Rotates the grid clockwise in place by `turns` quarter turns.
    ///
    /// `turns` is taken mod 4. One turn moves cell `(r, c)` to `(c, n - 1 - r)`.
    pub fn rotate(&mut self, turns: u8) {
        let turns = turns % 4;
        if turns == 0 {
            return;
        }
        let n = self.size;
        let mut out = vec![0; self.cells.len()];
        for r in 0..n {
            for c in 0..n {
                let (dr, dc) = match turns {
                    1 => (c, n - 1 - r),
                    2 => (n - 1 - r, n - 1 - c),
                    _ => (n - 1 - c, r),
                };
                out[dr * n + dc] = self.cells[r * n + c];
            }
        }
        self.cells = out;
    }

    /// Returns a copy rotated clockwise by `turns` quarter turns.
    pub fn rotated(&self, turns: u8) -> Board {
        let mut copy = self.clone();
        copy.rotate(turns);
        copy
    }

    /// Slides every column toward row 0, merging equal neighbours once.
    ///
    /// Each column is compacted, scanned top to bottom merging each value with
    /// the next one when equal, then compacted again. A merged cell does not
    /// merge a second time in the same pass, so `[2, 2, 2, 2]` becomes
    /// `[4, 4, 0, 0]`. Pairs of `MAX_TILE` stay apart.
    pub fn slide_columns_up(&mut self, win_tile: u32) -> SlideOutcome {
        let n = self.size;
        let mut outcome = SlideOutcome::default();
        let mut column = vec![0u32; n];

        for c in 0..n {
            for (r, slot) in column.iter_mut().enumerate() {
                *slot = self.cells[r * n + c];
            }

            compact(&mut column);
            for r in 0..n.saturating_sub(1) {
                let v = column[r];
                if can_merge(v) && v == column[r + 1] {
                    column[r] = v * 2;
                    column[r + 1] = 0;
                    outcome.merges += 1;
                    if column[r] == win_tile {
                        outcome.reached_win = true;
                    }
                }
            }
            compact(&mut column);

            for (r, &v) in column.iter().enumerate() {
                let cell = &mut self.cells[r * n + c];
                if *cell != v {
                    *cell = v;
                    outcome.moved = true;
                }
            }
        }

        outcome
    }

    /// Slides the grid in `direction` using the direction's rotation pair
    /// around a single upward slide.
    pub fn slide(&mut self, direction: Direction, win_tile: u32) -> SlideOutcome {
        let (pre, post) = direction.rotation_pair();
        self.rotate(pre);
        let outcome = self.slide_columns_up(win_tile);
        self.rotate(post);
        outcome
    }

    /// Returns true if sliding in `direction` would change the board.
    pub fn can_slide(&self, direction: Direction) -> bool {
        let mut probe = self.clone();
        probe.slide(direction, 0).moved
    }
}

/// Moves non-zero values to the front, preserving their order.
fn compact(line: &mut [u32]) {
    let mut write = 0;
    for read in 0..line.len() {
        if line[read] != 0 {
            line.swap(write, read);
            write += 1;
        }
    }
}
