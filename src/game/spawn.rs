//! Random tile spawning.
//!
//! Randomness reaches the game only through [`TileSource`], so tests can
//! script exact cell and value choices.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;

/// Supplies the random choices made when a tile spawns.
pub trait TileSource {
    /// Picks an index in `0..empty`. Called only with `empty >= 1`.
    fn pick_cell(&mut self, empty: usize) -> usize;

    /// Picks the value of the new tile: 2 or 4.
    fn pick_value(&mut self) -> u32;
}

impl<T: TileSource + ?Sized> TileSource for &mut T {
    fn pick_cell(&mut self, empty: usize) -> usize {
        (**self).pick_cell(empty)
    }

    fn pick_value(&mut self) -> u32 {
        (**self).pick_value()
    }
}

/// `rand`-backed tile source: uniform cell, 4 with probability `four_chance`.
#[derive(Debug, Clone)]
pub struct RandomTiles<R> {
    rng: R,
    four_chance: f64,
}

impl<R: Rng> RandomTiles<R> {
    /// Wraps an RNG. `four_chance` must lie in `[0, 1]`.
    pub fn new(rng: R, four_chance: f64) -> Self {
        RandomTiles { rng, four_chance }
    }
}

impl RandomTiles<SmallRng> {
    /// Builds a `SmallRng` source. A seed of 0 draws from entropy.
    pub fn seeded(seed: u64, four_chance: f64) -> Self {
        let rng = if seed != 0 {
            SmallRng::seed_from_u64(seed)
        } else {
            SmallRng::from_entropy()
        };
        RandomTiles::new(rng, four_chance)
    }
}

impl<R: Rng> TileSource for RandomTiles<R> {
    fn pick_cell(&mut self, empty: usize) -> usize {
        self.rng.gen_range(0..empty)
    }

    fn pick_value(&mut self) -> u32 {
        if self.rng.gen_bool(self.four_chance) {
            4
        } else {
            2
        }
    }
}

/// Deterministic tile source replaying fixed choices.
///
/// Once a queue runs dry it falls back to the first empty cell and a 2.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTiles {
    cells: VecDeque<usize>,
    values: VecDeque<u32>,
}

impl ScriptedTiles {
    pub fn new<C, V>(cells: C, values: V) -> Self
    where
        C: IntoIterator<Item = usize>,
        V: IntoIterator<Item = u32>,
    {
        ScriptedTiles {
            cells: cells.into_iter().collect(),
            values: values.into_iter().collect(),
        }
    }
}

impl TileSource for ScriptedTiles {
    fn pick_cell(&mut self, empty: usize) -> usize {
        self.cells.pop_front().unwrap_or(0) % empty
    }

    fn pick_value(&mut self) -> u32 {
        self.values.pop_front().unwrap_or(2)
    }
}

/// A tile placed by [`spawn_tile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub row: usize,
    pub col: usize,
    pub value: u32,
}

/// Places one tile on a uniformly chosen empty cell.
///
/// Returns `None` and leaves the board untouched when it is full.
pub fn spawn_tile<S: TileSource + ?Sized>(board: &mut Board, source: &mut S) -> Option<Spawn> {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return None;
    }
    let index = source.pick_cell(empty.len());
    let (row, col) = *empty.get(index)?;
    let value = source.pick_value();
    if !board.set(row, col, value) {
        return None;
    }
    Some(Spawn { row, col, value })
}
