//! Game controller.
//!
//! Owns one board, its status, the configuration, and the tile source.
//! `restart` and `apply_move` are the only mutating game entry points.

use rand::rngs::SmallRng;
use serde::Serialize;
use tracing::debug;

use crate::board::{Board, Direction};
use crate::config::{ConfigError, GameConfig};

use super::spawn::{spawn_tile, RandomTiles, Spawn, TileSource};
use super::status::GameStatus;

/// What a call to [`GameController::apply_move`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveOutcome {
    /// The game was already won or over; nothing changed.
    Ignored,
    /// The slide changed nothing; no tile spawned.
    Unchanged,
    /// Tiles moved and a new tile spawned.
    Moved,
    /// A merge produced the winning tile.
    Won,
    /// Tiles moved, a tile spawned, and no move remains.
    Over,
}

impl MoveOutcome {
    /// Returns the lowercase protocol name.
    pub const fn name(self) -> &'static str {
        match self {
            MoveOutcome::Ignored => "ignored",
            MoveOutcome::Unchanged => "unchanged",
            MoveOutcome::Moved => "moved",
            MoveOutcome::Won => "won",
            MoveOutcome::Over => "over",
        }
    }

    /// True if the board changed.
    pub const fn changed(self) -> bool {
        matches!(self, MoveOutcome::Moved | MoveOutcome::Won | MoveOutcome::Over)
    }
}

/// A game session: board, status, and the randomness that drives spawns.
#[derive(Debug, Clone)]
pub struct GameController<S> {
    config: GameConfig,
    board: Board,
    status: GameStatus,
    tiles: S,
}

impl GameController<RandomTiles<SmallRng>> {
    /// Starts a game driven by a seeded `SmallRng` (0 = entropy).
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let tiles = RandomTiles::seeded(seed, config.four_chance);
        GameController::new(config, tiles)
    }
}

impl<S: TileSource> GameController<S> {
    /// Validates `config` and starts a fresh game.
    pub fn new(config: GameConfig, tiles: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.size)?;
        let mut game = GameController {
            config,
            board,
            status: GameStatus::InProgress,
            tiles,
        };
        game.restart();
        Ok(game)
    }

    /// Continues from an existing position. The board's size overrides
    /// `config.size`.
    pub fn from_board(mut config: GameConfig, board: Board, tiles: S) -> Result<Self, ConfigError> {
        config.size = board.size();
        config.validate()?;
        let status = status_for_position(&board);
        Ok(GameController {
            config,
            board,
            status,
            tiles,
        })
    }

    /// Clears the board, resets the status, and spawns the opening tiles.
    pub fn restart(&mut self) {
        self.board.clear();
        self.status = GameStatus::InProgress;
        for _ in 0..self.config.initial_tiles {
            self.spawn();
        }
        debug!(size = self.board.size(), "game restarted");
    }

    /// Slides the board in `direction` and advances the game.
    ///
    /// Ignored once the game is won or over. A winning merge ends the turn
    /// immediately, without a spawn or an over-check.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.status.is_terminal() {
            return MoveOutcome::Ignored;
        }

        let slide = self.board.slide(direction, self.config.win_tile);
        if slide.reached_win {
            self.status = GameStatus::Won;
            debug!(?direction, win_tile = self.config.win_tile, "game won");
            return MoveOutcome::Won;
        }
        if !slide.moved {
            return MoveOutcome::Unchanged;
        }

        self.spawn();
        if self.board.is_stuck() {
            self.status = GameStatus::Over;
            debug!(?direction, max_tile = self.board.max_tile(), "game over");
            return MoveOutcome::Over;
        }
        MoveOutcome::Moved
    }

    /// Places one random tile. Does nothing on a full board.
    fn spawn(&mut self) -> Option<Spawn> {
        spawn_tile(&mut self.board, &mut self.tiles)
    }

    /// Replaces the position. The status becomes `Over` if no move can change
    /// the new board, otherwise `InProgress`.
    pub fn set_board(&mut self, board: Board) -> Result<(), ConfigError> {
        let config = GameConfig {
            size: board.size(),
            ..self.config.clone()
        };
        config.validate()?;
        self.config = config;
        self.status = status_for_position(&board);
        self.board = board;
        Ok(())
    }

    /// Adopts a new configuration and restarts.
    ///
    /// The tile source is kept; callers that change `four_chance` on a
    /// `RandomTiles` source should build a new controller instead.
    pub fn reconfigure(&mut self, config: GameConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.board = Board::new(config.size)?;
        self.config = config;
        self.restart();
        Ok(())
    }

    /// Value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the board.
    pub fn cell(&self, row: usize, col: usize) -> u32 {
        match self.board.get(row, col) {
            Some(v) => v,
            None => panic!(
                "cell ({}, {}) outside {}x{} board",
                row,
                col,
                self.board.size(),
                self.board.size()
            ),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

fn status_for_position(board: &Board) -> GameStatus {
    if board.is_stuck() {
        GameStatus::Over
    } else {
        GameStatus::InProgress
    }
}
