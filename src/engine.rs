//! Engine state management.
//!
//! Holds the current game, pending engine options, and writes protocol
//! responses for each host command. Options only take effect at the next
//! `newgame`, so a game in progress never changes rules underneath the host.

use std::collections::HashMap;
use std::io::{self, Write};

use rand::rngs::SmallRng;
use serde::Serialize;
use tracing::{debug, info};

use crate::board::Direction;
use crate::config::{ConfigError, GameConfig};
use crate::game::{GameController, GameStatus, RandomTiles};
use crate::protocol::notation::{encode_board, parse_board, NotationError};

/// Errors surfaced to the host as `error <message>` lines.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("option {name} needs a value")]
    MissingValue { name: String },

    #[error("invalid value '{value}' for option {name}")]
    InvalidValue { name: String, value: String },

    #[error("failed to parse position: {0}")]
    Notation(#[from] NotationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Options recognized by `setoption`, matched case-insensitively.
const OPTION_NAMES: [&str; 5] = ["Size", "WinTile", "FourChance", "InitialTiles", "Seed"];

/// JSON view of the game written by the `state` command.
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub size: usize,
    pub status: GameStatus,
    pub max_tile: u32,
    pub rows: Vec<Vec<u32>>,
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    game: GameController<RandomTiles<SmallRng>>,
    seed: u64,
    pub options: HashMap<String, String>,
}

impl Engine {
    /// Creates an engine and starts a game with the given rules.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let game = GameController::seeded(config, seed)?;
        Ok(Engine {
            game,
            seed,
            options: HashMap::new(),
        })
    }

    /// The game being played.
    pub fn game(&self) -> &GameController<RandomTiles<SmallRng>> {
        &self.game
    }

    /// Stores an option for the next `newgame`. Unknown names are rejected.
    pub fn set_option(&mut self, name: String, value: Option<String>) -> Result<(), EngineError> {
        let canonical = OPTION_NAMES
            .iter()
            .find(|n| n.eq_ignore_ascii_case(&name))
            .ok_or_else(|| EngineError::UnknownOption(name.clone()))?;
        let value = value.ok_or_else(|| EngineError::MissingValue {
            name: canonical.to_string(),
        })?;
        self.options.insert(canonical.to_string(), value);
        Ok(())
    }

    /// Starts a new game. Pending options are applied first; if they do not
    /// form a valid configuration the current game is kept.
    pub fn new_game(&mut self) -> Result<(), EngineError> {
        if self.options.is_empty() {
            self.game.restart();
            return Ok(());
        }

        let (config, seed) = self.pending_config()?;
        let game = GameController::seeded(config, seed)?;
        info!(
            size = game.size(),
            win_tile = game.config().win_tile,
            seed,
            "applied options"
        );
        self.game = game;
        self.seed = seed;
        self.options.clear();
        Ok(())
    }

    /// Builds the configuration the pending options describe.
    fn pending_config(&self) -> Result<(GameConfig, u64), EngineError> {
        let mut config = self.game.config().clone();
        let mut seed = self.seed;
        for (name, value) in &self.options {
            let invalid = || EngineError::InvalidValue {
                name: name.clone(),
                value: value.clone(),
            };
            match name.as_str() {
                "Size" => config.size = value.parse().map_err(|_| invalid())?,
                "WinTile" => config.win_tile = value.parse().map_err(|_| invalid())?,
                "FourChance" => config.four_chance = value.parse().map_err(|_| invalid())?,
                "InitialTiles" => config.initial_tiles = value.parse().map_err(|_| invalid())?,
                "Seed" => seed = value.parse().map_err(|_| invalid())?,
                _ => return Err(EngineError::UnknownOption(name.clone())),
            }
        }
        config.validate()?;
        Ok((config, seed))
    }

    /// Replaces the board with a position in board notation.
    pub fn set_position(&mut self, notation: &str) -> Result<(), EngineError> {
        let board = parse_board(notation)?;
        self.game.set_board(board)?;
        debug!(status = self.game.status().name(), "position set");
        Ok(())
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Applies a move and reports the outcome followed by the position.
    pub fn handle_move<W: Write>(&mut self, direction: Direction, out: &mut W) -> io::Result<()> {
        let outcome = self.game.apply_move(direction);
        debug!(?direction, outcome = outcome.name(), "move applied");
        writeln!(out, "moved {}", outcome.name())?;
        self.handle_show(out)
    }

    /// Writes `board <notation>` and `status <status>`.
    pub fn handle_show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "board {}", encode_board(self.game.board()))?;
        writeln!(out, "status {}", self.game.status().name())?;
        out.flush()
    }

    /// Writes the game as a single JSON line.
    pub fn handle_state<W: Write>(&self, out: &mut W) -> io::Result<()> {
        serde_json::to_writer(&mut *out, &self.snapshot())?;
        writeln!(out)?;
        out.flush()
    }

    /// Writes `error <message>`.
    pub fn handle_error<W: Write>(&self, err: &EngineError, out: &mut W) -> io::Result<()> {
        writeln!(out, "error {}", err)?;
        out.flush()
    }

    /// Captures the current game for serialization.
    pub fn snapshot(&self) -> Snapshot {
        let board = self.game.board();
        Snapshot {
            size: board.size(),
            status: self.game.status(),
            max_tile: board.max_tile(),
            rows: board.rows(),
        }
    }
}
