//! Game configuration.
//!
//! Board size, winning tile, and spawn odds. Loadable from JSON; every field
//! has a default so partial files are accepted.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::{BoardError, MAX_TILE};

/// Reference board side length.
pub const DEFAULT_SIZE: usize = 4;
/// Largest accepted board side length.
pub const MAX_SIZE: usize = 256;
/// Tile that wins the game when produced by a merge.
pub const DEFAULT_WIN_TILE: u32 = 2048;
/// Chance that a spawned tile is a 4 instead of a 2.
pub const DEFAULT_FOUR_CHANCE: f64 = 0.1;
/// Tiles placed by `restart`.
pub const DEFAULT_INITIAL_TILES: usize = 2;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("board size must lie in 2..=256, got {0}")]
    InvalidSize(usize),

    #[error("winning tile must be a power of two in 4..=2^30, got {0}")]
    InvalidWinTile(u32),

    #[error("four-tile chance must lie in [0, 1], got {0}")]
    InvalidFourChance(f64),

    #[error("{tiles} opening tiles do not fit on a board with {cells} cells")]
    TooManyInitialTiles { tiles: usize, cells: usize },

    #[error("invalid board: {0}")]
    Board(#[from] BoardError),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunable rules for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_size")]
    pub size: usize,
    #[serde(default = "default_win_tile")]
    pub win_tile: u32,
    #[serde(default = "default_four_chance")]
    pub four_chance: f64,
    #[serde(default = "default_initial_tiles")]
    pub initial_tiles: usize,
}

fn default_size() -> usize {
    DEFAULT_SIZE
}

fn default_win_tile() -> u32 {
    DEFAULT_WIN_TILE
}

fn default_four_chance() -> f64 {
    DEFAULT_FOUR_CHANCE
}

fn default_initial_tiles() -> usize {
    DEFAULT_INITIAL_TILES
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            size: DEFAULT_SIZE,
            win_tile: DEFAULT_WIN_TILE,
            four_chance: DEFAULT_FOUR_CHANCE,
            initial_tiles: DEFAULT_INITIAL_TILES,
        }
    }
}

impl GameConfig {
    /// Default rules on a board of the given size.
    pub fn with_size(size: usize) -> Self {
        GameConfig {
            size,
            ..Default::default()
        }
    }

    /// Checks that the configuration describes a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_SIZE).contains(&self.size) {
            return Err(ConfigError::InvalidSize(self.size));
        }
        if self.win_tile < 4 || self.win_tile > MAX_TILE || !self.win_tile.is_power_of_two() {
            return Err(ConfigError::InvalidWinTile(self.win_tile));
        }
        if !(0.0..=1.0).contains(&self.four_chance) {
            return Err(ConfigError::InvalidFourChance(self.four_chance));
        }
        let cells = self.size * self.size;
        if self.initial_tiles > cells {
            return Err(ConfigError::TooManyInitialTiles {
                tiles: self.initial_tiles,
                cells,
            });
        }
        Ok(())
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.size, 4);
        assert_eq!(config.win_tile, 2048);
        assert_eq!(config.initial_tiles, 2);
    }

    #[test]
    fn rejects_bad_size() {
        assert!(matches!(
            GameConfig::with_size(1).validate(),
            Err(ConfigError::InvalidSize(1))
        ));
        assert!(matches!(
            GameConfig::with_size(0).validate(),
            Err(ConfigError::InvalidSize(0))
        ));
    }

    #[test]
    fn rejects_oversized_boards() {
        assert!(GameConfig::with_size(MAX_SIZE).validate().is_ok());
        for size in [MAX_SIZE + 1, 100_000, 1 << 33, usize::MAX] {
            assert!(
                matches!(GameConfig::with_size(size).validate(), Err(ConfigError::InvalidSize(s)) if s == size),
                "size {} accepted",
                size
            );
        }
        assert!(matches!(
            GameConfig::from_json_str(r#"{"size": 4294967296}"#),
            Err(ConfigError::InvalidSize(_))
        ));
    }

    #[test]
    fn rejects_bad_win_tile() {
        for win_tile in [0, 2, 3, 100, 1 << 31] {
            let config = GameConfig {
                win_tile,
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidWinTile(_))),
                "win tile {} accepted",
                win_tile
            );
        }
    }

    #[test]
    fn rejects_bad_four_chance() {
        for four_chance in [-0.1, 1.5, f64::NAN] {
            let config = GameConfig {
                four_chance,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidFourChance(_))
            ));
        }
    }

    #[test]
    fn rejects_too_many_initial_tiles() {
        let config = GameConfig {
            size: 2,
            initial_tiles: 5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManyInitialTiles { tiles: 5, cells: 4 })
        ));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config = GameConfig::from_json_str(r#"{"size": 5}"#).unwrap();
        assert_eq!(config.size, 5);
        assert_eq!(config.win_tile, DEFAULT_WIN_TILE);
        assert_eq!(config.four_chance, DEFAULT_FOUR_CHANCE);
    }

    #[test]
    fn json_is_validated() {
        assert!(matches!(
            GameConfig::from_json_str(r#"{"size": 1}"#),
            Err(ConfigError::InvalidSize(1))
        ));
        assert!(matches!(
            GameConfig::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        assert!(matches!(
            GameConfig::load("/nonexistent/slidemerge.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
