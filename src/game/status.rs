//! Game status.

use serde::Serialize;

/// Lifecycle state of a game.
///
/// `Won` and `Over` are terminal: moves are ignored until the next restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    InProgress,
    Won,
    Over,
}

impl GameStatus {
    /// True for `Won` and `Over`.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Returns the lowercase protocol name.
    pub const fn name(self) -> &'static str {
        match self {
            GameStatus::InProgress => "inprogress",
            GameStatus::Won => "won",
            GameStatus::Over => "over",
        }
    }
}
