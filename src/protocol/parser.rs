//! Host command parser.
//!
//! Parses incoming protocol lines from raw text into structured `Command`
//! variants that the engine main loop can dispatch on.

use tracing::warn;

use crate::board::Direction;

/// A parsed host-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Start a new game, applying any pending options.
    NewGame,

    /// Slide the tiles in a direction.
    Move(Direction),

    /// Replace the board with a position given in board notation.
    Position { board: String },

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Print the board and status.
    Show,

    /// Print the board and status as one JSON line.
    State,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let head = tokens[0].to_ascii_lowercase();

    match head.as_str() {
        "isready" => Some(Command::IsReady),
        "newgame" | "restart" => Some(Command::NewGame),
        "show" => Some(Command::Show),
        "state" => Some(Command::State),
        "quit" => Some(Command::Quit),

        "move" => parse_move(&tokens),
        "position" => parse_position(&tokens),
        "setoption" => parse_setoption(&tokens),

        other => match Direction::from_name(other) {
            Some(direction) => Some(Command::Move(direction)),
            None => {
                warn!(command = other, "unknown command");
                None
            }
        },
    }
}

/// Parses `move <direction>`.
fn parse_move(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        warn!("malformed move: expected 'move <up|down|left|right>'");
        return None;
    }
    match Direction::from_name(tokens[1]) {
        Some(direction) => Some(Command::Move(direction)),
        None => {
            warn!(direction = tokens[1], "unknown direction");
            None
        }
    }
}

/// Parses `position <notation>`.
fn parse_position(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        warn!("malformed position: expected 'position <notation>'");
        return None;
    }
    // Rows may be split by stray spaces after commas; rejoin them.
    let board = tokens[1..].concat();
    Some(Command::Position { board })
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                warn!("malformed setoption: empty name");
                return None;
            }
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}
