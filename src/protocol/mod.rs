//! Host protocol handling.
//!
//! Parsing for the line-based command protocol spoken by the engine binary,
//! plus the compact board notation used by `position` and `show`.

pub mod notation;
pub mod parser;

pub use notation::{encode_board, parse_board, NotationError};
pub use parser::{parse_command, Command};
