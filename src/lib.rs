//! slidemerge engine library.
//!
//! Exposes the board primitives, the game controller, configuration, the
//! host protocol, and self-play for use by integration tests and the binary
//! entry points.

pub mod board;
pub mod config;
pub mod engine;
pub mod game;
pub mod protocol;
pub mod selfplay;
