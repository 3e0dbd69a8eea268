//! Game lifecycle.
//!
//! The controller turns direction commands into board operations, spawns
//! tiles through an injected source, and tracks the won/over status.

pub mod controller;
pub mod spawn;
pub mod status;

pub use controller::{GameController, MoveOutcome};
pub use spawn::{spawn_tile, RandomTiles, ScriptedTiles, Spawn, TileSource};
pub use status::GameStatus;
