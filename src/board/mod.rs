//! Board representation and move primitives.
//!
//! Contains the tile grid, the direction type, and the rotate/slide
//! primitives every move is built from.

pub mod direction;
pub mod slide;
pub mod state;

pub use direction::Direction;
pub use slide::SlideOutcome;
pub use state::{is_valid_tile, Board, BoardError, MAX_TILE};
