//! Move directions and their rotation pairs.

/// A direction the player can slide the tiles in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions in protocol order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Clockwise quarter turns applied before and after an upward slide.
    ///
    /// Rotating by `pre` brings the direction's leading edge to the top; `post`
    /// undoes it, so `pre + post` is always a multiple of four.
    pub const fn rotation_pair(self) -> (u8, u8) {
        match self {
            Direction::Up => (0, 0),
            Direction::Down => (2, 2),
            Direction::Left => (1, 3),
            Direction::Right => (3, 1),
        }
    }

    /// Returns the lowercase protocol name.
    pub const fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Parses a direction from its full name or single-letter abbreviation.
    pub fn from_name(s: &str) -> Option<Direction> {
        match s.to_ascii_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }
}
