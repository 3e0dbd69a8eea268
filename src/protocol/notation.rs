//! Board notation encoding and decoding.
//!
//! A compact single-token form of a board position, one row after another:
//!
//! Format: `<row>/<row>/...` where each row is `<cell>,<cell>,...`
//!
//! Each cell is a decimal tile value and `0` marks an empty cell. The number
//! of rows defines the board size and every row must hold that many cells,
//! e.g. `2,2,0,0/0,0,0,0/0,0,0,0/0,0,4,0`.

use crate::board::{Board, BoardError};

/// Errors that can occur during notation parsing.
#[derive(Debug, thiserror::Error)]
pub enum NotationError {
    #[error("empty board notation")]
    Empty,

    #[error("invalid cell value in row {row}: '{text}'")]
    InvalidCell { row: usize, text: String },

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Parses a board from its notation.
pub fn parse_board(s: &str) -> Result<Board, NotationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(NotationError::Empty);
    }

    let mut rows: Vec<Vec<u32>> = Vec::new();
    for (r, row_str) in s.split('/').enumerate() {
        let mut row = Vec::new();
        for cell in row_str.split(',') {
            let cell = cell.trim();
            let value = cell.parse::<u32>().map_err(|_| NotationError::InvalidCell {
                row: r,
                text: cell.to_string(),
            })?;
            row.push(value);
        }
        rows.push(row);
    }

    Ok(Board::from_rows(&rows)?)
}

/// Encodes a board as notation.
pub fn encode_board(board: &Board) -> String {
    board
        .cells()
        .chunks(board.size())
        .map(|row| {
            row.iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_four_by_four() {
        let board = parse_board("2,2,0,0/0,0,0,0/0,0,0,0/0,0,4,0").unwrap();
        assert_eq!(board.size(), 4);
        assert_eq!(board.get(0, 0), Some(2));
        assert_eq!(board.get(0, 1), Some(2));
        assert_eq!(board.get(3, 2), Some(4));
        assert_eq!(board.tile_sum(), 8);
    }

    #[test]
    fn encode_matches_parse() {
        let text = "0,4,8/16,0,2/0,0,2048";
        let board = parse_board(text).unwrap();
        assert_eq!(encode_board(&board), text);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let board = parse_board("  2, 0/0 ,4 \n").unwrap();
        assert_eq!(board.rows(), vec![vec![2, 0], vec![0, 4]]);
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(parse_board(""), Err(NotationError::Empty)));
        assert!(matches!(parse_board("   "), Err(NotationError::Empty)));
    }

    #[test]
    fn rejects_non_numeric_cells() {
        let err = parse_board("2,x/0,0").unwrap_err();
        assert!(matches!(err, NotationError::InvalidCell { row: 0, ref text } if text == "x"));
        assert!(parse_board("2,-2/0,0").is_err());
        assert!(parse_board("2,,0/0,0,0/0,0,0").is_err());
    }

    #[test]
    fn rejects_non_square_boards() {
        assert!(matches!(
            parse_board("2,0,0/0,0,0"),
            Err(NotationError::Board(BoardError::RaggedRow { row: 0, expected: 2, got: 3 }))
        ));
    }

    #[test]
    fn rejects_single_cell_boards() {
        assert!(matches!(
            parse_board("2"),
            Err(NotationError::Board(BoardError::InvalidSize(1)))
        ));
    }

    #[test]
    fn rejects_illegal_tiles() {
        assert!(matches!(
            parse_board("3,0/0,0"),
            Err(NotationError::Board(BoardError::InvalidTile { value: 3, .. }))
        ));
    }
}
