//! Square coordinate conversions (`e4` and friends).

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Square;

/// Convert a coordinate such as "e4" to a square.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidNotation(format!(
            "invalid algebraic square: {square}"
        )));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(ChessError::InvalidNotation(format!(
            "invalid algebraic file: {}",
            file as char
        )));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidNotation(format!(
            "invalid algebraic rank: {}",
            rank as char
        )));
    }

    Square::new(file - b'a', rank - b'1')
        .ok_or_else(|| ChessError::InvalidNotation(format!("invalid algebraic square: {square}")))
}

#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    let file_char = char::from(b'a' + square.file());
    let rank_char = char::from(b'1' + square.rank());
    format!("{file_char}{rank_char}")
}
