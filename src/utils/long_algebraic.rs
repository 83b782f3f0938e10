//! Coordinate move notation: `<from><to>[promotion]`, e.g. `e2e4`, `e7e8q`.
//!
//! Parsing yields a bare `Move`; whether it is legal, and what castling or
//! double-step metadata it carries, is settled by `apply_checked_move`.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::PieceKind;
use crate::moves::chess_move::Move;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_coordinate_move(text: &str) -> ChessResult<Move> {
    let text = text.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessError::InvalidNotation(format!(
            "invalid coordinate move: {text}"
        )));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;

    match text[4..].chars().next() {
        None => Ok(Move::new(from, to)),
        Some(ch) => {
            let kind = promotion_from_char(ch).ok_or_else(|| {
                ChessError::InvalidNotation(format!("invalid promotion piece '{ch}' in {text}"))
            })?;
            Ok(Move::with_promotion(from, to, kind))
        }
    }
}

#[inline]
pub fn move_to_coordinate(mv: &Move) -> String {
    mv.to_string()
}

fn promotion_from_char(ch: char) -> Option<PieceKind> {
    match ch.to_ascii_lowercase() {
        'n' => Some(PieceKind::Knight),
        'b' => Some(PieceKind::Bishop),
        'r' => Some(PieceKind::Rook),
        'q' => Some(PieceKind::Queen),
        _ => None,
    }
}
