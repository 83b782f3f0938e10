//! Static position evaluation.
//!
//! Search delegates leaf scoring to a [`BoardScorer`] so the heuristic can be
//! swapped without touching the search code.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of `side`; positive is good for `side`.
    fn score(&self, position: &Position, side: Side) -> i32;
}

/// Plain material count.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 300,
            PieceKind::Bishop => 300,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }

    fn material_balance_white_minus_black(position: &Position) -> i32 {
        position
            .cells()
            .iter()
            .flatten()
            .map(|piece| match piece.side {
                Side::White => Self::piece_value(piece.kind),
                Side::Black => -Self::piece_value(piece.kind),
            })
            .sum()
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, position: &Position, side: Side) -> i32 {
        let white_minus_black = Self::material_balance_white_minus_black(position);
        match side {
            Side::White => white_minus_black,
            Side::Black => -white_minus_black,
        }
    }
}

/// Material of `side` minus the opponent's.
#[inline]
pub fn evaluate(position: &Position, side: Side) -> i32 {
    MaterialScorer.score(position, side)
}
