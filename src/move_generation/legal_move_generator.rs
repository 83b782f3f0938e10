//! Full legal move generation pipeline.
//!
//! Collects piece-wise pseudo-legal moves in board-scan order, applies each
//! candidate and drops those that leave the mover's own king attacked. Pins
//! and direct self-check need no separate handling: both show up as an
//! attacked king after the move.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::moves::chess_move::Move;

/// A legal move together with the position it produces.
#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub mv: Move,
    pub position_after: Position,
}

/// Pseudo-legal moves of the piece on `square`, if it belongs to `side`.
pub fn pseudo_moves(position: &Position, side: Side, square: Square) -> Vec<Move> {
    let mut out = Vec::with_capacity(28);
    push_pseudo_moves(position, side, square, &mut out);
    out
}

fn push_pseudo_moves(position: &Position, side: Side, square: Square, out: &mut Vec<Move>) {
    let Some(piece) = position.piece_at(square).filter(|piece| piece.side == side) else {
        return;
    };

    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(position, side, square, out),
        PieceKind::Knight => generate_knight_moves(position, side, square, out),
        PieceKind::Bishop => generate_bishop_moves(position, side, square, out),
        PieceKind::Rook => generate_rook_moves(position, side, square, out),
        PieceKind::Queen => generate_queen_moves(position, side, square, out),
        PieceKind::King => generate_king_moves(position, side, square, out),
    }
}

/// Every pseudo-legal move of `side`, pieces visited in board-scan order.
pub fn all_pseudo_moves(position: &Position, side: Side) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    for square in position.squares_of(side) {
        push_pseudo_moves(position, side, square, &mut out);
    }
    out
}

/// Legal moves of `side` paired with their resulting positions.
///
/// A move is kept only when the mover still has a king afterwards and that
/// king is not attacked. When `side` has no king at all, safety cannot be
/// verified and no move is returned.
pub fn generate_legal_moves(position: &Position, side: Side) -> Vec<GeneratedMove> {
    let pseudo = all_pseudo_moves(position, side);
    let mut legal = Vec::with_capacity(pseudo.len());

    for mv in pseudo {
        let next = apply_move(position, &mv, side);

        let Some(king_sq) = next.find_king(side) else {
            continue;
        };
        if is_square_attacked(&next, king_sq, side) {
            continue;
        }

        legal.push(GeneratedMove {
            mv,
            position_after: next,
        });
    }

    legal
}

/// Legal moves of `side` in deterministic generation order.
pub fn legal_moves(position: &Position, side: Side) -> Vec<Move> {
    generate_legal_moves(position, side)
        .into_iter()
        .map(|generated| generated.mv)
        .collect()
}
