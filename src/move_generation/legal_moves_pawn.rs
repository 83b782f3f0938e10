//! Pawn pseudo-move generation.
//!
//! Single pushes, the initial double step (flagged as en-passant setup),
//! diagonal captures including onto the en-passant target, and promotion
//! expansion on the far rank.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::push_pawn_move;
use crate::moves::chess_move::Move;
use crate::moves::pawn_moves::{pawn_capture_targets, pawn_push};

pub fn generate_pawn_moves(position: &Position, side: Side, from: Square, out: &mut Vec<Move>) {
    if let Some(one_ahead) = pawn_push(side, from).filter(|sq| position.is_empty(*sq)) {
        push_pawn_move(side, from, one_ahead, out);

        if from.rank() == side.pawn_start_rank() {
            if let Some(two_ahead) = pawn_push(side, one_ahead).filter(|sq| position.is_empty(*sq)) {
                out.push(Move::double_step(from, two_ahead));
            }
        }
    }

    let opponent = side.opponent();
    for to in pawn_capture_targets(side, from).into_iter().flatten() {
        if position.is_occupied_by(to, opponent) || position.en_passant_target() == Some(to) {
            push_pawn_move(side, from, to, out);
        }
    }
}
