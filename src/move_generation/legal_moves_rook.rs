//! Rook pseudo-move generation.
//!
//! Rays along ranks and files; the first enemy piece on a ray is capturable,
//! the first friendly piece ends the ray.

use crate::game_state::chess_types::{Side, Square};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::generate_slider_moves;
use crate::moves::chess_move::Move;
use crate::moves::slider_moves::ROOK_DIRECTIONS;

pub fn generate_rook_moves(position: &Position, side: Side, from: Square, out: &mut Vec<Move>) {
    generate_slider_moves(position, side, from, &ROOK_DIRECTIONS, out);
}
