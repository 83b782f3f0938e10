use crate::game_state::chess_types::{Side, Square};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::generate_slider_moves;
use crate::moves::chess_move::Move;
use crate::moves::slider_moves::QUEEN_DIRECTIONS;

pub fn generate_queen_moves(position: &Position, side: Side, from: Square, out: &mut Vec<Move>) {
    generate_slider_moves(position, side, from, &QUEEN_DIRECTIONS, out);
}
