use crate::game_state::chess_types::{Side, Square};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::push_unless_own;
use crate::moves::chess_move::Move;
use crate::moves::knight_moves::knight_targets;

pub fn generate_knight_moves(position: &Position, side: Side, from: Square, out: &mut Vec<Move>) {
    for to in knight_targets(from) {
        push_unless_own(position, side, from, to, out);
    }
}
