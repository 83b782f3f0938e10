use crate::game_state::chess_types::Square;
use crate::moves::move_masks::{jump_table, mask_squares};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
];

pub const KNIGHT_TARGETS: [u64; 64] = jump_table(&KNIGHT_OFFSETS);

/// Squares a knight on `square` jumps to (and therefore attacks).
#[inline]
pub fn knight_targets(square: Square) -> impl Iterator<Item = Square> {
    mask_squares(KNIGHT_TARGETS[square.index()])
}
