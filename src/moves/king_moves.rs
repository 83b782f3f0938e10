use crate::game_state::chess_types::Square;
use crate::moves::move_masks::{jump_table, mask_squares};

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

pub const KING_TARGETS: [u64; 64] = jump_table(&KING_OFFSETS);

/// Squares adjacent to `square`.
#[inline]
pub fn king_targets(square: Square) -> impl Iterator<Item = Square> {
    mask_squares(KING_TARGETS[square.index()])
}
