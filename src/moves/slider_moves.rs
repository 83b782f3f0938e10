//! Direction sets and ray walking for rooks, bishops and queens.

use crate::game_state::chess_types::Square;

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, -1), (0, 1)];
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, 1), (1, 1), (1, -1), (-1, -1)];
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, -1),
    (0, 1),
    (-1, 1),
    (1, 1),
    (1, -1),
    (-1, -1),
];

/// Squares from `origin` (exclusive) outwards until the board edge.
///
/// Callers stop consuming at the first occupied cell.
#[inline]
pub fn ray(origin: Square, (df, dr): (i8, i8)) -> impl Iterator<Item = Square> {
    let mut current = origin;
    std::iter::from_fn(move || {
        current = current.offset(df, dr)?;
        Some(current)
    })
}
