//! Pawn geometry: pushes, capture targets and attacker locations.

use crate::game_state::chess_types::{Side, Square};

/// Square one step ahead of a pawn of `side`.
#[inline]
pub fn pawn_push(side: Side, from: Square) -> Option<Square> {
    from.offset(0, side.forward())
}

/// Diagonal capture targets of a pawn, queen-side file first.
#[inline]
pub fn pawn_capture_targets(side: Side, from: Square) -> [Option<Square>; 2] {
    let dr = side.forward();
    [from.offset(-1, dr), from.offset(1, dr)]
}

/// Where an enemy pawn must stand to attack `square` held by `defender`.
///
/// Enemy pawns capture towards the defender's home rank, so they sit one
/// rank further along the defender's forward direction.
#[inline]
pub fn pawn_attacker_squares(defender: Side, square: Square) -> [Option<Square>; 2] {
    let dr = defender.forward();
    [square.offset(-1, dr), square.offset(1, dr)]
}
