//! Helpers shared by the per-piece pseudo-move generators.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::chess_move::Move;
use crate::moves::slider_moves::ray;

/// Ray-cast along each direction, emitting quiet moves into empty cells and
/// a capture into the first enemy-occupied cell.
pub fn generate_slider_moves(
    position: &Position,
    side: Side,
    from: Square,
    directions: &[(i8, i8)],
    out: &mut Vec<Move>,
) {
    for dir in directions {
        for to in ray(from, *dir) {
            match position.side_at(to) {
                None => out.push(Move::new(from, to)),
                Some(occupant) => {
                    if occupant != side {
                        out.push(Move::new(from, to));
                    }
                    break;
                }
            }
        }
    }
}

/// Emit a jump move unless the target holds a piece of the mover's side.
#[inline]
pub fn push_unless_own(position: &Position, side: Side, from: Square, to: Square, out: &mut Vec<Move>) {
    if !position.is_occupied_by(to, side) {
        out.push(Move::new(from, to));
    }
}

/// Emit a pawn move, expanding it into one move per promotion kind when it
/// lands on the far rank.
#[inline]
pub fn push_pawn_move(side: Side, from: Square, to: Square, out: &mut Vec<Move>) {
    if to.rank() == side.promotion_rank() {
        out.extend(
            PROMOTION_KINDS
                .iter()
                .map(|kind| Move::with_promotion(from, to, *kind)),
        );
    } else {
        out.push(Move::new(from, to));
    }
}
