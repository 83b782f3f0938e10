//! King pseudo-move generation, castling included.
//!
//! Castling rights are not stored anywhere: they are read off the has-moved
//! flags of the king and rook, then gated on an empty and unattacked path.

use crate::game_state::chess_rules::{castles_for, king_home, CastleGeometry};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::push_unless_own;
use crate::moves::chess_move::Move;
use crate::moves::king_moves::king_targets;

pub fn generate_king_moves(position: &Position, side: Side, from: Square, out: &mut Vec<Move>) {
    for to in king_targets(from) {
        push_unless_own(position, side, from, to, out);
    }

    if from != king_home(side) {
        return;
    }

    for castle in castles_for(side) {
        if can_castle_with(position, side, castle) {
            out.push(Move::castle(castle.king_from, castle.king_to));
        }
    }
}

/// Castling precondition check.
///
/// True iff the king and rook both stand unmoved on `king_square` and
/// `rook_square`, every square in `empty_squares` is empty, and neither the
/// king square nor any of the empty squares is attacked. The rook square
/// itself may be attacked.
pub fn can_castle(
    position: &Position,
    side: Side,
    king_square: Square,
    rook_square: Square,
    empty_squares: &[Square],
) -> bool {
    if !position.holds_unmoved(king_square, side, PieceKind::King)
        || !position.holds_unmoved(rook_square, side, PieceKind::Rook)
    {
        return false;
    }

    if !empty_squares.iter().all(|sq| position.is_empty(*sq)) {
        return false;
    }

    std::iter::once(&king_square)
        .chain(empty_squares)
        .all(|sq| !is_square_attacked(position, *sq, side))
}

/// [`can_castle`] for one of the side's fixed castling geometries.
pub fn can_castle_with(position: &Position, side: Side, castle: &CastleGeometry) -> bool {
    let empty: Vec<Square> = castle.empty_squares().collect();
    can_castle(position, side, castle.king_from, castle.rook_from, &empty)
}

#[cfg(test)]
mod tests {
    use super::generate_king_moves;
    use crate::game_state::position::Position;
    use crate::utils::algebraic::algebraic_to_square;

    fn king_moves(fen: &str, from: &str) -> Vec<String> {
        let (game, side) = Position::from_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        generate_king_moves(&game, side, algebraic_to_square(from).expect("square"), &mut out);
        out.iter()
            .filter(|m| m.is_castling)
            .map(|m| m.to_string())
            .collect()
    }

    #[test]
    fn both_castles_available_on_open_back_rank() {
        assert_eq!(
            king_moves("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1"),
            ["e1c1", "e1g1"]
        );
        assert_eq!(
            king_moves("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1", "e8"),
            ["e8c8", "e8g8"]
        );
    }

    #[test]
    fn castling_needs_the_right_and_an_empty_path() {
        assert_eq!(king_moves("r3k2r/8/8/8/8/8/8/R3K2R w Q - 0 1", "e1"), ["e1c1"]);
        assert!(king_moves("r3k2r/8/8/8/8/8/8/RN2K1NR w KQ - 0 1", "e1").is_empty());
    }

    #[test]
    fn castling_blocked_by_check_or_attacked_path() {
        // King in check.
        assert!(king_moves("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1", "e1").is_empty());
        // f1 attacked: only queen-side remains.
        assert_eq!(king_moves("5rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1", "e1"), ["e1c1"]);
        // Rook square attacked does not matter.
        assert_eq!(
            king_moves("7k/8/8/8/8/8/8/R3K2R w KQ - 0 1", "e1").len(),
            2
        );
        assert_eq!(king_moves("6kr/8/8/8/8/8/8/R3K2R w KQ - 0 1", "e1"), ["e1c1", "e1g1"]);
    }
}
