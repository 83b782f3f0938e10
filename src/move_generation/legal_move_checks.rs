//! Attack detection and check classification.
//!
//! All queries are phrased from the defender's point of view: "is this square
//! attacked by the opponent of `defender`".

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::king_moves::king_targets;
use crate::moves::knight_moves::knight_targets;
use crate::moves::pawn_moves::pawn_attacker_squares;
use crate::moves::slider_moves::{ray, BISHOP_DIRECTIONS, ROOK_DIRECTIONS};

/// Whether `square` is attacked by any piece of `defender`'s opponent.
pub fn is_square_attacked(position: &Position, square: Square, defender: Side) -> bool {
    let attacker = defender.opponent();

    if knight_targets(square).any(|sq| is_piece(position, sq, attacker, PieceKind::Knight)) {
        return true;
    }

    if pawn_attacker_squares(defender, square)
        .into_iter()
        .flatten()
        .any(|sq| is_piece(position, sq, attacker, PieceKind::Pawn))
    {
        return true;
    }

    if ROOK_DIRECTIONS.iter().any(|dir| {
        first_blocker(position, square, *dir)
            .is_some_and(|(_, piece)| is_axis_slider(piece, attacker))
    }) {
        return true;
    }

    if BISHOP_DIRECTIONS.iter().any(|dir| {
        first_blocker(position, square, *dir)
            .is_some_and(|(_, piece)| is_diagonal_slider(piece, attacker))
    }) {
        return true;
    }

    king_targets(square).any(|sq| is_piece(position, sq, attacker, PieceKind::King))
}

/// Every enemy piece attacking `square`, with its location.
///
/// Diagnostic companion to [`is_square_attacked`]; reports attackers in the
/// same order the boolean check probes them.
pub fn attackers_to_square(position: &Position, square: Square, defender: Side) -> Vec<(Square, Piece)> {
    let attacker = defender.opponent();
    let mut attackers = Vec::new();

    for sq in knight_targets(square) {
        if let Some(piece) = piece_if(position, sq, attacker, PieceKind::Knight) {
            attackers.push((sq, piece));
        }
    }

    for sq in pawn_attacker_squares(defender, square).into_iter().flatten() {
        if let Some(piece) = piece_if(position, sq, attacker, PieceKind::Pawn) {
            attackers.push((sq, piece));
        }
    }

    for dir in ROOK_DIRECTIONS {
        if let Some((sq, piece)) = first_blocker(position, square, dir) {
            if is_axis_slider(piece, attacker) {
                attackers.push((sq, piece));
            }
        }
    }

    for dir in BISHOP_DIRECTIONS {
        if let Some((sq, piece)) = first_blocker(position, square, dir) {
            if is_diagonal_slider(piece, attacker) {
                attackers.push((sq, piece));
            }
        }
    }

    for sq in king_targets(square) {
        if let Some(piece) = piece_if(position, sq, attacker, PieceKind::King) {
            attackers.push((sq, piece));
        }
    }

    attackers
}

/// Whether `side`'s king is attacked. A side without a king is never in check.
#[inline]
pub fn is_king_in_check(position: &Position, side: Side) -> bool {
    let Some(king_sq) = position.find_king(side) else {
        return false;
    };
    is_square_attacked(position, king_sq, side)
}

/// Classify `side`'s king as safe, checked or mated.
///
/// Fails with [`ChessError::MissingKing`] when `side` has no king, since the
/// answer is undefined in that case.
pub fn check_status(position: &Position, side: Side) -> ChessResult<CheckStatus> {
    let king_sq = position.find_king(side).ok_or(ChessError::MissingKing(side))?;
    if !is_square_attacked(position, king_sq, side) {
        return Ok(CheckStatus::None);
    }
    if legal_moves(position, side).is_empty() {
        Ok(CheckStatus::Checkmate)
    } else {
        Ok(CheckStatus::Check)
    }
}

/// No legal moves while the king is not attacked.
pub fn is_stalemate(position: &Position, side: Side) -> ChessResult<bool> {
    let king_sq = position.find_king(side).ok_or(ChessError::MissingKing(side))?;
    Ok(!is_square_attacked(position, king_sq, side) && legal_moves(position, side).is_empty())
}

fn first_blocker(position: &Position, origin: Square, dir: (i8, i8)) -> Option<(Square, Piece)> {
    ray(origin, dir).find_map(|sq| position.piece_at(sq).map(|piece| (sq, piece)))
}

#[inline]
fn is_axis_slider(piece: Piece, attacker: Side) -> bool {
    piece.side == attacker && matches!(piece.kind, PieceKind::Rook | PieceKind::Queen)
}

#[inline]
fn is_diagonal_slider(piece: Piece, attacker: Side) -> bool {
    piece.side == attacker && matches!(piece.kind, PieceKind::Bishop | PieceKind::Queen)
}

#[inline]
fn piece_if(position: &Position, square: Square, side: Side, kind: PieceKind) -> Option<Piece> {
    position.piece_at(square).filter(|piece| piece.is(side, kind))
}

#[inline]
fn is_piece(position: &Position, square: Square, side: Side, kind: PieceKind) -> bool {
    piece_if(position, square, side, kind).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("square should parse")
    }

    fn position(fen: &str) -> (Position, Side) {
        Position::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn each_attacker_kind_is_detected() {
        let (knight, _) = position("4k3/8/8/8/8/5n2/8/4K3 w - - 0 1");
        assert!(is_square_attacked(&knight, sq("e1"), Side::White));

        let (pawn, _) = position("4k3/8/8/8/8/8/3p4/4K3 w - - 0 1");
        assert!(is_square_attacked(&pawn, sq("e1"), Side::White));
        assert!(!is_square_attacked(&pawn, sq("d1"), Side::White));

        let (rook, _) = position("4k3/8/8/8/8/8/8/r3K3 w - - 0 1");
        assert!(is_square_attacked(&rook, sq("e1"), Side::White));

        let (bishop, _) = position("4k3/8/8/b7/8/8/8/4K3 w - - 0 1");
        assert!(is_square_attacked(&bishop, sq("e1"), Side::White));

        let (king, _) = position("8/8/8/8/8/8/3k4/4K3 w - - 0 1");
        assert!(is_square_attacked(&king, sq("e1"), Side::White));
    }

    #[test]
    fn black_pawn_attacks_downwards_only() {
        let (game, _) = position("4k3/8/8/3p4/8/8/8/4K3 w - - 0 1");
        assert!(is_square_attacked(&game, sq("e4"), Side::White));
        assert!(is_square_attacked(&game, sq("c4"), Side::White));
        assert!(!is_square_attacked(&game, sq("e6"), Side::White));
    }

    #[test]
    fn own_pieces_block_rays() {
        let (game, _) = position("4k3/8/8/8/8/8/8/r2NK3 w - - 0 1");
        assert!(!is_square_attacked(&game, sq("e1"), Side::White));
        let (enemy_blocker, _) = position("4k3/8/8/8/8/8/8/r2nK3 w - - 0 1");
        assert!(!is_square_attacked(&enemy_blocker, sq("e1"), Side::White));
    }

    #[test]
    fn queen_attacks_on_both_axes() {
        let (game, _) = position("4k3/8/8/8/8/8/8/q3K3 w - - 0 1");
        assert!(is_square_attacked(&game, sq("e1"), Side::White));
        assert!(is_square_attacked(&game, sq("a8"), Side::White));
        assert!(is_square_attacked(&game, sq("d4"), Side::White));
    }

    #[test]
    fn attackers_list_reports_pieces_and_squares() {
        let (game, _) = position("4k3/8/8/8/8/5n2/8/r3K3 w - - 0 1");
        let attackers = attackers_to_square(&game, sq("e1"), Side::White);
        let kinds: Vec<(String, PieceKind)> = attackers
            .iter()
            .map(|(square, piece)| (square.to_string(), piece.kind))
            .collect();
        assert_eq!(
            kinds,
            [
                ("f3".to_owned(), PieceKind::Knight),
                ("a1".to_owned(), PieceKind::Rook)
            ]
        );
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let (game, side) =
            position("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert_eq!(side, Side::White);
        assert_eq!(check_status(&game, Side::White).expect("kings present"), CheckStatus::Checkmate);
        assert_eq!(check_status(&game, Side::Black).expect("kings present"), CheckStatus::None);
    }

    #[test]
    fn simple_check_has_escape() {
        let (game, _) = position("4k3/8/8/8/8/8/8/r3K3 w - - 0 1");
        assert_eq!(check_status(&game, Side::White).expect("kings present"), CheckStatus::Check);
    }

    #[test]
    fn stalemate_is_neither_check_nor_mate() {
        let (game, _) = position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert_eq!(check_status(&game, Side::Black).expect("kings present"), CheckStatus::None);
        assert!(legal_moves(&game, Side::Black).is_empty());
        assert!(is_stalemate(&game, Side::Black).expect("kings present"));
    }

    #[test]
    fn missing_king_fails_fast() {
        let (game, _) = position("8/8/8/8/8/8/8/4K3 w - - 0 1");
        assert!(matches!(
            check_status(&game, Side::Black),
            Err(ChessError::MissingKing(Side::Black))
        ));
        assert!(!is_king_in_check(&game, Side::Black));
    }
}
