//! Move application.
//!
//! `apply_move` is the only way a new `Position` comes into existence after
//! setup. It trusts its input; `apply_checked_move` is the validating entry
//! point for moves that come from outside the engine.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{castles_for, king_home};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::move_generation::legal_moves_king::can_castle_with;
use crate::moves::chess_move::Move;

/// Produce the position after `side` plays `mv`. The input is never altered.
///
/// An empty origin square yields an unchanged copy.
pub fn apply_move(position: &Position, mv: &Move, side: Side) -> Position {
    let mut cells = *position.cells();

    let Some(piece) = cells[mv.from.index()] else {
        return position.clone();
    };

    if piece.kind == PieceKind::King && mv.from == king_home(side) {
        let castle = castles_for(side)
            .iter()
            .find(|castle| castle.king_to == mv.to && can_castle_with(position, side, castle));
        if let Some(castle) = castle {
            cells[castle.rook_from.index()] = None;
            cells[castle.rook_to.index()] = Some(Piece::new(side, PieceKind::Rook).moved());
        }
    }

    cells[mv.from.index()] = None;

    let placed = match mv.promotion {
        Some(kind) if piece.kind == PieceKind::Pawn => Piece::new(side, kind).moved(),
        _ => piece.moved(),
    };
    cells[mv.to.index()] = Some(placed);

    if piece.kind == PieceKind::Pawn {
        let rank_delta = mv.to.rank().abs_diff(mv.from.rank());
        if rank_delta == 2 {
            let skipped = mv.from.offset(0, side.forward());
            return Position::from_cells(cells, skipped);
        }

        if position.en_passant_target() == Some(mv.to) {
            if let Some(captured) = Square::new(mv.to.file(), mv.from.rank()) {
                cells[captured.index()] = None;
            }
        }
    }

    Position::from_cells(cells, None)
}

/// Validate `requested` against the legal moves of `side` and apply it.
///
/// Matching is on `(from, to)` only; the generated move supplies castling
/// and double-step metadata. A promotion kind in the request is honoured,
/// and a promoting request without one promotes to a queen.
pub fn apply_checked_move(position: &Position, requested: &Move, side: Side) -> ChessResult<Position> {
    let matched = legal_moves(position, side)
        .into_iter()
        .find(|legal| legal == requested)
        .ok_or(ChessError::IllegalMove { mv: *requested })?;

    let mut chosen = matched;
    if matched.promotion.is_some() {
        chosen.promotion = Some(
            requested
                .promotion
                .filter(|kind| kind.is_promotion_target())
                .unwrap_or(PieceKind::Queen),
        );
    }

    Ok(apply_move(position, &chosen, side))
}

#[cfg(test)]
mod tests {
    use super::{apply_checked_move, apply_move};
    use crate::errors::ChessError;
    use crate::game_state::chess_types::{PieceKind, Side, Square};
    use crate::game_state::position::Position;
    use crate::move_generation::legal_move_generator::legal_moves;
    use crate::moves::chess_move::Move;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("square should parse")
    }

    fn mv(from: &str, to: &str) -> Move {
        Move::new(sq(from), sq(to))
    }

    fn play(position: &Position, side: Side, from: &str, to: &str) -> Position {
        apply_checked_move(position, &mv(from, to), side).expect("move should be legal")
    }

    #[test]
    fn apply_is_pure_and_deterministic() {
        let game = Position::new_game();
        let snapshot = game.clone();
        let a = apply_move(&game, &Move::double_step(sq("e2"), sq("e4")), Side::White);
        let b = apply_move(&game, &Move::double_step(sq("e2"), sq("e4")), Side::White);
        assert_eq!(game, snapshot);
        assert_eq!(a, b);
        assert_eq!(a.en_passant_target(), Some(sq("e3")));
        assert!(a.is_empty(sq("e2")));
        assert_eq!(a.kind_at(sq("e4")), Some(PieceKind::Pawn));
    }

    #[test]
    fn en_passant_only_on_the_following_move() {
        let game = Position::new_game();
        let game = play(&game, Side::White, "e2", "e4");
        let game = play(&game, Side::Black, "a7", "a6");
        let game = play(&game, Side::White, "e4", "e5");
        let game = play(&game, Side::Black, "d7", "d5");
        assert_eq!(game.en_passant_target(), Some(sq("d6")));

        let captured = play(&game, Side::White, "e5", "d6");
        assert!(captured.is_empty(sq("d5")));
        assert_eq!(captured.side_at(sq("d6")), Some(Side::White));
        assert_eq!(captured.en_passant_target(), None);

        let waited = play(&game, Side::White, "h2", "h3");
        let waited = play(&waited, Side::Black, "h7", "h6");
        assert!(matches!(
            apply_checked_move(&waited, &mv("e5", "d6"), Side::White),
            Err(ChessError::IllegalMove { .. })
        ));
    }

    #[test]
    fn castling_moves_the_rook() {
        let (game, side) =
            Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let castled = play(&game, side, "e1", "g1");
        assert_eq!(castled.kind_at(sq("g1")), Some(PieceKind::King));
        assert_eq!(castled.kind_at(sq("f1")), Some(PieceKind::Rook));
        assert!(castled.is_empty(sq("h1")));
        assert!(castled.is_empty(sq("e1")));

        let long = play(&castled, Side::Black, "e8", "c8");
        assert_eq!(long.kind_at(sq("d8")), Some(PieceKind::Rook));
        assert!(long.is_empty(sq("a8")));
    }

    #[test]
    fn castling_rights_are_lost_for_good() {
        let (game, _) =
            Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let game = play(&game, Side::White, "h1", "h2");
        let game = play(&game, Side::Black, "a8", "a7");
        let game = play(&game, Side::White, "h2", "h1");
        let game = play(&game, Side::Black, "a7", "a8");

        let rights = game.castling_rights();
        assert!(!rights.white_king_side && rights.white_queen_side);
        assert!(rights.black_king_side && !rights.black_queen_side);

        let castles: Vec<String> = legal_moves(&game, Side::White)
            .iter()
            .filter(|m| m.is_castling)
            .map(|m| m.to_string())
            .collect();
        assert_eq!(castles, ["e1c1"]);
    }

    #[test]
    fn king_walk_forfeits_both_castles() {
        let (game, _) =
            Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let game = play(&game, Side::White, "e1", "f1");
        let game = play(&game, Side::Black, "a8", "a7");
        let game = play(&game, Side::White, "f1", "e1");
        let game = play(&game, Side::Black, "a7", "a8");

        let rights = game.castling_rights();
        assert!(!rights.white_king_side && !rights.white_queen_side);
        assert!(legal_moves(&game, Side::White).iter().all(|m| !m.is_castling));
        assert!(apply_checked_move(&game, &mv("e1", "g1"), Side::White).is_err());
    }

    #[test]
    fn promotion_defaults_to_queen_and_honours_request() {
        let (game, side) =
            Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let queened = play(&game, side, "a7", "a8");
        assert_eq!(queened.kind_at(sq("a8")), Some(PieceKind::Queen));

        let knighted = apply_checked_move(
            &game,
            &Move::with_promotion(sq("a7"), sq("a8"), PieceKind::Knight),
            side,
        )
        .expect("underpromotion should be legal");
        assert_eq!(knighted.kind_at(sq("a8")), Some(PieceKind::Knight));
        assert!(knighted.is_empty(sq("a7")));
    }

    #[test]
    fn illegal_request_is_rejected() {
        let game = Position::new_game();
        let err = apply_checked_move(&game, &mv("e2", "e5"), Side::White)
            .expect_err("e2e5 is not legal");
        assert!(matches!(err, ChessError::IllegalMove { .. }));
        assert!(apply_checked_move(&game, &mv("e7", "e5"), Side::White).is_err());
    }
}
