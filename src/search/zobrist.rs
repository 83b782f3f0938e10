//! Zobrist hashing over the Polyglot key table.
//!
//! Keys are XOR sums of fixed constants, so two positions with the same
//! pieces, castling rights, en-passant file and side to move always hash
//! identically however they were reached.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::pawn_moves::pawn_attacker_squares;
use crate::tables::polyglot_keys::{
    CASTLING_KEYS_OFFSET, EN_PASSANT_KEYS_OFFSET, PIECE_KEYS_OFFSET, POLYGLOT_RANDOM_64,
    WHITE_TO_MOVE_KEY_INDEX,
};

/// Key of a piece standing on a square.
///
/// Polyglot interleaves colours per piece type, black first.
#[inline]
pub fn piece_square_key(piece: Piece, square: Square) -> u64 {
    let colour_bit = match piece.side {
        Side::White => 1,
        Side::Black => 0,
    };
    let kind = 2 * piece.kind.index() + colour_bit;
    POLYGLOT_RANDOM_64[PIECE_KEYS_OFFSET + 64 * kind + square.index()]
}

/// XOR of the keys of every castling right still available.
#[inline]
pub fn castling_key(rights: CastlingRights) -> u64 {
    [
        rights.white_king_side,
        rights.white_queen_side,
        rights.black_king_side,
        rights.black_queen_side,
    ]
    .iter()
    .enumerate()
    .filter(|(_, available)| **available)
    .fold(0, |key, (i, _)| key ^ POLYGLOT_RANDOM_64[CASTLING_KEYS_OFFSET + i])
}

#[inline]
pub fn en_passant_file_key(file: u8) -> u64 {
    POLYGLOT_RANDOM_64[EN_PASSANT_KEYS_OFFSET + file as usize]
}

#[inline]
pub fn white_to_move_key() -> u64 {
    POLYGLOT_RANDOM_64[WHITE_TO_MOVE_KEY_INDEX]
}

fn placement_key(position: &Position, side_to_move: Side) -> u64 {
    let mut key = 0u64;

    for square in Square::all() {
        if let Some(piece) = position.piece_at(square) {
            key ^= piece_square_key(piece, square);
        }
    }

    key ^= castling_key(position.castling_rights());

    if side_to_move == Side::White {
        key ^= white_to_move_key();
    }

    key
}

/// Full position key. The en-passant file is folded in whenever a target
/// square exists.
pub fn compute_zobrist_key(position: &Position, side_to_move: Side) -> u64 {
    let mut key = placement_key(position, side_to_move);
    if let Some(target) = position.en_passant_target() {
        key ^= en_passant_file_key(target.file());
    }
    key
}

/// Polyglot book key.
///
/// Same as [`compute_zobrist_key`] except that the en-passant file only
/// counts when a pawn of the side to move could actually capture onto the
/// target square.
pub fn compute_polyglot_key(position: &Position, side_to_move: Side) -> u64 {
    let mut key = placement_key(position, side_to_move);
    if let Some(target) = position.en_passant_target() {
        if en_passant_capturable(position, side_to_move, target) {
            key ^= en_passant_file_key(target.file());
        }
    }
    key
}

fn en_passant_capturable(position: &Position, side_to_move: Side, target: Square) -> bool {
    pawn_attacker_squares(side_to_move.opponent(), target)
        .into_iter()
        .flatten()
        .any(|sq| {
            position
                .piece_at(sq)
                .is_some_and(|piece| piece.is(side_to_move, PieceKind::Pawn))
        })
}
