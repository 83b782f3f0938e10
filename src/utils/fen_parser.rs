//! FEN-to-Position parser.
//!
//! Kings and rooks are created as already moved; the castling field is what
//! marks a king and its rook as unmoved again.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{castles_for, CastleWing};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::utils::algebraic::algebraic_to_square;

/// Everything a FEN record carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFen {
    pub position: Position,
    pub side_to_move: Side,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

fn malformed(message: impl Into<String>) -> ChessError {
    ChessError::MalformedPosition(message.into())
}

pub fn parse_fen(fen: &str) -> ChessResult<ParsedFen> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let [board_part, side_part, castling_part, en_passant_part, halfmove_part, fullmove_part] =
        fields[..]
    else {
        return Err(malformed(format!(
            "FEN needs exactly 6 fields, got {}: {fen:?}",
            fields.len()
        )));
    };

    let mut cells = parse_board(board_part)?;
    let side_to_move = parse_side_to_move(side_part)?;
    apply_castling_field(castling_part, &mut cells)?;
    let en_passant_target = parse_en_passant_square(en_passant_part)?;
    let halfmove_clock = halfmove_part
        .parse::<u32>()
        .map_err(|_| malformed(format!("invalid halfmove clock: {halfmove_part}")))?;
    let fullmove_number = fullmove_part
        .parse::<u32>()
        .map_err(|_| malformed(format!("invalid fullmove number: {fullmove_part}")))?;

    Ok(ParsedFen {
        position: Position::from_cells(cells, en_passant_target),
        side_to_move,
        halfmove_clock,
        fullmove_number,
    })
}

fn parse_board(board_part: &str) -> ChessResult<[Option<Piece>; 64]> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(malformed("board layout must contain 8 ranks"));
    }

    let mut cells = [None; 64];
    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(malformed(format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as usize;
                continue;
            }

            let piece = piece_from_fen_char(ch)
                .ok_or_else(|| malformed(format!("invalid piece character '{ch}' in board layout")))?;

            if file >= 8 {
                return Err(malformed(format!("rank {} has too many files", board_rank + 1)));
            }

            cells[board_rank * 8 + file] = Some(piece.moved());
            file += 1;
        }

        if file != 8 {
            return Err(malformed(format!("rank {} does not sum to 8 files", board_rank + 1)));
        }
    }

    Ok(cells)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Side> {
    match side_part {
        "w" => Ok(Side::White),
        "b" => Ok(Side::Black),
        _ => Err(malformed(format!("invalid side-to-move field: {side_part}"))),
    }
}

fn apply_castling_field(castling_part: &str, cells: &mut [Option<Piece>; 64]) -> ChessResult<()> {
    if castling_part == "-" {
        return Ok(());
    }

    for ch in castling_part.chars() {
        let (side, wing) = match ch {
            'K' => (Side::White, CastleWing::KingSide),
            'Q' => (Side::White, CastleWing::QueenSide),
            'k' => (Side::Black, CastleWing::KingSide),
            'q' => (Side::Black, CastleWing::QueenSide),
            _ => return Err(malformed(format!("invalid castling rights character: {ch}"))),
        };

        let castle = castles_for(side)
            .iter()
            .find(|castle| castle.wing == wing)
            .ok_or_else(|| malformed(format!("no castling geometry for '{ch}'")))?;

        for (square, kind) in [
            (castle.king_from, PieceKind::King),
            (castle.rook_from, PieceKind::Rook),
        ] {
            match &mut cells[square.index()] {
                Some(piece) if piece.is(side, kind) => piece.has_moved = false,
                _ => {
                    return Err(malformed(format!(
                        "castling right '{ch}' needs a {side} {kind:?} on {square}"
                    )))
                }
            }
        }
    }

    Ok(())
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .map_err(|_| malformed(format!("invalid en-passant square: {en_passant_part}")))?;
    if square.rank() != 2 && square.rank() != 5 {
        return Err(malformed(format!(
            "en-passant square must be on rank 3 or 6: {en_passant_part}"
        )));
    }
    Ok(Some(square))
}

/// FEN piece letter to piece; uppercase is white.
pub fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let side = if ch.is_ascii_uppercase() {
        Side::White
    } else if ch.is_ascii_lowercase() {
        Side::Black
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(side, kind))
}
