use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::utils::algebraic::square_to_algebraic;

/// Render a position as FEN. The castling field is derived from the
/// has-moved flags of kings and rooks.
pub fn generate_fen(position: &Position, side_to_move: Side, halfmove_clock: u32, fullmove_number: u32) -> String {
    let board = generate_board_field(position);
    let side = match side_to_move {
        Side::White => "w",
        Side::Black => "b",
    };
    let castling = generate_castling_field(position.castling_rights());
    let en_passant = position
        .en_passant_target()
        .map(square_to_algebraic)
        .unwrap_or_else(|| "-".to_owned());

    format!("{board} {side} {castling} {en_passant} {halfmove_clock} {fullmove_number}")
}

fn generate_board_field(position: &Position) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            let piece = Square::new(file, rank).and_then(|sq| position.piece_at(sq));
            if let Some(piece) = piece {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece_to_fen_char(piece));
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let mut out = String::new();
    for (available, letter) in [
        (rights.white_king_side, 'K'),
        (rights.white_queen_side, 'Q'),
        (rights.black_king_side, 'k'),
        (rights.black_queen_side, 'q'),
    ] {
        if available {
            out.push(letter);
        }
    }

    if out.is_empty() {
        out.push('-');
    }
    out
}

/// FEN letter of a piece; uppercase is white.
pub fn piece_to_fen_char(piece: Piece) -> char {
    let base = match piece.kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };

    match piece.side {
        Side::White => base.to_ascii_uppercase(),
        Side::Black => base,
    }
}
