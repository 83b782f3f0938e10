//! Terminal board renderer.
//!
//! Ranks are drawn top-down from rank 8 with file letters above and below.
//! Pieces use FEN letters, or chess glyphs when `unicode` is set.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::utils::fen_generator::piece_to_fen_char;

pub fn render_board(position: &Position, unicode: bool) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for file in 0..8u8 {
            let piece = Square::new(file, rank).and_then(|sq| position.piece_at(sq));
            out.push(match piece {
                Some(piece) if unicode => piece_to_unicode(piece),
                Some(piece) => piece_to_fen_char(piece),
                None if unicode => '·',
                None => '.',
            });

            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.side, piece.kind) {
        (Side::White, PieceKind::King) => '♔',
        (Side::White, PieceKind::Queen) => '♕',
        (Side::White, PieceKind::Rook) => '♖',
        (Side::White, PieceKind::Bishop) => '♗',
        (Side::White, PieceKind::Knight) => '♘',
        (Side::White, PieceKind::Pawn) => '♙',
        (Side::Black, PieceKind::King) => '♚',
        (Side::Black, PieceKind::Queen) => '♛',
        (Side::Black, PieceKind::Rook) => '♜',
        (Side::Black, PieceKind::Bishop) => '♝',
        (Side::Black, PieceKind::Knight) => '♞',
        (Side::Black, PieceKind::Pawn) => '♟',
    }
}

#[cfg(test)]
mod tests {
    use super::render_board;
    use crate::game_state::position::Position;

    #[test]
    fn renders_start_position_in_ascii() {
        let text = render_board(&Position::new_game(), false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[1], "8 r n b q k b n r 8");
        assert_eq!(lines[5], "4 . . . . . . . . 4");
        assert_eq!(lines[8], "1 R N B Q K B N R 1");
    }

    #[test]
    fn renders_glyphs_when_asked() {
        let text = render_board(&Position::new_game(), true);
        assert!(text.contains('♔'));
        assert!(text.contains('♟'));
        assert!(text.contains('·'));
    }
}
