//! Raw 64-symbol board layout.
//!
//! One symbol per square, rank 8 first and files a to h. Besides the FEN
//! letters for pawns, knights, bishops and queens the alphabet spells out
//! the has-moved flag of rooks and kings:
//!
//! | symbol | piece          |
//! |--------|----------------|
//! | `.`    | empty          |
//! | `H h`  | unmoved rook   |
//! | `R r`  | moved rook     |
//! | `A a`  | unmoved king   |
//! | `Z z`  | moved king     |
//!
//! Any other character (whitespace, separators) is skipped.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

/// Decode a layout symbol. `Some(None)` is an empty square, `None` means the
/// character is not part of the alphabet.
fn symbol_to_cell(ch: char) -> Option<Option<Piece>> {
    let side = if ch.is_ascii_uppercase() {
        Side::White
    } else {
        Side::Black
    };

    let (kind, has_moved) = match ch {
        '.' => return Some(None),
        'P' | 'p' => (PieceKind::Pawn, false),
        'N' | 'n' => (PieceKind::Knight, false),
        'B' | 'b' => (PieceKind::Bishop, false),
        'Q' | 'q' => (PieceKind::Queen, false),
        'H' | 'h' => (PieceKind::Rook, false),
        'R' | 'r' => (PieceKind::Rook, true),
        'A' | 'a' => (PieceKind::King, false),
        'Z' | 'z' => (PieceKind::King, true),
        _ => return None,
    };

    Some(Some(Piece {
        side,
        kind,
        has_moved,
    }))
}

fn cell_to_symbol(cell: Option<Piece>) -> char {
    let Some(piece) = cell else {
        return '.';
    };

    let base = match (piece.kind, piece.has_moved) {
        (PieceKind::Pawn, _) => 'p',
        (PieceKind::Knight, _) => 'n',
        (PieceKind::Bishop, _) => 'b',
        (PieceKind::Queen, _) => 'q',
        (PieceKind::Rook, false) => 'h',
        (PieceKind::Rook, true) => 'r',
        (PieceKind::King, false) => 'a',
        (PieceKind::King, true) => 'z',
    };

    match piece.side {
        Side::White => base.to_ascii_uppercase(),
        Side::Black => base,
    }
}

/// Parse a layout. Fails unless exactly 64 recognised symbols are present.
pub fn parse_layout(layout: &str) -> ChessResult<Position> {
    let symbols: Vec<Option<Piece>> = layout.chars().filter_map(symbol_to_cell).collect();
    if symbols.len() != 64 {
        return Err(ChessError::MalformedPosition(format!(
            "board layout needs 64 squares, found {}",
            symbols.len()
        )));
    }

    let mut cells = [None; 64];
    for (i, cell) in symbols.into_iter().enumerate() {
        let rank = 7 - i / 8;
        let file = i % 8;
        cells[rank * 8 + file] = cell;
    }

    Ok(Position::from_cells(cells, None))
}

/// Write a position as 8 lines of 8 symbols, rank 8 first.
pub fn generate_layout(position: &Position) -> String {
    let mut lines = Vec::with_capacity(8);
    for rank in (0..8u8).rev() {
        let line: String = (0..8u8)
            .map(|file| cell_to_symbol(Square::new(file, rank).and_then(|sq| position.piece_at(sq))))
            .collect();
        lines.push(line);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::{generate_layout, parse_layout};
    use crate::errors::ChessError;
    use crate::game_state::chess_rules::STARTING_LAYOUT;
    use crate::game_state::chess_types::{PieceKind, Square};
    use crate::game_state::position::Position;

    #[test]
    fn starting_layout_matches_new_game() {
        let game = parse_layout(STARTING_LAYOUT).expect("layout should parse");
        assert_eq!(game, Position::new_game());
        assert_eq!(
            generate_layout(&game).lines().collect::<Vec<_>>(),
            STARTING_LAYOUT
                .as_bytes()
                .chunks(8)
                .map(|c| std::str::from_utf8(c).expect("ascii"))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn moved_flags_come_from_the_symbol() {
        let layout = "z......a\n\
                      ........\n\
                      ........\n\
                      ........\n\
                      ........\n\
                      ........\n\
                      ........\n\
                      R......H";
        let game = parse_layout(layout).expect("layout should parse");
        let a1 = game.piece_at(Square::new(0, 0).expect("a1")).expect("rook on a1");
        let h1 = game.piece_at(Square::new(7, 0).expect("h1")).expect("rook on h1");
        let a8 = game.piece_at(Square::new(0, 7).expect("a8")).expect("king on a8");
        assert_eq!(a1.kind, PieceKind::Rook);
        assert!(a1.has_moved);
        assert!(!h1.has_moved);
        assert!(a8.has_moved);
        assert_eq!(generate_layout(&game).replace('\n', ""), layout.replace(['\n', ' '], ""));
    }

    #[test]
    fn wrong_symbol_count_is_rejected() {
        assert!(matches!(
            parse_layout("........"),
            Err(ChessError::MalformedPosition(_))
        ));
        let too_many = format!("{STARTING_LAYOUT}.");
        assert!(matches!(parse_layout(&too_many), Err(ChessError::MalformedPosition(_))));
    }
}
