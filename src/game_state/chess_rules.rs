//! Canonical chess-rule constants.
//!
//! Starting position literals and the fixed geometry of castling: home
//! squares of the king and rooks, where they land, and which squares must be
//! empty and safe.

use crate::game_state::chess_types::{Side, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Standard starting position in the raw layout alphabet (rank 8 first).
///
/// `H`/`h` are rooks and `A`/`a` kings that have not moved yet.
pub const STARTING_LAYOUT: &str = "hnbqabnh\
pppppppp\
........\
........\
........\
........\
PPPPPPPP\
HNBQABNH";

pub const KING_HOME_FILE: u8 = 4;

/// Castling wing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleWing {
    KingSide,
    QueenSide,
}

/// Fixed squares involved in one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleGeometry {
    pub wing: CastleWing,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    empty: [Option<Square>; 3],
}

impl CastleGeometry {
    /// Squares between king and rook that must be empty and unattacked.
    pub fn empty_squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.empty.iter().flatten().copied()
    }
}

const fn sq(file: u8, rank: u8) -> Square {
    match Square::new(file, rank) {
        Some(square) => square,
        None => panic!("castling square off the board"),
    }
}

const fn geometry(side: Side, wing: CastleWing) -> CastleGeometry {
    let rank = side.home_rank();
    match wing {
        CastleWing::QueenSide => CastleGeometry {
            wing,
            king_from: sq(KING_HOME_FILE, rank),
            king_to: sq(2, rank),
            rook_from: sq(0, rank),
            rook_to: sq(3, rank),
            empty: [Some(sq(1, rank)), Some(sq(2, rank)), Some(sq(3, rank))],
        },
        CastleWing::KingSide => CastleGeometry {
            wing,
            king_from: sq(KING_HOME_FILE, rank),
            king_to: sq(6, rank),
            rook_from: sq(7, rank),
            rook_to: sq(5, rank),
            empty: [Some(sq(5, rank)), Some(sq(6, rank)), None],
        },
    }
}

const WHITE_CASTLES: [CastleGeometry; 2] = [
    geometry(Side::White, CastleWing::QueenSide),
    geometry(Side::White, CastleWing::KingSide),
];
const BLACK_CASTLES: [CastleGeometry; 2] = [
    geometry(Side::Black, CastleWing::QueenSide),
    geometry(Side::Black, CastleWing::KingSide),
];

/// Both castling moves of a side, queen-side first.
#[inline]
pub fn castles_for(side: Side) -> &'static [CastleGeometry; 2] {
    match side {
        Side::White => &WHITE_CASTLES,
        Side::Black => &BLACK_CASTLES,
    }
}

#[inline]
pub fn king_home(side: Side) -> Square {
    sq(KING_HOME_FILE, side.home_rank())
}
