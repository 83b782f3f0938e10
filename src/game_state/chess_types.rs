//! Value types shared by every layer of the engine.
//!
//! Board geometry uses zero-based `(file, rank)` pairs with `(0, 0) == a1`;
//! the flat board index of a square is `rank * 8 + file`.

use std::fmt;

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Rank delta of a single pawn step.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    /// Rank holding the king and rooks at the start of the game.
    #[inline]
    pub const fn home_rank(self) -> u8 {
        match self {
            Side::White => 0,
            Side::Black => 7,
        }
    }

    #[inline]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Side::White => 1,
            Side::Black => 6,
        }
    }

    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Side::White => 7,
            Side::Black => 0,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => f.write_str("white"),
            Side::Black => f.write_str("black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Promotion choices in the order the generator expands them.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Whether a piece of this kind carries a meaningful has-moved flag.
    #[inline]
    pub const fn tracks_moved(self) -> bool {
        matches!(self, PieceKind::Rook | PieceKind::King)
    }

    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

/// Occupant of a board cell.
///
/// `has_moved` only matters for rooks and kings: it is what revokes castling
/// rights. Constructors keep it `false` for every other kind so equal boards
/// compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
    pub has_moved: bool,
}

impl Piece {
    #[inline]
    pub const fn new(side: Side, kind: PieceKind) -> Self {
        Self {
            side,
            kind,
            has_moved: false,
        }
    }

    /// The same piece after it has left its square.
    #[inline]
    pub const fn moved(self) -> Self {
        Self {
            side: self.side,
            kind: self.kind,
            has_moved: self.kind.tracks_moved(),
        }
    }

    #[inline]
    pub fn is(self, side: Side, kind: PieceKind) -> bool {
        self.side == side && self.kind == kind
    }
}

/// A board coordinate, always on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Build a square, rejecting coordinates outside `[0, 8)`.
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < 64 {
            Some(Self {
                file: (index % 8) as u8,
                rank: (index / 8) as u8,
            })
        } else {
            None
        }
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.rank as usize * 8 + self.file as usize
    }

    /// The square `(df, dr)` away, if it is still on the board.
    #[inline]
    pub const fn offset(self, df: i8, dr: i8) -> Option<Self> {
        let file = self.file as i8 + df;
        let rank = self.rank as i8 + dr;
        if file < 0 || file > 7 || rank < 0 || rank > 7 {
            return None;
        }
        Some(Self {
            file: file as u8,
            rank: rank as u8,
        })
    }

    /// All 64 squares in board-scan order (a1, b1, ..., h8).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).filter_map(Square::from_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            char::from(b'a' + self.file),
            char::from(b'1' + self.rank)
        )
    }
}

/// Castling rights as derived from the has-moved flags on the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CastlingRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastlingRights {
    #[inline]
    pub const fn none() -> Self {
        Self {
            white_king_side: false,
            white_queen_side: false,
            black_king_side: false,
            black_queen_side: false,
        }
    }
}

/// Check classification for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    None,
    Check,
    Checkmate,
}
