//! Immutable board position.
//!
//! `Position` is a plain value: 64 cells plus the en-passant target left by
//! the previous half-move. Side to move is not part of it; callers carry it
//! alongside. New positions are only ever produced by the move applier.

use crate::errors::ChessResult;
use crate::game_state::chess_rules::{castles_for, CastleWing};
use crate::game_state::chess_types::*;
use crate::utils::board_layout::{generate_layout, parse_layout};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    cells: [Option<Piece>; 64],
    en_passant_target: Option<Square>,
}

impl Default for Position {
    fn default() -> Self {
        Self::new_game()
    }
}

impl Position {
    /// A board with no pieces at all.
    #[inline]
    pub const fn new_empty() -> Self {
        Self {
            cells: [None; 64],
            en_passant_target: None,
        }
    }

    /// The standard initial layout, kings and rooks unmoved.
    pub fn new_game() -> Self {
        let mut cells = [None; 64];
        for (file, kind) in BACK_RANK.iter().enumerate() {
            cells[file] = Some(Piece::new(Side::White, *kind));
            cells[8 + file] = Some(Piece::new(Side::White, PieceKind::Pawn));
            cells[48 + file] = Some(Piece::new(Side::Black, PieceKind::Pawn));
            cells[56 + file] = Some(Piece::new(Side::Black, *kind));
        }
        Self {
            cells,
            en_passant_target: None,
        }
    }

    #[inline]
    pub const fn from_cells(cells: [Option<Piece>; 64], en_passant_target: Option<Square>) -> Self {
        Self {
            cells,
            en_passant_target,
        }
    }

    /// Parse a FEN-like string, returning the position and the side to move.
    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<(Self, Side)> {
        parse_fen(fen).map(|parsed| (parsed.position, parsed.side_to_move))
    }

    /// Parse a raw 64-symbol layout (rank 8 first).
    #[inline]
    pub fn from_layout(layout: &str) -> ChessResult<Self> {
        parse_layout(layout)
    }

    #[inline]
    pub fn to_fen(&self, side_to_move: Side) -> String {
        generate_fen(self, side_to_move, 0, 1)
    }

    #[inline]
    pub fn to_layout(&self) -> String {
        generate_layout(self)
    }

    #[inline]
    pub fn cells(&self) -> &[Option<Piece>; 64] {
        &self.cells
    }

    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells[square.index()]
    }

    #[inline]
    pub fn side_at(&self, square: Square) -> Option<Side> {
        self.piece_at(square).map(|piece| piece.side)
    }

    #[inline]
    pub fn kind_at(&self, square: Square) -> Option<PieceKind> {
        self.piece_at(square).map(|piece| piece.kind)
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.cells[square.index()].is_none()
    }

    #[inline]
    pub fn is_occupied_by(&self, square: Square, side: Side) -> bool {
        self.side_at(square) == Some(side)
    }

    /// First king of `side` in board-scan order.
    pub fn find_king(&self, side: Side) -> Option<Square> {
        Square::all().find(|sq| {
            self.piece_at(*sq)
                .is_some_and(|piece| piece.is(side, PieceKind::King))
        })
    }

    /// Squares holding pieces of `side`, in board-scan order.
    pub fn squares_of(&self, side: Side) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(move |sq| self.is_occupied_by(*sq, side))
    }

    /// Whether `square` holds an unmoved piece of the given kind and side.
    #[inline]
    pub fn holds_unmoved(&self, square: Square, side: Side, kind: PieceKind) -> bool {
        self.piece_at(square)
            .is_some_and(|piece| piece.is(side, kind) && !piece.has_moved)
    }

    /// Castling rights implied by the has-moved flags.
    ///
    /// This only looks at piece placement; whether castling is playable right
    /// now (empty and safe path) is decided by the move generator.
    pub fn castling_rights(&self) -> CastlingRights {
        let mut rights = CastlingRights::none();
        for side in [Side::White, Side::Black] {
            for castle in castles_for(side) {
                let available = self.holds_unmoved(castle.king_from, side, PieceKind::King)
                    && self.holds_unmoved(castle.rook_from, side, PieceKind::Rook);
                match (side, castle.wing) {
                    (Side::White, CastleWing::KingSide) => rights.white_king_side = available,
                    (Side::White, CastleWing::QueenSide) => rights.white_queen_side = available,
                    (Side::Black, CastleWing::KingSide) => rights.black_king_side = available,
                    (Side::Black, CastleWing::QueenSide) => rights.black_queen_side = available,
                }
            }
        }
        rights
    }
}
