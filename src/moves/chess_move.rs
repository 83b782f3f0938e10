//! Move value type.
//!
//! A move is identified by its `(from, to)` pair. Promotion, castling and the
//! double-step flag ride along as data so a bare coordinate request can be
//! matched against a fully described generated move.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::game_state::chess_types::{PieceKind, Square};

#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub is_en_passant_setup: bool,
    pub is_castling: bool,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
            is_en_passant_setup: false,
            is_castling: false,
        }
    }

    #[inline]
    pub const fn with_promotion(from: Square, to: Square, kind: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(kind),
            is_en_passant_setup: false,
            is_castling: false,
        }
    }

    /// A pawn's initial two-square advance.
    #[inline]
    pub const fn double_step(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
            is_en_passant_setup: true,
            is_castling: false,
        }
    }

    /// A king move that also relocates a rook.
    #[inline]
    pub const fn castle(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
            is_en_passant_setup: false,
            is_castling: true,
        }
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
    }
}

/// Coordinate notation, e.g. `e2e4` or `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            let letter = match kind {
                PieceKind::Knight => 'n',
                PieceKind::Bishop => 'b',
                PieceKind::Rook => 'r',
                _ => 'q',
            };
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Move;
    use crate::game_state::chess_types::{PieceKind, Square};

    #[test]
    fn equality_ignores_carried_metadata() {
        let e7 = Square::new(4, 6).expect("e7");
        let e8 = Square::new(4, 7).expect("e8");
        let plain = Move::new(e7, e8);
        let promo = Move::with_promotion(e7, e8, PieceKind::Queen);
        assert_eq!(plain, promo);
        assert_eq!(promo.to_string(), "e7e8q");
        assert_eq!(plain.to_string(), "e7e8");
    }
}
