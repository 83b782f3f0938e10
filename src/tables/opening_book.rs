//! Polyglot opening-book support.
//!
//! A Polyglot book is a flat sequence of 16-byte big-endian records
//! `{key: u64, move: u16, weight: u16, learn: u32}`. Only the heaviest entry
//! per key is kept, so a lookup is a single hash probe.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use log::{info, warn};

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::chess_move::Move;
use crate::search::zobrist::compute_polyglot_key;

pub const BOOK_RECORD_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookEntry {
    pub key: u64,
    pub mv: Move,
    pub weight: u16,
    pub learn: u32,
}

#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    by_key: HashMap<u64, BookEntry>,
    rejected: usize,
}

impl OpeningBook {
    /// Read and decode a book file.
    pub fn load(path: impl AsRef<Path>) -> ChessResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ChessError::BookIo {
            path: path.to_path_buf(),
            source,
        })?;

        let book = Self::from_bytes(&bytes);
        info!(
            "loaded opening book {}: {} positions, {} records rejected",
            path.display(),
            book.len(),
            book.rejected
        );
        Ok(book)
    }

    /// Like [`OpeningBook::load`], but an absent or unreadable file yields an
    /// empty book.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(book) => book,
            Err(ChessError::BookIo { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                warn!("opening book {} not found; playing without book", path.display());
                Self::default()
            }
            Err(err) => {
                warn!("{err}; playing without book");
                Self::default()
            }
        }
    }

    /// Decode raw book bytes. A trailing partial record is ignored.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut book = Self::default();

        for record in bytes.chunks_exact(BOOK_RECORD_LEN) {
            let key = u64::from_be_bytes(fixed(&record[0..8]));
            let raw_move = u16::from_be_bytes(fixed(&record[8..10]));
            let weight = u16::from_be_bytes(fixed(&record[10..12]));
            let learn = u32::from_be_bytes(fixed(&record[12..16]));

            if raw_move == 0 || weight == 0 {
                continue;
            }

            let Some(mv) = decode_book_move(raw_move) else {
                book.rejected += 1;
                continue;
            };

            let entry = BookEntry {
                key,
                mv,
                weight,
                learn,
            };
            book.by_key
                .entry(key)
                .and_modify(|kept| {
                    if entry.weight > kept.weight {
                        *kept = entry;
                    }
                })
                .or_insert(entry);
        }

        book
    }

    /// The book move for `side` to play in `position`, if any.
    pub fn find(&self, position: &Position, side: Side) -> Option<Move> {
        self.entry(compute_polyglot_key(position, side)).map(|entry| entry.mv)
    }

    #[inline]
    pub fn entry(&self, key: u64) -> Option<&BookEntry> {
        self.by_key.get(&key)
    }

    /// Number of distinct positions in the book.
    #[inline]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Records dropped for carrying an unknown promotion code.
    #[inline]
    pub fn rejected(&self) -> usize {
        self.rejected
    }
}

/// Decode a Polyglot move word.
///
/// Castling is stored as king-takes-own-rook and is mapped back to the king's
/// real destination. Returns `None` for promotion codes above 4.
pub fn decode_book_move(raw: u16) -> Option<Move> {
    let to_file = (raw & 0x7) as u8;
    let to_rank = ((raw >> 3) & 0x7) as u8;
    let from_file = ((raw >> 6) & 0x7) as u8;
    let from_rank = ((raw >> 9) & 0x7) as u8;
    let promotion = match (raw >> 12) & 0x7 {
        0 => None,
        1 => Some(PieceKind::Knight),
        2 => Some(PieceKind::Bishop),
        3 => Some(PieceKind::Rook),
        4 => Some(PieceKind::Queen),
        _ => return None,
    };

    let from = Square::new(from_file, from_rank)?;
    let to = Square::new(to_file, to_rank)?;

    let is_castle = from_file == 4
        && from.rank() == to.rank()
        && (from_rank == 0 || from_rank == 7)
        && (to_file == 0 || to_file == 7);
    let castle_to = if is_castle {
        Square::new(if to_file == 7 { 6 } else { 2 }, from_rank)
    } else {
        None
    };
    if let Some(king_to) = castle_to {
        return Some(Move::castle(from, king_to));
    }

    Some(match promotion {
        Some(kind) => Move::with_promotion(from, to, kind),
        None => Move::new(from, to),
    })
}

/// Encode a move into a Polyglot move word. Castling moves use the
/// king-takes-rook form.
pub fn encode_book_move(mv: &Move) -> u16 {
    let to = if mv.is_castling {
        let rook_file = if mv.to.file() > mv.from.file() { 7 } else { 0 };
        Square::new(rook_file, mv.to.rank()).unwrap_or(mv.to)
    } else {
        mv.to
    };

    let promotion: u16 = match mv.promotion {
        Some(PieceKind::Knight) => 1,
        Some(PieceKind::Bishop) => 2,
        Some(PieceKind::Rook) => 3,
        Some(PieceKind::Queen) => 4,
        _ => 0,
    };

    (to.file() as u16)
        | (to.rank() as u16) << 3
        | (mv.from.file() as u16) << 6
        | (mv.from.rank() as u16) << 9
        | promotion << 12
}

fn fixed<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: u64, mv: u16, weight: u16) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(BOOK_RECORD_LEN);
        bytes.extend_from_slice(&key.to_be_bytes());
        bytes.extend_from_slice(&mv.to_be_bytes());
        bytes.extend_from_slice(&weight.to_be_bytes());
        bytes.extend_from_slice(&0u32.to_be_bytes());
        bytes
    }

    const START_KEY: u64 = 0x463b96181691fc9c;
    const E2E4: u16 = 796;
    const D2D4: u16 = 731;

    #[test]
    fn decodes_plain_castling_and_promotion_moves() {
        assert_eq!(decode_book_move(E2E4).map(|m| m.to_string()).as_deref(), Some("e2e4"));

        let castle = decode_book_move(263).expect("e1h1 should decode");
        assert!(castle.is_castling);
        assert_eq!(castle.to_string(), "e1g1");

        let promo = decode_book_move(19772).expect("e7e8q should decode");
        assert_eq!(promo.promotion, Some(PieceKind::Queen));
        assert_eq!(promo.to_string(), "e7e8q");

        assert_eq!(decode_book_move(E2E4 | (5 << 12)), None);
    }

    #[test]
    fn encode_matches_decode() {
        for raw in [E2E4, D2D4, 263, 19772] {
            let mv = decode_book_move(raw).expect("should decode");
            assert_eq!(encode_book_move(&mv), raw);
        }
    }

    #[test]
    fn heaviest_entry_wins_and_ties_keep_first() {
        let mut bytes = record(START_KEY, D2D4, 10);
        bytes.extend(record(START_KEY, E2E4, 30));
        bytes.extend(record(START_KEY, D2D4, 30));
        bytes.extend(record(7, D2D4, 5));
        bytes.extend(record(7, E2E4, 5));

        let book = OpeningBook::from_bytes(&bytes);
        assert_eq!(book.len(), 2);
        let start = book.entry(START_KEY).expect("start position should be booked");
        assert_eq!(start.mv.to_string(), "e2e4");
        assert_eq!(start.weight, 30);
        assert_eq!(book.entry(7).map(|e| e.mv.to_string()).as_deref(), Some("d2d4"));
    }

    #[test]
    fn skips_empty_rejected_and_truncated_records() {
        let mut bytes = record(1, 0, 10);
        bytes.extend(record(2, E2E4, 0));
        bytes.extend(record(3, E2E4 | (6 << 12), 10));
        bytes.extend(record(4, E2E4, 1));
        bytes.extend_from_slice(&[0xAB; 9]);

        let book = OpeningBook::from_bytes(&bytes);
        assert_eq!(book.len(), 1);
        assert_eq!(book.rejected(), 1);
        assert!(book.entry(4).is_some());
    }

    #[test]
    fn find_uses_the_polyglot_key() {
        let book = OpeningBook::from_bytes(&record(START_KEY, E2E4, 1));
        let game = Position::new_game();
        assert_eq!(
            book.find(&game, Side::White).map(|m| m.to_string()).as_deref(),
            Some("e2e4")
        );
        assert_eq!(book.find(&game, Side::Black), None);
    }

    #[test]
    fn missing_file_is_an_empty_book() {
        let path = std::env::temp_dir().join("ivory_chess_no_such_book.bin");
        assert!(matches!(OpeningBook::load(&path), Err(ChessError::BookIo { .. })));
        assert!(OpeningBook::load_or_empty(&path).is_empty());
    }

    #[test]
    fn load_reads_a_book_file() {
        let path = std::env::temp_dir().join(format!("ivory_chess_book_{}.bin", std::process::id()));
        fs::write(&path, record(START_KEY, E2E4, 3)).expect("temp book should be writable");
        let book = OpeningBook::load(&path).expect("book should load");
        let _ = fs::remove_file(&path);
        assert_eq!(book.len(), 1);
    }
}
