use std::path::PathBuf;

use thiserror::Error;

use crate::game_state::chess_types::Side;
use crate::moves::chess_move::Move;

/// Every error the engine core can report.
///
/// Input validation failures (`MalformedPosition`, `InvalidNotation`) are
/// meant to be propagated to whoever supplied the text; `IllegalMove` is
/// recoverable and leaves the caller's board untouched.
#[derive(Debug, Error)]
pub enum ChessError {
    /// The requested move is not among the legal moves of the position.
    #[error("illegal move: {mv}")]
    IllegalMove { mv: Move },

    /// A FEN string or raw board layout could not be turned into a position.
    #[error("malformed position: {0}")]
    MalformedPosition(String),

    /// A square or coordinate move could not be parsed.
    #[error("invalid notation: {0}")]
    InvalidNotation(String),

    /// King-safety was queried for a side that has no king on the board.
    #[error("no {0} king on the board")]
    MissingKing(Side),

    /// The opening book file exists but could not be read.
    #[error("failed reading opening book {path:?}: {source}")]
    BookIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type ChessResult<T> = Result<T, ChessError>;
