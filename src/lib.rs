//! Crate root module declarations for the Ivory Chess engine.
//!
//! Exposes the board model, move generation, hashing, opening book, search
//! and xboard protocol handling so the binary, benches and tests can import
//! stable module paths.

pub mod errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod position;
}

pub mod moves {
    pub mod chess_move;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_masks;
    pub mod pawn_moves;
    pub mod slider_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod negamax;
    pub mod search_engine;
    pub mod threading;
    pub mod zobrist;
}

pub mod tables {
    pub mod opening_book;
    pub mod polyglot_keys;
}

pub mod xboard {
    pub mod xboard_top;
}

pub mod utils {
    pub mod algebraic;
    pub mod board_layout;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
}
