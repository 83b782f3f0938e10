//! Best-move selection: opening book first, then a fixed-depth root search.
//!
//! Every root candidate is scored with a full-window negamax on its own, so
//! candidates can be evaluated in parallel and the root sees exact scores
//! for the tie-break.

use std::sync::Arc;

use log::{debug, warn};
use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::errors::ChessResult;
use crate::game_state::chess_types::{CheckStatus, Side};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::check_status;
use crate::move_generation::legal_move_generator::{generate_legal_moves, GeneratedMove};
use crate::moves::chess_move::Move;
use crate::search::negamax::{negamax, SCORE_INFINITY};
use crate::search::threading::WorkerPool;
use crate::tables::opening_book::OpeningBook;

pub const DEFAULT_SEARCH_DEPTH: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched from the root; values below 1 behave as 1.
    pub depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_SEARCH_DEPTH,
        }
    }
}

/// Score of one root candidate.
#[derive(Debug, Clone)]
pub struct RootEvaluation {
    pub mv: Move,
    pub score: i32,
    pub position_after: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    Book,
    Search,
    NoLegalMoves,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best_move: Option<Move>,
    /// Root score of the chosen move; absent for book moves and when there is
    /// no move at all.
    pub score: Option<i32>,
    pub source: MoveSource,
    /// Number of legal root moves considered.
    pub candidates: usize,
}

#[derive(Debug)]
pub struct SearchEngine {
    config: SearchConfig,
    book: Option<Arc<OpeningBook>>,
    pool: WorkerPool,
}

impl SearchEngine {
    pub fn new(config: SearchConfig, book: Option<Arc<OpeningBook>>, pool: WorkerPool) -> Self {
        Self { config, book, pool }
    }

    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    #[inline]
    pub fn set_depth(&mut self, depth: u8) {
        self.config.depth = depth;
    }

    #[inline]
    pub fn book(&self) -> Option<&OpeningBook> {
        self.book.as_deref()
    }

    /// Score every legal root move of `side`, in generation order.
    pub fn evaluate_root(&self, position: &Position, side: Side) -> Vec<RootEvaluation> {
        let candidates = generate_legal_moves(position, side);
        self.score_candidates(&candidates, side)
    }

    fn score_candidates(&self, candidates: &[GeneratedMove], side: Side) -> Vec<RootEvaluation> {
        let child_depth = self.config.depth.max(1) - 1;
        let opponent = side.opponent();

        self.pool.map_collect(candidates, |child| RootEvaluation {
            mv: child.mv,
            score: -negamax(
                &child.position_after,
                opponent,
                -SCORE_INFINITY,
                SCORE_INFINITY,
                child_depth,
            ),
            position_after: child.position_after.clone(),
        })
    }

    /// Pick a move for `side`.
    ///
    /// Among equally scored candidates the first one that checks or mates
    /// the opponent wins; otherwise `rng` picks uniformly.
    pub fn best_move<R: Rng + ?Sized>(
        &self,
        position: &Position,
        side: Side,
        rng: &mut R,
    ) -> ChessResult<SearchOutcome> {
        let candidates = generate_legal_moves(position, side);

        if let Some(mv) = self.book_move(position, side, &candidates) {
            debug!("book hit for {side}: {mv}");
            return Ok(SearchOutcome {
                best_move: Some(mv),
                score: None,
                source: MoveSource::Book,
                candidates: candidates.len(),
            });
        }

        if candidates.is_empty() {
            return Ok(SearchOutcome {
                best_move: None,
                score: None,
                source: MoveSource::NoLegalMoves,
                candidates: 0,
            });
        }

        let evaluations = self.score_candidates(&candidates, side);
        let best_score = evaluations
            .iter()
            .map(|eval| eval.score)
            .max()
            .unwrap_or(-SCORE_INFINITY);
        let best: Vec<&RootEvaluation> = evaluations
            .iter()
            .filter(|eval| eval.score == best_score)
            .collect();

        let chosen = if best.len() == 1 {
            best[0]
        } else {
            match first_checking(&best, side.opponent())? {
                Some(eval) => eval,
                None => best.choose(rng).copied().unwrap_or(best[0]),
            }
        };

        debug!(
            "searched {} moves for {side} at depth {}: best {} scores {} ({} tied)",
            evaluations.len(),
            self.config.depth,
            chosen.mv,
            best_score,
            best.len()
        );

        Ok(SearchOutcome {
            best_move: Some(chosen.mv),
            score: Some(best_score),
            source: MoveSource::Search,
            candidates: evaluations.len(),
        })
    }

    fn book_move(&self, position: &Position, side: Side, candidates: &[GeneratedMove]) -> Option<Move> {
        let book_move = self.book.as_ref()?.find(position, side)?;

        let legal = candidates
            .iter()
            .map(|child| child.mv)
            .find(|mv| *mv == book_move && (book_move.promotion.is_none() || mv.promotion == book_move.promotion));

        if legal.is_none() {
            warn!("ignoring book move {book_move}: not legal for {side}");
        }
        legal
    }
}

fn first_checking<'a>(
    best: &[&'a RootEvaluation],
    opponent: Side,
) -> ChessResult<Option<&'a RootEvaluation>> {
    for eval in best {
        match check_status(&eval.position_after, opponent)? {
            CheckStatus::Check | CheckStatus::Checkmate => return Ok(Some(eval)),
            CheckStatus::None => {}
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{MoveSource, SearchConfig, SearchEngine};
    use crate::game_state::chess_types::Side;
    use crate::game_state::position::Position;
    use crate::search::negamax::MATE_SCORE;
    use crate::search::threading::{ThreadingConfig, WorkerPool};
    use crate::tables::opening_book::OpeningBook;

    fn engine(depth: u8) -> SearchEngine {
        SearchEngine::new(SearchConfig { depth }, None, WorkerPool::sequential())
    }

    fn best(engine: &SearchEngine, fen: &str, seed: u64) -> super::SearchOutcome {
        let (game, side) = Position::from_fen(fen).expect("FEN should parse");
        let mut rng = StdRng::seed_from_u64(seed);
        engine.best_move(&game, side, &mut rng).expect("search should succeed")
    }

    fn book_with(key: u64, mv: u16) -> Arc<OpeningBook> {
        let mut bytes = key.to_be_bytes().to_vec();
        bytes.extend_from_slice(&mv.to_be_bytes());
        bytes.extend_from_slice(&1u16.to_be_bytes());
        bytes.extend_from_slice(&0u32.to_be_bytes());
        Arc::new(OpeningBook::from_bytes(&bytes))
    }

    #[test]
    fn captures_hanging_queen() {
        let outcome = best(&engine(2), "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1", 1);
        assert_eq!(outcome.source, MoveSource::Search);
        assert_eq!(outcome.best_move.map(|m| m.to_string()).as_deref(), Some("e4d5"));
    }

    #[test]
    fn finds_mate_in_one() {
        let outcome = best(&engine(2), "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 1);
        assert_eq!(outcome.best_move.map(|m| m.to_string()).as_deref(), Some("a1a8"));
        assert_eq!(outcome.score, Some(MATE_SCORE + 1));
    }

    #[test]
    fn ties_prefer_the_first_checking_move() {
        for seed in 0..8 {
            let outcome = best(&engine(1), "4k3/8/8/8/8/8/8/R3K3 w - - 0 1", seed);
            assert_eq!(outcome.best_move.map(|m| m.to_string()).as_deref(), Some("a1a8"));
            assert_eq!(outcome.score, Some(500));
        }
    }

    #[test]
    fn seeded_rng_reproduces_choices() {
        let engine = engine(1);
        let start = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let a = best(&engine, start, 42);
        let b = best(&engine, start, 42);
        assert_eq!(a.best_move, b.best_move);
        assert_eq!(a.candidates, 20);
        assert_eq!(a.score, Some(0));
    }

    #[test]
    fn parallel_and_sequential_scores_agree() {
        let (game, side) =
            Position::from_fen("r3k2r/ppp2ppp/2n5/3qp3/3P4/2N5/PPP2PPP/R2QK2R w KQkq - 0 1")
                .expect("FEN should parse");
        let sequential = engine(2);
        let parallel = SearchEngine::new(
            SearchConfig { depth: 2 },
            None,
            WorkerPool::new(ThreadingConfig::with_threads(4)),
        );

        let a: Vec<(String, i32)> = sequential
            .evaluate_root(&game, side)
            .into_iter()
            .map(|e| (e.mv.to_string(), e.score))
            .collect();
        let b: Vec<(String, i32)> = parallel
            .evaluate_root(&game, side)
            .into_iter()
            .map(|e| (e.mv.to_string(), e.score))
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn book_move_is_played_with_full_metadata() {
        let engine = SearchEngine::new(
            SearchConfig::default(),
            Some(book_with(0x463b96181691fc9c, 796)),
            WorkerPool::sequential(),
        );
        let mut rng = StdRng::seed_from_u64(0);
        let outcome = engine
            .best_move(&Position::new_game(), Side::White, &mut rng)
            .expect("search should succeed");
        assert_eq!(outcome.source, MoveSource::Book);
        assert_eq!(outcome.score, None);
        let mv = outcome.best_move.expect("book move");
        assert_eq!(mv.to_string(), "e2e4");
        assert!(mv.is_en_passant_setup);
    }

    #[test]
    fn illegal_book_move_falls_back_to_search() {
        // e2e5 is not a legal move from the start position.
        let engine = SearchEngine::new(
            SearchConfig { depth: 1 },
            Some(book_with(0x463b96181691fc9c, 804)),
            WorkerPool::sequential(),
        );
        let mut rng = StdRng::seed_from_u64(0);
        let outcome = engine
            .best_move(&Position::new_game(), Side::White, &mut rng)
            .expect("search should succeed");
        assert_eq!(outcome.source, MoveSource::Search);
        assert!(outcome.best_move.is_some());
    }

    #[test]
    fn mated_side_has_no_move() {
        let outcome = best(
            &engine(3),
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
            0,
        );
        assert_eq!(outcome.source, MoveSource::NoLegalMoves);
        assert_eq!(outcome.best_move, None);
        assert_eq!(outcome.candidates, 0);
    }
}
