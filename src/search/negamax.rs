//! Fixed-depth negamax with alpha-beta pruning.
//!
//! Scores are always from the perspective of the side to move at the node.

use crate::game_state::chess_types::Side;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::search::board_scoring::{BoardScorer, MaterialScorer};

/// Bound wider than any reachable score.
pub const SCORE_INFINITY: i32 = 1_000_000;

/// Base score of a checkmate; the remaining depth is added on top so nearer
/// mates are preferred.
pub const MATE_SCORE: i32 = 100_000;

/// Score of a node with no legal moves: mated or stalemated.
#[inline]
pub fn terminal_score(position: &Position, side: Side, depth: u8) -> i32 {
    if is_king_in_check(position, side) {
        -(MATE_SCORE + i32::from(depth))
    } else {
        0
    }
}

/// Negamax value of `position` for `side`, material-scored at the horizon.
pub fn negamax(position: &Position, side: Side, alpha: i32, beta: i32, depth: u8) -> i32 {
    negamax_with(&MaterialScorer, position, side, alpha, beta, depth)
}

pub fn negamax_with<S: BoardScorer + ?Sized>(
    scorer: &S,
    position: &Position,
    side: Side,
    mut alpha: i32,
    beta: i32,
    depth: u8,
) -> i32 {
    if depth == 0 {
        return scorer.score(position, side);
    }

    let moves = generate_legal_moves(position, side);
    if moves.is_empty() {
        return terminal_score(position, side, depth);
    }

    let mut best = -SCORE_INFINITY;
    for child in moves {
        let score = -negamax_with(
            scorer,
            &child.position_after,
            side.opponent(),
            -beta,
            -alpha,
            depth - 1,
        );

        best = best.max(score);
        alpha = alpha.max(score);
        if alpha >= beta {
            break;
        }
    }

    best
}

/// Full-width minimax in negamax form, no pruning.
///
/// Reference for checking that pruning never changes a root value.
pub fn minimax(position: &Position, side: Side, depth: u8) -> i32 {
    if depth == 0 {
        return MaterialScorer.score(position, side);
    }

    let moves = generate_legal_moves(position, side);
    if moves.is_empty() {
        return terminal_score(position, side, depth);
    }

    moves
        .iter()
        .map(|child| -minimax(&child.position_after, side.opponent(), depth - 1))
        .max()
        .unwrap_or(-SCORE_INFINITY)
}
