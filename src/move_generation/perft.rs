//! Perft node counting for validating move generation.
//!
//! Counts leaf nodes of the legal move tree, optionally classifying the
//! leaf moves the way standard perft tables do.

use rayon::prelude::*;

use crate::game_state::chess_types::{CheckStatus, PieceKind, Side};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::check_status;
use crate::move_generation::legal_move_generator::{generate_legal_moves, GeneratedMove};
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Number of leaf nodes `depth` plies below `position`.
pub fn perft(position: &Position, side: Side, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal_moves(position, side);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|child| perft(&child.position_after, side.opponent(), depth - 1))
        .sum()
}

/// Per-root-move node counts, root moves in generation order.
pub fn perft_divide(position: &Position, side: Side, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    generate_legal_moves(position, side)
        .into_par_iter()
        .map(|child| {
            let nodes = perft(&child.position_after, side.opponent(), depth - 1);
            (child.mv, nodes)
        })
        .collect()
}

/// Leaf counts with capture, en-passant, castle, promotion, check and mate
/// breakdowns.
pub fn perft_counts(position: &Position, side: Side, depth: u8) -> PerftCounts {
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.nodes = 1;
        return total;
    }

    let per_root: Vec<PerftCounts> = generate_legal_moves(position, side)
        .par_iter()
        .map(|child| {
            let mut local = PerftCounts::default();
            perft_recurse(position, side, child, depth, 1, &mut local);
            local
        })
        .collect();

    for local in per_root {
        total.merge(local);
    }
    total
}

fn perft_recurse(
    parent: &Position,
    side: Side,
    child: &GeneratedMove,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) {
    if current_depth == search_depth {
        classify_leaf(parent, side, child, counts);
        return;
    }

    let opponent = side.opponent();
    for grandchild in generate_legal_moves(&child.position_after, opponent) {
        perft_recurse(
            &child.position_after,
            opponent,
            &grandchild,
            search_depth,
            current_depth + 1,
            counts,
        );
    }
}

fn classify_leaf(parent: &Position, side: Side, child: &GeneratedMove, counts: &mut PerftCounts) {
    let mv = &child.mv;
    counts.nodes += 1;

    let is_pawn = parent.kind_at(mv.from) == Some(PieceKind::Pawn);
    let en_passant = is_pawn && parent.en_passant_target() == Some(mv.to);
    if en_passant {
        counts.en_passant += 1;
    }
    if en_passant || parent.is_occupied_by(mv.to, side.opponent()) {
        counts.captures += 1;
    }
    if mv.is_castling {
        counts.castles += 1;
    }
    if mv.promotion.is_some() {
        counts.promotions += 1;
    }

    match check_status(&child.position_after, side.opponent()) {
        Ok(CheckStatus::Check) => counts.checks += 1,
        Ok(CheckStatus::Checkmate) => {
            counts.checks += 1;
            counts.checkmates += 1;
        }
        Ok(CheckStatus::None) | Err(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::{perft, perft_counts, perft_divide};
    use crate::game_state::chess_types::Side;
    use crate::game_state::position::Position;

    #[test]
    fn start_position_perft() {
        let game = Position::new_game();
        assert_eq!(perft(&game, Side::White, 1), 20);
        assert_eq!(perft(&game, Side::White, 2), 400);
        assert_eq!(perft(&game, Side::White, 3), 8902);
    }

    #[test]
    fn rook_and_pawn_endgame_perft() {
        let (game, side) = Position::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1")
            .expect("FEN should parse");
        assert_eq!(perft(&game, side, 1), 14);
        assert_eq!(perft(&game, side, 2), 191);
        assert_eq!(perft(&game, side, 3), 2812);
    }

    #[test]
    fn start_position_breakdown_at_depth_three() {
        let counts = perft_counts(&Position::new_game(), Side::White, 3);
        assert_eq!(counts.nodes, 8902);
        assert_eq!(counts.captures, 34);
        assert_eq!(counts.checks, 12);
        assert_eq!(counts.checkmates, 0);
        assert_eq!(counts.en_passant, 0);
    }

    #[test]
    fn divide_sums_to_perft() {
        let game = Position::new_game();
        let divided = perft_divide(&game, Side::White, 2);
        assert_eq!(divided.len(), 20);
        assert!(divided.iter().all(|(_, nodes)| *nodes == 20));
        assert_eq!(divided.iter().map(|(_, n)| n).sum::<u64>(), 400);
    }

    #[test]
    fn depth_zero_counts_the_root() {
        let game = Position::new_game();
        assert_eq!(perft(&game, Side::White, 0), 1);
        assert_eq!(perft_counts(&game, Side::White, 0).nodes, 1);
    }
}
