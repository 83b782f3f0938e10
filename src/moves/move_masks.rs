//! Compile-time jump tables stored as 64-bit square sets.

use crate::game_state::chess_types::Square;

/// Build a per-square target set from a list of `(file, rank)` offsets.
pub const fn jump_table(offsets: &[(i8, i8)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i8;
        let rank = (sq / 8) as i8;
        let mut targets = 0u64;
        let mut i = 0usize;
        while i < offsets.len() {
            targets |= set_if_valid(file + offsets[i].0, rank + offsets[i].1);
            i += 1;
        }
        table[sq] = targets;
        sq += 1;
    }

    table
}

const fn set_if_valid(file: i8, rank: i8) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }

    let square = (rank as usize) * 8 + (file as usize);
    1u64 << square
}

/// Iterate the squares of a set in ascending board-index order.
pub fn mask_squares(mut mask: u64) -> impl Iterator<Item = Square> {
    std::iter::from_fn(move || {
        if mask == 0 {
            return None;
        }
        let index = mask.trailing_zeros() as usize;
        mask &= mask - 1;
        Square::from_index(index)
    })
}
