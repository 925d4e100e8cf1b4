//! "Perft" performance test: count the number of leaves at a given depth.
//! Useful for checking move generation against published counts.
//! See: http://www.aartbik.com/MISC/reversi.html

use crate::board::{BoardError, BoardState};

/// Count the leaves `depth` plies below the starting board of `size`.
/// A forced pass counts as a ply; a second consecutive pass ends the line.
pub fn run_perft(size: usize, depth: u64) -> Result<u64, BoardError> {
    Ok(leaves_below(&BoardState::new(size)?, depth, false))
}

fn leaves_below(state: &BoardState, depth: u64, passed: bool) -> u64 {
    // Leaf node for this depth
    if depth == 0 {
        return 1;
    }

    let all_moves = state.legal_moves(state.turn());
    if all_moves.is_empty() {
        // Both players passed: game is over
        if passed {
            return 1;
        }

        return leaves_below(&state.pass(), depth - 1, true);
    }

    all_moves
        .into_iter()
        .filter_map(|index| state.place(index).ok())
        .map(|next| leaves_below(&next, depth - 1, false))
        .sum()
}
