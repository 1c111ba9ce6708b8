//! A minimal perft (§8 "Testable Properties"): node counts driven
//! purely by `generate_legal_moves`/`play`/`undo`, used by the test
//! suite to check exact counts against known positions. No divide
//! breakdown or move-category tallying — that belongs to an external
//! driver, not the core (§1 Non-goals).

use crate::board::Board;
use crate::moves::{generate_legal_moves, play, undo};
use tracing::{debug, instrument};

/// Below this depth a `debug!` is worth the cost; deeper than that the
/// node count per call explodes and logging would dominate runtime.
const MAX_LOG_DEPTH: u32 = 2;

/// Counts leaf nodes reachable from `board` in exactly `depth` plies.
/// The span covers the whole call; only the outermost call is
/// instrumented; the recursive worker underneath stays uninstrumented
/// so a depth-6 run doesn't open millions of spans.
#[instrument(skip(board), fields(depth))]
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    let nodes = perft_recurse(board, depth);
    debug!(depth, nodes, "perft finished");
    nodes
}

fn perft_recurse(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal_moves(board);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in moves.iter() {
        play(board, mv);
        let child = perft_recurse(board, depth - 1);
        if depth <= MAX_LOG_DEPTH {
            debug!(%mv, depth, child, "perft: child node count");
        }
        nodes += child;
        undo(board, mv);
    }
    nodes
}
