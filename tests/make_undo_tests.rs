//! `play` then `undo` must be a perfect inverse (§4.3): board equality,
//! not just piece placement, across a spread of move kinds and a
//! randomized walk so the law holds deep into a game tree, not just at
//! the first ply.

use vantage::{Board, generate_legal_moves, play, undo};

fn assert_inverse(fen: &str) {
    let mut board: Board = fen.parse().unwrap();
    let before = board.clone();
    let moves = generate_legal_moves(&board);
    for mv in moves.iter() {
        play(&mut board, mv);
        undo(&mut board, mv);
        assert_eq!(board, before, "play/undo did not invert for {mv:?} on {fen}");
    }
}

#[cfg(not(feature = "atomic"))]
#[test]
fn inverts_every_legal_move_from_a_spread_of_positions() {
    for fen in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1",
        "k6r/6P1/8/8/8/8/8/4K3 w - - 0 1",
        "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
    ] {
        assert_inverse(fen);
    }
}

#[cfg(feature = "atomic")]
#[test]
fn inverts_every_legal_move_under_atomic_rules() {
    for fen in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1",
    ] {
        assert_inverse(fen);
    }
}

#[test]
fn a_deep_randomized_walk_preserves_zobrist_parity() {
    let mut board = Board::new();
    // Deterministic "random" move selection: no RNG crate dependency
    // needed since we only need varied coverage, not true randomness.
    let mut counter = 7u64;
    for _ in 0..300 {
        let moves = generate_legal_moves(&board);
        if moves.is_empty() {
            break;
        }
        counter = counter.wrapping_mul(6364136223846793005).wrapping_add(1);
        let mv = moves[(counter as usize) % moves.len()];

        assert_eq!(board.zobrist, board.compute_zobrist_full(), "pre-move parity");
        play(&mut board, &mv);
        assert_eq!(board.zobrist, board.compute_zobrist_full(), "post-move parity");
        undo(&mut board, &mv);
        assert_eq!(board.zobrist, board.compute_zobrist_full(), "post-undo parity");
        play(&mut board, &mv);
    }
}
