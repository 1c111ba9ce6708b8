//! En-passant generation, execution, and the discovered-check edge
//! case where capturing en passant would expose the capturing side's
//! own king along the rank the two pawns vacate (§4.4).

#![cfg(not(feature = "atomic"))]

use vantage::{Board, MoveFlag, Square, generate_legal_moves, play, undo};

fn find_ep(board: &Board, from: &str, to: &str) -> Option<vantage::Move> {
    let from = Square::parse(from).unwrap();
    let to = Square::parse(to).unwrap();
    generate_legal_moves(board)
        .iter()
        .find(|m| m.from == from && m.to == to && m.flag == MoveFlag::EnPassant)
        .copied()
}

#[test]
fn straightforward_en_passant_capture_is_legal() {
    let board: Board = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1".parse().unwrap();
    assert!(find_ep(&board, "e5", "d6").is_some());
}

#[test]
fn en_passant_removes_the_captured_pawn_and_restores_it_on_undo() {
    let mut board: Board = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1".parse().unwrap();
    let mv = find_ep(&board, "e5", "d6").unwrap();
    let before = board.clone();

    play(&mut board, &mv);
    assert!(board.piece_at(Square::parse("d5").unwrap()).is_none());
    assert!(board.piece_at(Square::parse("e5").unwrap()).is_none());
    assert_eq!(board.piece_at(Square::parse("d6").unwrap()).unwrap().0, vantage::Color::White);

    undo(&mut board, &mv);
    assert_eq!(board, before);
}

#[test]
fn en_passant_that_exposes_own_king_on_the_vacated_rank_is_illegal() {
    // White king e1, rook on e8 for Black; white pawn e5 captures
    // en passant to d6, but that clears e5 and opens the e-file onto
    // the White king standing on e1.
    let board: Board = "k3r3/8/8/3pP3/8/8/8/4K2R w - d6 0 1".parse().unwrap();
    assert!(find_ep(&board, "e5", "d6").is_none());
}

#[test]
fn en_passant_pin_along_the_fifth_rank_is_illegal() {
    // White king a5, black rook h5, white pawn c5, black pawn d5 just
    // double-pushed. Capturing c5xd6 e.p. would remove both the c5 and
    // d5 pawns, opening the rank onto the king.
    let board: Board = "4k3/8/8/K1Pp3r/8/8/8/8 w - d6 0 1".parse().unwrap();
    assert!(find_ep(&board, "c5", "d6").is_none());
}
