//! `play`/`undo` (§4.3, §6): apply and reverse a single legal move on a
//! `Board`, updating bitboards, `piece_on_sq`, the incremental Zobrist
//! hash, and the per-ply `Undo` history entry. Two bodies are compiled
//! in depending on the `atomic` feature; the branches that differ
//! (`Capture`, `EnPassant`, `PromoCapture*`) are the only ones that
//! need to know which rule set is active.

use crate::board::{Board, Color, Piece, Undo};
use crate::moves::tables;
use crate::moves::types::{Move, MoveFlag};
use crate::square::Square;

#[inline(always)]
fn put_piece(board: &mut Board, color: Color, piece: Piece, sq: usize) {
    let bb = board.bb(color, piece) | (1u64 << sq);
    board.set_bb(color, piece, bb);
}

#[inline(always)]
fn remove_piece(board: &mut Board, sq: usize) {
    if let Some((color, piece)) = board.piece_at(Square::from_index(sq as u8)) {
        let bb = board.bb(color, piece) & !(1u64 << sq);
        board.set_bb(color, piece, bb);
    }
}

/// Relocates whatever piece sits on `from` to `to`, which is assumed
/// empty (quiet moves, and the non-capturing half of castling).
#[inline(always)]
fn move_piece_quiet(board: &mut Board, from: usize, to: usize) {
    if let Some((color, piece)) = board.piece_at(Square::from_index(from as u8)) {
        let bb = (board.bb(color, piece) & !(1u64 << from)) | (1u64 << to);
        board.set_bb(color, piece, bb);
    }
}

/// King/rook home-to-destination squares for a castle, by side and wing.
#[inline(always)]
fn castle_squares(color: Color, kingside: bool) -> (usize, usize, usize, usize) {
    match (color, kingside) {
        (Color::White, true) => (4, 6, 7, 5),
        (Color::White, false) => (4, 2, 0, 3),
        (Color::Black, true) => (60, 62, 63, 61),
        (Color::Black, false) => (60, 58, 56, 59),
    }
}

#[inline(always)]
fn ep_victim_square(color: Color, to: usize) -> usize {
    match color {
        Color::White => to - 8,
        Color::Black => to + 8,
    }
}

#[cfg(feature = "atomic")]
fn piece_code(color: Color, piece: Piece) -> u64 {
    (color as u64) * 6 + piece as u64
}

#[cfg(feature = "atomic")]
fn decode_piece(code: u64) -> (Color, Piece) {
    let color = if code >= 6 { Color::Black } else { Color::White };
    let piece = Piece::from_u8((code % 6) as u8);
    (color, piece)
}

#[cfg(feature = "atomic")]
fn set_slot(packed: &mut u64, slot: usize, code: u64) {
    let shift = slot * 4;
    *packed = (*packed & !(0xFu64 << shift)) | (code << shift);
}

#[cfg(feature = "atomic")]
fn get_slot(packed: u64, slot: usize) -> u64 {
    (packed >> (slot * 4)) & 0xF
}

/// Explodes the board around `center` (§4.3 "Atomic capture"): removes
/// the attacker (on `attacker_sq`) and, unless this is an en-passant
/// capture (whose victim was never on `center`), the defender on
/// `center`, plus every non-pawn piece in the ring of squares around
/// `center`. Packs what was removed into the returned `captured` field
/// so `atomic_undo_capture` can restore it exactly.
#[cfg(feature = "atomic")]
fn atomic_capture(board: &mut Board, center: usize, attacker_sq: usize, is_en_passant: bool) -> u64 {
    let mut packed = u64::MAX;

    if let Some((c, p)) = board.piece_at(Square::from_index(attacker_sq as u8)) {
        set_slot(&mut packed, 0, piece_code(c, p));
    }
    if !is_en_passant {
        if let Some((c, p)) = board.piece_at(Square::from_index(center as u8)) {
            set_slot(&mut packed, 1, piece_code(c, p));
        }
    }

    remove_piece(board, attacker_sq);
    if !is_en_passant {
        remove_piece(board, center);
    }

    let mut ring = tables::king_attacks(center);
    let mut slot = 2;
    while ring != 0 {
        let sq = crate::bitboard::pop_lsb(&mut ring);
        if let Some((c, p)) = board.piece_at(Square::from_index(sq as u8)) {
            if p != Piece::Pawn {
                set_slot(&mut packed, slot, piece_code(c, p));
                remove_piece(board, sq);
            }
        }
        slot += 1;
    }

    packed
}

/// Inverse of `atomic_capture`: restores the ring, then the defender
/// (unless en-passant), then the attacker, reading `packed` exactly as
/// `atomic_capture` wrote it.
#[cfg(feature = "atomic")]
fn atomic_undo_capture(board: &mut Board, center: usize, attacker_sq: usize, is_en_passant: bool, packed: u64) {
    let mut ring = tables::king_attacks(center);
    let mut slot = 2;
    while ring != 0 {
        let sq = crate::bitboard::pop_lsb(&mut ring);
        let code = get_slot(packed, slot);
        if code != 0xF {
            let (c, p) = decode_piece(code);
            put_piece(board, c, p, sq);
        }
        slot += 1;
    }

    if !is_en_passant {
        let code = get_slot(packed, 1);
        if code != 0xF {
            let (c, p) = decode_piece(code);
            put_piece(board, c, p, center);
        }
    }

    let code = get_slot(packed, 0);
    if code != 0xF {
        let (c, p) = decode_piece(code);
        put_piece(board, c, p, attacker_sq);
    }
}

/// Applies `mv` to `board`. The caller guarantees `mv` was produced by
/// `generate_legal_moves` against this exact position.
pub fn play(board: &mut Board, mv: &Move) {
    let me = board.side_to_move;
    let from = mv.from.index();
    let to = mv.to.index();

    let prev_entry = board.current().entry;
    let new_entry = prev_entry | mv.from.bitboard() | mv.to.bitboard();

    board.ply += 1;
    if board.history.len() == board.ply {
        board.history.push(Undo::carried_forward(new_entry));
    } else {
        board.history[board.ply] = Undo::carried_forward(new_entry);
    }
    board.side_to_move = !me;

    match mv.flag {
        MoveFlag::Quiet => move_piece_quiet(board, from, to),

        MoveFlag::DoublePush => {
            move_piece_quiet(board, from, to);
            let ep_idx = match me {
                Color::White => from + 8,
                Color::Black => from - 8,
            };
            board.current_mut().ep_square = Square::from_index(ep_idx as u8);
        }

        MoveFlag::CastleKing => {
            let (kf, kt, rf, rt) = castle_squares(me, true);
            move_piece_quiet(board, kf, kt);
            move_piece_quiet(board, rf, rt);
        }

        MoveFlag::CastleQueen => {
            let (kf, kt, rf, rt) = castle_squares(me, false);
            move_piece_quiet(board, kf, kt);
            move_piece_quiet(board, rf, rt);
        }

        MoveFlag::EnPassant => {
            let victim_sq = ep_victim_square(me, to);
            remove_piece(board, victim_sq);

            #[cfg(not(feature = "atomic"))]
            {
                move_piece_quiet(board, from, to);
                board.current_mut().captured = Some((!me, Piece::Pawn));
            }
            #[cfg(feature = "atomic")]
            {
                let packed = atomic_capture(board, to, from, true);
                board.current_mut().captured = packed;
            }
        }

        MoveFlag::Capture => {
            #[cfg(not(feature = "atomic"))]
            {
                let captured = board.piece_at(Square::from_index(to as u8));
                remove_piece(board, to);
                move_piece_quiet(board, from, to);
                board.current_mut().captured = captured;
            }
            #[cfg(feature = "atomic")]
            {
                let packed = atomic_capture(board, to, from, false);
                board.current_mut().captured = packed;
            }
        }

        MoveFlag::PromoteKnight
        | MoveFlag::PromoteBishop
        | MoveFlag::PromoteRook
        | MoveFlag::PromoteQueen => {
            let piece = mv.flag.promotion_piece().expect("promotion flag");
            remove_piece(board, from);
            put_piece(board, me, piece, to);
        }

        MoveFlag::PromoCaptureKnight
        | MoveFlag::PromoCaptureBishop
        | MoveFlag::PromoCaptureRook
        | MoveFlag::PromoCaptureQueen => {
            #[cfg(not(feature = "atomic"))]
            {
                let piece = mv.flag.promotion_piece().expect("promotion flag");
                let captured = board.piece_at(Square::from_index(to as u8));
                remove_piece(board, to);
                remove_piece(board, from);
                put_piece(board, me, piece, to);
                board.current_mut().captured = captured;
            }
            #[cfg(feature = "atomic")]
            {
                // The capturing pawn explodes along with everything else in
                // the blast radius, so it never actually promotes; the
                // explosion is centred on `to` with the (still-unpromoted)
                // pawn on `from` as the attacker.
                let packed = atomic_capture(board, to, from, false);
                board.current_mut().captured = packed;
            }
        }
    }

    #[cfg(debug_assertions)]
    board.assert_hash();
}

/// Reverses `mv`, restoring `board` to the state it had before `play`
/// was called with it. Must be called with the same `mv` that produced
/// the current ply, in LIFO order.
pub fn undo(board: &mut Board, mv: &Move) {
    let me = board.side_to_move.opposite();
    let from = mv.from.index();
    let to = mv.to.index();

    match mv.flag {
        MoveFlag::Quiet => move_piece_quiet(board, to, from),

        MoveFlag::DoublePush => move_piece_quiet(board, to, from),

        MoveFlag::CastleKing => {
            let (kf, kt, rf, rt) = castle_squares(me, true);
            move_piece_quiet(board, rt, rf);
            move_piece_quiet(board, kt, kf);
        }

        MoveFlag::CastleQueen => {
            let (kf, kt, rf, rt) = castle_squares(me, false);
            move_piece_quiet(board, rt, rf);
            move_piece_quiet(board, kt, kf);
        }

        MoveFlag::EnPassant => {
            let victim_sq = ep_victim_square(me, to);

            #[cfg(not(feature = "atomic"))]
            {
                move_piece_quiet(board, to, from);
            }
            #[cfg(feature = "atomic")]
            {
                let packed = board.current().captured;
                atomic_undo_capture(board, to, from, true, packed);
            }
            put_piece(board, !me, Piece::Pawn, victim_sq);
        }

        MoveFlag::Capture => {
            #[cfg(not(feature = "atomic"))]
            {
                move_piece_quiet(board, to, from);
                if let Some((c, p)) = board.current().captured {
                    put_piece(board, c, p, to);
                }
            }
            #[cfg(feature = "atomic")]
            {
                let packed = board.current().captured;
                atomic_undo_capture(board, to, from, false, packed);
            }
        }

        MoveFlag::PromoteKnight
        | MoveFlag::PromoteBishop
        | MoveFlag::PromoteRook
        | MoveFlag::PromoteQueen => {
            remove_piece(board, to);
            put_piece(board, me, Piece::Pawn, from);
        }

        MoveFlag::PromoCaptureKnight
        | MoveFlag::PromoCaptureBishop
        | MoveFlag::PromoCaptureRook
        | MoveFlag::PromoCaptureQueen => {
            #[cfg(not(feature = "atomic"))]
            {
                remove_piece(board, to);
                put_piece(board, me, Piece::Pawn, from);
                if let Some((c, p)) = board.current().captured {
                    put_piece(board, c, p, to);
                }
            }
            #[cfg(feature = "atomic")]
            {
                let packed = board.current().captured;
                atomic_undo_capture(board, to, from, false, packed);
            }
        }
    }

    board.ply -= 1;
    board.history.truncate(board.ply + 1);
    board.side_to_move = me;

    #[cfg(debug_assertions)]
    board.assert_hash();
}
