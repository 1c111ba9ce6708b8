//! "Is this square attacked" queries (§4.4 step 3 and step 6): the
//! attacked-set computation the legal-move generator needs for king
//! moves and castling-path legality.

use crate::board::{Board, Color, Piece};
use crate::moves::magic;
use crate::moves::tables;
use crate::moves::types::{Move, MoveFlag};
use crate::square::Square;

/// All squares `piece` (of `color`, standing on `square`) attacks given
/// `blockers`. Used by the generator when it needs a single piece's
/// attack set rather than a side's combined attacked-set.
pub fn attacks_from(piece: Piece, color: Color, square: usize, blockers: u64) -> u64 {
    match piece {
        Piece::Knight => tables::knight_attacks(square),
        Piece::King => tables::king_attacks(square),
        Piece::Pawn => tables::pawn_attacks(color as usize, square),
        Piece::Bishop => magic::get_bishop_attacks(square, blockers),
        Piece::Rook => magic::get_rook_attacks(square, blockers),
        Piece::Queen => magic::get_queen_attacks(square, blockers),
    }
}

/// True if any `attacker`-coloured piece attacks `square` in the
/// current position. Occupancy includes every piece on the board, so
/// this reflects real (not x-ray) attacks.
pub fn is_square_attacked(board: &Board, square: Square, attacker: Color) -> bool {
    is_square_attacked_with_occupancy(board, square, attacker, board.occupied())
}

/// Like `is_square_attacked`, but against a caller-supplied occupancy
/// rather than `board.occupied()` — used to answer "would this square
/// still be attacked after a hypothetical piece removal/relocation"
/// without having to actually play the move first (en-passant's
/// discovered-check test, atomic's post-explosion and freed-ray
/// checks).
pub fn is_square_attacked_with_occupancy(board: &Board, square: Square, attacker: Color, occ: u64) -> bool {
    let idx = square.index();

    if tables::pawn_attacks(attacker.opposite() as usize, idx) & board.bb(attacker, Piece::Pawn) & occ != 0 {
        return true;
    }
    if tables::knight_attacks(idx) & board.bb(attacker, Piece::Knight) & occ != 0 {
        return true;
    }
    if tables::king_attacks(idx) & board.bb(attacker, Piece::King) & occ != 0 {
        return true;
    }

    let rook_attacks = magic::get_rook_attacks(idx, occ);
    if rook_attacks & board.bb(attacker, Piece::Rook) & occ != 0 {
        return true;
    }

    let bishop_attacks = magic::get_bishop_attacks(idx, occ);
    if bishop_attacks & board.bb(attacker, Piece::Bishop) & occ != 0 {
        return true;
    }

    (rook_attacks | bishop_attacks) & board.bb(attacker, Piece::Queen) & occ != 0
}

/// The union of every square `attacker` attacks, with `attacker`'s own
/// king removed from occupancy first — needed so a king can't "hide
/// behind itself" when stepping away from a slider's ray (§4.4 step 3).
/// `include_attacker_king` is `false` under atomic rules (§4.5): two
/// kings may stand adjacent, so the attacking king's own square
/// shouldn't make the defending king's escape squares "attacked".
pub fn attacked_squares_ignoring_king(
    board: &Board,
    attacker: Color,
    defender_king_sq: Square,
    include_attacker_king: bool,
) -> u64 {
    let occ = board.occupied() & !defender_king_sq.bitboard();
    let mut attacked = 0u64;

    let mut pawns = board.bb(attacker, Piece::Pawn);
    while pawns != 0 {
        let sq = crate::bitboard::pop_lsb(&mut pawns);
        attacked |= tables::pawn_attacks(attacker as usize, sq);
    }

    let mut knights = board.bb(attacker, Piece::Knight);
    while knights != 0 {
        let sq = crate::bitboard::pop_lsb(&mut knights);
        attacked |= tables::knight_attacks(sq);
    }

    let mut bishops = board.bb(attacker, Piece::Bishop);
    while bishops != 0 {
        let sq = crate::bitboard::pop_lsb(&mut bishops);
        attacked |= magic::get_bishop_attacks(sq, occ);
    }

    let mut rooks = board.bb(attacker, Piece::Rook);
    while rooks != 0 {
        let sq = crate::bitboard::pop_lsb(&mut rooks);
        attacked |= magic::get_rook_attacks(sq, occ);
    }

    let mut queens = board.bb(attacker, Piece::Queen);
    while queens != 0 {
        let sq = crate::bitboard::pop_lsb(&mut queens);
        attacked |= magic::get_queen_attacks(sq, occ);
    }

    if include_attacker_king {
        let king_sq = Square::from_index(crate::bitboard::lsb_index(board.bb(attacker, Piece::King)) as u8);
        attacked |= tables::king_attacks(king_sq.index());
    }

    attacked
}

#[inline(always)]
pub fn in_check(board: &Board, side: Color) -> bool {
    let king_sq = board.king_square(side);
    is_square_attacked(board, king_sq, side.opposite())
}

/// Whether a pseudo-legal castling move is actually legal: the king
/// must not start, pass through, or land on an attacked square (§4.4
/// step 6). Emptiness of the intervening squares is checked by the
/// generator before this is called.
pub fn is_legal_castling(board: &Board, mv: &Move) -> bool {
    let color = board.side_to_move;
    let opp = color.opposite();

    let (start_idx, middle_idx, end_idx) = match (color, mv.flag) {
        (Color::White, MoveFlag::CastleKing) => (4, 5, 6),
        (Color::White, MoveFlag::CastleQueen) => (4, 3, 2),
        (Color::Black, MoveFlag::CastleKing) => (60, 61, 62),
        (Color::Black, MoveFlag::CastleQueen) => (60, 59, 58),
        _ => return false,
    };

    for &idx in &[start_idx, middle_idx, end_idx] {
        if is_square_attacked(board, Square::from_index(idx as u8), opp) {
            return false;
        }
    }

    true
}
