// src/hash/zobrist.rs
//
//! Piece-placement-only Zobrist hashing (§4.3, §9 "Zobrist scope").
//!
//! The hash folds only piece placement, never side-to-move, castling
//! rights, or the en-passant square — a narrower contract than most
//! engines use, preserved here because `original_source/position.c`
//! (the source this spec was distilled from) does the same, and §9 is
//! explicit that a faithful port keeps this scope. The table is seeded
//! by a reproducible xorshift-multiply generator (not the `rand` crate,
//! which remains reserved for magic-number search) so two independent
//! builds always agree on hashes.

use std::sync::OnceLock;

/// One table per (color*6 + piece_type) index, 0..11, matching
/// `Piece::zobrist_index` in `board`.
const NUM_PIECES: usize = 12;

struct ZobristGen(u64);

impl ZobristGen {
    /// Matches `original_source/position.c`'s `gen_rand`, credited
    /// there to Stockfish: a 64-bit xorshift followed by a fixed odd
    /// multiplier.
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 >> 12;
        self.0 ^= self.0 >> 25;
        self.0 ^= self.0 >> 27;
        self.0.wrapping_mul(2685821657736338717)
    }
}

/// Fixed seed, matching the source exactly so hashes computed by
/// independent instances of the engine agree.
const ZOBRIST_SEED: u64 = 70026072;

static KEYS: OnceLock<[[u64; 64]; NUM_PIECES]> = OnceLock::new();

fn keys() -> &'static [[u64; 64]; NUM_PIECES] {
    KEYS.get_or_init(|| {
        let mut gen = ZobristGen(ZOBRIST_SEED);
        let mut table = [[0u64; 64]; NUM_PIECES];
        for piece in table.iter_mut() {
            for square in piece.iter_mut() {
                *square = gen.next();
            }
        }
        table
    })
}

/// The Zobrist key for a given piece index (`color * 6 + piece_type`,
/// 0..11) on a given square.
#[inline]
pub fn piece_key(piece_index: usize, square: usize) -> u64 {
    keys()[piece_index][square]
}

/// Must be called once before any `Position` operation relies on
/// `zobrist_hash` (§6); idempotent like every other table init here.
pub fn init_zobrist_table() {
    let _ = keys();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_deterministic_across_calls() {
        assert_eq!(piece_key(0, 0), piece_key(0, 0));
    }

    #[test]
    fn distinct_piece_square_pairs_get_distinct_keys() {
        let a = piece_key(0, 0);
        let b = piece_key(0, 1);
        let c = piece_key(1, 0);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn init_is_idempotent() {
        init_zobrist_table();
        let before = piece_key(5, 12);
        init_zobrist_table();
        assert_eq!(before, piece_key(5, 12));
    }
}
