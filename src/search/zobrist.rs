//! Zobrist hashing for position identification
//!
//! A fingerprint is the XOR of one random constant per occupied
//! (cell, color). XOR is commutative and self-inverse, so the fingerprint
//! depends only on the set of stones, and placing then removing a stone
//! restores the previous value. The search updates it incrementally.
//!
//! Cache entries are keyed by the fingerprint combined with a side-to-move
//! key (see [`ZobristTable::cache_key`]), so one position searched for
//! either side never shares an entry.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Stone, Pos};
//! use gomoku::search::ZobristTable;
//!
//! let zt = ZobristTable::new();
//! let mut board = Board::new();
//!
//! let hash1 = zt.hash(&board);
//!
//! let pos = Pos::new(7, 7);
//! board.place_stone(pos, Stone::Black);
//! let hash2 = zt.hash(&board);
//!
//! // Incremental update is equivalent to full recomputation
//! assert_eq!(zt.update_place(hash1, pos, Stone::Black), hash2);
//! ```

use rand_xoshiro::rand_core::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::board::{Board, Pos, Stone, TOTAL_CELLS};

/// Fixed seed: independently built tables agree on every fingerprint.
const ZOBRIST_SEED: u64 = 0x1234_5678_9ABC_DEF0;

/// Zobrist hash table for position hashing.
pub struct ZobristTable {
    /// Random values for black stones at each position
    black: [u64; TOTAL_CELLS],
    /// Random values for white stones at each position
    white: [u64; TOTAL_CELLS],
    /// Side-to-move keys, `[black, white]`
    side: [u64; 2],
}

impl ZobristTable {
    /// Create a table from the fixed seed.
    #[must_use]
    pub fn new() -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(ZOBRIST_SEED);

        let mut black = [0u64; TOTAL_CELLS];
        let mut white = [0u64; TOTAL_CELLS];
        for i in 0..TOTAL_CELLS {
            black[i] = rng.next_u64();
            white[i] = rng.next_u64();
        }
        let side = [rng.next_u64(), rng.next_u64()];

        Self { black, white, side }
    }

    #[inline]
    fn key(&self, pos: Pos, stone: Stone) -> u64 {
        let idx = pos.to_index();
        match stone {
            Stone::Black => self.black[idx],
            Stone::White => self.white[idx],
            Stone::Empty => 0,
        }
    }

    /// Compute the full hash for a board position. O(stones).
    #[must_use]
    pub fn hash(&self, board: &Board) -> u64 {
        let black = board.black.iter_ones().map(|pos| self.black[pos.to_index()]);
        let white = board.white.iter_ones().map(|pos| self.white[pos.to_index()]);
        black.chain(white).fold(0, |h, k| h ^ k)
    }

    /// Transposition table key for fingerprint `hash` with `to_move` to play.
    #[inline]
    #[must_use]
    pub fn cache_key(&self, hash: u64, to_move: Stone) -> u64 {
        match to_move {
            Stone::Black => hash ^ self.side[0],
            Stone::White => hash ^ self.side[1],
            Stone::Empty => hash,
        }
    }

    /// Incrementally update hash after placing a stone. O(1).
    #[inline]
    #[must_use]
    pub fn update_place(&self, hash: u64, pos: Pos, stone: Stone) -> u64 {
        hash ^ self.key(pos, stone)
    }

    /// Incrementally update hash after removing a stone.
    ///
    /// XOR is its own inverse, so this is identical to `update_place`.
    #[inline]
    #[must_use]
    pub fn update_remove(&self, hash: u64, pos: Pos, stone: Stone) -> u64 {
        self.update_place(hash, pos, stone)
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zobrist_empty_board() {
        let zt = ZobristTable::new();
        assert_eq!(zt.hash(&Board::new()), 0);
    }

    #[test]
    fn test_zobrist_deterministic() {
        let zt1 = ZobristTable::new();
        let zt2 = ZobristTable::new();
        let mut board = Board::new();
        board.place_stone(Pos::new(3, 4), Stone::Black);
        board.place_stone(Pos::new(11, 2), Stone::White);

        assert_eq!(zt1.hash(&board), zt2.hash(&board));
        assert_eq!(zt1.black, zt2.black);
    }

    #[test]
    fn test_zobrist_keys_distinct() {
        let zt = ZobristTable::new();
        let mut all: Vec<u64> = zt.black.iter().chain(zt.white.iter()).copied().collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 2 * TOTAL_CELLS);
        assert!(!all.contains(&0));
    }

    #[test]
    fn test_cache_key_depends_on_side() {
        let zt = ZobristTable::new();
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        let hash = zt.hash(&board);

        let black = zt.cache_key(hash, Stone::Black);
        let white = zt.cache_key(hash, Stone::White);
        assert_ne!(black, white);
        assert_ne!(black, hash);
        assert_ne!(white, hash);
        // Fingerprint itself stays stones-only
        assert_eq!(zt.hash(&board), hash);
    }

    #[test]
    fn test_zobrist_same_position_different_path() {
        let zt = ZobristTable::new();
        let mut board1 = Board::new();
        let mut board2 = Board::new();

        board1.place_stone(Pos::new(7, 7), Stone::Black);
        board1.place_stone(Pos::new(8, 8), Stone::White);

        board2.place_stone(Pos::new(8, 8), Stone::White);
        board2.place_stone(Pos::new(7, 7), Stone::Black);

        assert_eq!(zt.hash(&board1), zt.hash(&board2));
    }

    #[test]
    fn test_zobrist_color_matters() {
        let zt = ZobristTable::new();
        let mut board1 = Board::new();
        let mut board2 = Board::new();
        board1.place_stone(Pos::new(7, 7), Stone::Black);
        board2.place_stone(Pos::new(7, 7), Stone::White);
        assert_ne!(zt.hash(&board1), zt.hash(&board2));
    }

    #[test]
    fn test_zobrist_place_remove_restores() {
        let zt = ZobristTable::new();
        let mut board = Board::new();
        board.place_stone(Pos::new(2, 2), Stone::White);
        let pos = Pos::new(7, 7);

        let before = zt.hash(&board);
        board.place_stone(pos, Stone::Black);
        let placed = zt.update_place(before, pos, Stone::Black);
        assert_eq!(placed, zt.hash(&board));

        board.remove_stone(pos);
        let removed = zt.update_remove(placed, pos, Stone::Black);
        assert_eq!(removed, before);
        assert_eq!(zt.hash(&board), before);
    }

    #[test]
    fn test_zobrist_randomized_orders_agree() {
        let zt = ZobristTable::new();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

        for _ in 0..20 {
            // Pick a random set of distinct cells with colors
            let mut cells: Vec<(Pos, Stone)> = Vec::new();
            while cells.len() < 30 {
                let pos = Pos::from_index(rng.next_u32() as usize % TOTAL_CELLS);
                if cells.iter().any(|&(p, _)| p == pos) {
                    continue;
                }
                let stone = if rng.next_u32() & 1 == 0 {
                    Stone::Black
                } else {
                    Stone::White
                };
                cells.push((pos, stone));
            }

            let mut forward = Board::new();
            let mut inc_forward = 0u64;
            for &(pos, stone) in &cells {
                forward.place_stone(pos, stone);
                inc_forward = zt.update_place(inc_forward, pos, stone);
            }

            let mut backward = Board::new();
            let mut inc_backward = 0u64;
            for &(pos, stone) in cells.iter().rev() {
                backward.place_stone(pos, stone);
                inc_backward = zt.update_place(inc_backward, pos, stone);
            }

            assert_eq!(inc_forward, zt.hash(&forward));
            assert_eq!(inc_backward, zt.hash(&backward));
            assert_eq!(inc_forward, inc_backward);
        }
    }
}
