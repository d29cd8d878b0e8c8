//! Transposition Table for caching search results
//!
//! Entries are indexed by Zobrist fingerprint and store the score together
//! with the depth it was searched to and how the score relates to the true
//! value (exact, lower bound, upper bound). A score is only reused when it
//! was searched at least as deep as required and its bound is compatible
//! with the current alpha-beta window.
//!
//! The table is shared by every search task of one decision. Each slot is a
//! pair of `AtomicU64`s using the XOR trick (Hyatt 1994): the slot stores
//! `(key, data)` with `key = hash ^ data`, and a probe accepts the slot only
//! if `key ^ data == hash`. A torn read from a concurrent write fails that
//! check and reads as a miss.
//!
//! # Example
//!
//! ```
//! use gomoku::search::{TranspositionTable, EntryType};
//!
//! let tt = TranspositionTable::new(1); // 1 MB
//!
//! let hash = 0x123456789ABCDEF0;
//! tt.store(hash, 5, 100, EntryType::Exact);
//!
//! assert_eq!(tt.probe(hash, 5, -1000, 1000), Some(100));
//! assert_eq!(tt.probe(hash, 6, -1000, 1000), None); // too shallow
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Entry type for score interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Exact score - the search completed inside the window
    Exact,
    /// Lower bound - score >= stored value (beta cutoff)
    LowerBound,
    /// Upper bound - score <= stored value (alpha fail-low)
    UpperBound,
}

/// Decoded transposition table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    /// Remaining depth the score was searched to
    pub depth: i8,
    /// Evaluation score
    pub score: i32,
    /// Type of score (exact, lower bound, upper bound)
    pub entry_type: EntryType,
}

/// Marks a slot as written so a packed entry is never 0.
const VALID_BIT: u64 = 1 << 10;

/// Pack an entry into a u64.
///
/// Layout:
/// ```text
/// bits [0..8]   depth (i8 + 128)
/// bits [8..10]  entry_type (0=Exact, 1=LB, 2=UB)
/// bit  [10]     valid
/// bits [32..64] score (i32 bit pattern)
/// ```
fn pack_entry(depth: i8, score: i32, entry_type: EntryType) -> u64 {
    let d = (i16::from(depth) + 128) as u64 & 0xFF;
    let t = match entry_type {
        EntryType::Exact => 0u64,
        EntryType::LowerBound => 1u64,
        EntryType::UpperBound => 2u64,
    };
    let s = u64::from(score as u32);
    d | (t << 8) | VALID_BIT | (s << 32)
}

/// Unpack a u64 back into entry fields.
fn unpack_entry(data: u64) -> TTEntry {
    let depth = ((data & 0xFF) as i16 - 128) as i8;
    let entry_type = match (data >> 8) & 0x3 {
        0 => EntryType::Exact,
        1 => EntryType::LowerBound,
        _ => EntryType::UpperBound,
    };
    let score = (data >> 32) as u32 as i32;
    TTEntry {
        depth,
        score,
        entry_type,
    }
}

/// Lock-free, direct-mapped transposition table.
///
/// All methods take `&self`, so one table can sit behind an `Arc` and be
/// used by every worker of a decision without locking.
pub struct TranspositionTable {
    keys: Vec<AtomicU64>,
    data: Vec<AtomicU64>,
    size: usize,
}

impl TranspositionTable {
    /// Create a new table with the given size in megabytes.
    ///
    /// ```
    /// use gomoku::search::TranspositionTable;
    ///
    /// let tt = TranspositionTable::new(16); // 16 MB table
    /// ```
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        // Each slot = 2 x AtomicU64 = 16 bytes
        let slot_size = 16usize;
        let size = ((size_mb * 1024 * 1024) / slot_size).max(1024);

        let keys = (0..size).map(|_| AtomicU64::new(0)).collect();
        let data = (0..size).map(|_| AtomicU64::new(0)).collect();

        Self { keys, data, size }
    }

    #[inline]
    fn slot(&self, hash: u64) -> usize {
        (hash % self.size as u64) as usize
    }

    /// Raw lookup, ignoring depth and window.
    #[must_use]
    pub fn entry(&self, hash: u64) -> Option<TTEntry> {
        let idx = self.slot(hash);
        let key = self.keys[idx].load(Ordering::Relaxed);
        let raw_data = self.data[idx].load(Ordering::Relaxed);

        // Empty slot, or torn read / other position
        if raw_data == 0 || key ^ raw_data != hash {
            return None;
        }
        Some(unpack_entry(raw_data))
    }

    /// Probe the table for a usable score.
    ///
    /// Returns `Some(score)` only when the entry was searched to at least
    /// `depth` and its bound decides the current `(alpha, beta)` window.
    #[must_use]
    pub fn probe(&self, hash: u64, depth: i8, alpha: i32, beta: i32) -> Option<i32> {
        let entry = self.entry(hash)?;
        if entry.depth < depth {
            return None;
        }
        match entry.entry_type {
            EntryType::Exact => Some(entry.score),
            EntryType::LowerBound if entry.score >= beta => Some(entry.score),
            EntryType::UpperBound if entry.score <= alpha => Some(entry.score),
            _ => None,
        }
    }

    /// Store a position in the table.
    ///
    /// Depth-preferred replacement: a slot holding a different position is
    /// only overwritten by a search at least as deep.
    pub fn store(&self, hash: u64, depth: i8, score: i32, entry_type: EntryType) {
        let idx = self.slot(hash);

        let existing_data = self.data[idx].load(Ordering::Relaxed);
        let existing_key = self.keys[idx].load(Ordering::Relaxed);
        if existing_data != 0 && existing_key ^ existing_data != hash {
            let existing = unpack_entry(existing_data);
            if depth < existing.depth {
                return;
            }
        }

        let packed = pack_entry(depth, score, entry_type);
        // Data first, then key: a concurrent reader sees either the old pair
        // or a mismatching pair.
        self.data[idx].store(packed, Ordering::Relaxed);
        self.keys[idx].store(hash ^ packed, Ordering::Relaxed);
    }

    /// Clear all entries. Called at the start of every decision.
    pub fn clear(&self) {
        for i in 0..self.size {
            self.keys[i].store(0, Ordering::Relaxed);
            self.data[i].store(0, Ordering::Relaxed);
        }
    }

    /// Number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.size
    }

    /// Get statistics about table usage (approximate under concurrent access).
    #[must_use]
    pub fn stats(&self) -> TTStats {
        let used = self
            .data
            .iter()
            .filter(|d| d.load(Ordering::Relaxed) != 0)
            .count();
        TTStats {
            size: self.size,
            used,
            usage_percent: (used as f64 / self.size as f64 * 100.0) as u8,
        }
    }
}

/// Statistics about transposition table usage.
#[derive(Debug, Clone, Copy)]
pub struct TTStats {
    /// Total number of slots in the table
    pub size: usize,
    /// Number of slots currently occupied
    pub used: usize,
    /// Percentage of table in use (0-100)
    pub usage_percent: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_unpack_extremes() {
        let cases = [
            (0i8, 0i32, EntryType::Exact),
            (-128, i32::MIN, EntryType::LowerBound),
            (127, i32::MAX, EntryType::UpperBound),
            (4, -10_000_001, EntryType::Exact),
        ];
        for (depth, score, entry_type) in cases {
            let packed = pack_entry(depth, score, entry_type);
            assert_ne!(packed, 0);
            assert_eq!(
                unpack_entry(packed),
                TTEntry {
                    depth,
                    score,
                    entry_type
                }
            );
        }
    }

    #[test]
    fn test_tt_store_probe_exact() {
        let tt = TranspositionTable::new(1);
        let hash = 0x123456789ABCDEF0;

        tt.store(hash, 5, 100, EntryType::Exact);
        assert_eq!(tt.probe(hash, 5, -1000, 1000), Some(100));
        assert_eq!(tt.probe(hash, 3, -1000, 1000), Some(100));
    }

    #[test]
    fn test_tt_depth_requirement() {
        let tt = TranspositionTable::new(1);
        let hash = 0x123456789ABCDEF0;

        tt.store(hash, 3, 100, EntryType::Exact);
        assert!(tt.probe(hash, 5, -1000, 1000).is_none());
        assert_eq!(tt.entry(hash).map(|e| e.depth), Some(3));
    }

    #[test]
    fn test_tt_bounds() {
        let tt = TranspositionTable::new(1);

        let hash_lb = 0x111;
        tt.store(hash_lb, 5, 200, EntryType::LowerBound);
        assert_eq!(tt.probe(hash_lb, 5, -1000, 150), Some(200));
        assert!(tt.probe(hash_lb, 5, -1000, 300).is_none());

        let hash_ub = 0x222;
        tt.store(hash_ub, 5, 50, EntryType::UpperBound);
        assert_eq!(tt.probe(hash_ub, 5, 100, 1000), Some(50));
        assert!(tt.probe(hash_ub, 5, 30, 1000).is_none());
    }

    #[test]
    fn test_tt_hash_mismatch() {
        let tt = TranspositionTable::new(1);
        tt.store(0xAABBCCDD_11223344, 5, 100, EntryType::Exact);
        assert!(tt.probe(0xFFEEDDCC_44332211, 5, -1000, 1000).is_none());
    }

    #[test]
    fn test_tt_zero_hash_is_storable() {
        // The empty board fingerprints to 0
        let tt = TranspositionTable::new(1);
        assert!(tt.entry(0).is_none());
        tt.store(0, 1, -7, EntryType::Exact);
        assert_eq!(tt.probe(0, 1, -1000, 1000), Some(-7));
    }

    #[test]
    fn test_tt_replacement_policy() {
        let tt = TranspositionTable::new(0);
        let size = tt.capacity() as u64;
        let a = 5u64;
        let b = a + size; // same slot, different position

        tt.store(a, 4, 10, EntryType::Exact);
        tt.store(b, 2, 20, EntryType::Exact);
        assert_eq!(tt.probe(a, 4, -100, 100), Some(10), "shallower must not evict");

        tt.store(b, 4, 20, EntryType::Exact);
        assert_eq!(tt.probe(b, 4, -100, 100), Some(20));
        assert!(tt.entry(a).is_none());

        // Same position always replaces
        tt.store(b, 1, 30, EntryType::Exact);
        assert_eq!(tt.entry(b).map(|e| e.score), Some(30));
    }

    #[test]
    fn test_tt_clear_and_stats() {
        let tt = TranspositionTable::new(1);
        assert_eq!(tt.stats().used, 0);

        tt.store(0x111, 5, 100, EntryType::Exact);
        tt.store(0x222, 5, 100, EntryType::Exact);
        assert_eq!(tt.stats().used, 2);

        tt.clear();
        assert_eq!(tt.stats().used, 0);
        assert!(tt.probe(0x111, 5, -1000, 1000).is_none());
    }

    #[test]
    fn test_tt_minimum_size() {
        let tt = TranspositionTable::new(0);
        assert!(tt.capacity() >= 1024);
    }

    #[test]
    fn test_tt_concurrent_writers() {
        use std::sync::Arc;
        use std::thread;

        let tt = Arc::new(TranspositionTable::new(1));
        let handles: Vec<_> = (0..4u64)
            .map(|t| {
                let tt = Arc::clone(&tt);
                thread::spawn(move || {
                    for i in 0..1000u64 {
                        let hash = t * 100_000 + i;
                        tt.store(hash, 3, (hash % 977) as i32, EntryType::Exact);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        // Whatever survived must be intact
        for t in 0..4u64 {
            for i in 0..1000u64 {
                let hash = t * 100_000 + i;
                if let Some(score) = tt.probe(hash, 3, -1000, 1000) {
                    assert_eq!(score, (hash % 977) as i32);
                }
            }
        }
        assert!(tt.stats().used > 0);
    }
}
