//! Search module for Gomoku AI
//!
//! Contains:
//! - Zobrist hashing for position identification
//! - Transposition table for caching search results
//! - Candidate move generation
//! - Search-free tactical detectors (win, block, open three)
//! - Minimax search with alpha-beta pruning

pub mod alphabeta;
pub mod movegen;
pub mod threat;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{SearchStats, Searcher, SharedState, INF, WIN_SCORE};
pub use movegen::{candidates, Candidates};
pub use threat::{find_blocking_move, find_winning_move, has_open_three_pattern};
pub use tt::{EntryType, TTEntry, TTStats, TranspositionTable};
pub use zobrist::ZobristTable;
