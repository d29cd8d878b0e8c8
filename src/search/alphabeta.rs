//! Minimax search with alpha-beta pruning and a transposition table
//!
//! Scores are always from the point of view of one fixed side, the
//! *perspective* (the side the engine is choosing a move for). Nodes where
//! the perspective side is to move maximize, the others minimize.
//!
//! A candidate that completes five in a row ends its branch with
//! `±WIN_SCORE` without searching deeper. Leaves are scored by
//! [`evaluate`]. Every finished node is cached with its depth and bound type;
//! interrupted nodes never are.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use gomoku::board::{Board, Stone, Pos};
//! use gomoku::search::{SharedState, Searcher};
//!
//! let shared = Arc::new(SharedState::new(1));
//! let mut searcher = Searcher::new(shared, Stone::Black, None);
//!
//! let mut board = Board::new();
//! board.place_stone(Pos::new(7, 7), Stone::White);
//!
//! if let Some(score) = searcher.score_root_move(&board, Pos::new(7, 8), 1) {
//!     println!("score: {score}, nodes: {}", searcher.nodes());
//! }
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::board::{Board, Pos, Stone};
use crate::eval::evaluate;
use crate::rules::has_five_at_pos;

use super::movegen::candidates;
use super::{EntryType, TTStats, TranspositionTable, ZobristTable};

/// Score of a won position. Larger than any heuristic score reachable on a
/// board without five in a row.
pub const WIN_SCORE: i32 = 10_000_000;

/// Infinity score for alpha-beta bounds
pub const INF: i32 = WIN_SCORE + 1;

/// Nodes between deadline checks, minus one. Counted over all tasks of a
/// decision.
const TIME_CHECK_MASK: u64 = 1023;

/// Search statistics for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Total beta cutoffs (siblings skipped)
    pub cutoffs: u64,
    /// Total TT probes
    pub tt_probes: u64,
    /// TT probes that returned a usable score
    pub tt_hits: u64,
}

impl SearchStats {
    /// TT hit rate in percent
    pub fn tt_hit_rate(&self) -> f64 {
        if self.tt_probes == 0 {
            0.0
        } else {
            self.tt_hits as f64 / self.tt_probes as f64 * 100.0
        }
    }

    /// Merge another stats into this one (for combining task stats)
    pub fn merge(&mut self, other: &SearchStats) {
        self.cutoffs += other.cutoffs;
        self.tt_probes += other.tt_probes;
        self.tt_hits += other.tt_hits;
    }
}

// =============================================================================
// SharedState: thread-safe state shared across all tasks of a decision
// =============================================================================

/// State shared between all search tasks.
pub struct SharedState {
    zobrist: ZobristTable,
    tt: TranspositionTable,
    /// Global stop signal, raised by the first task that passes the deadline.
    stopped: AtomicBool,
    /// Nodes visited by all tasks since the last reset.
    nodes: AtomicU64,
}

impl SharedState {
    #[must_use]
    pub fn new(tt_size_mb: usize) -> Self {
        Self {
            zobrist: ZobristTable::new(),
            tt: TranspositionTable::new(tt_size_mb),
            stopped: AtomicBool::new(false),
            nodes: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn zobrist(&self) -> &ZobristTable {
        &self.zobrist
    }

    #[inline]
    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    /// Get statistics about the transposition table.
    pub fn tt_stats(&self) -> TTStats {
        self.tt.stats()
    }

    /// Clear the cache, the stop flag and the node count before a new
    /// decision.
    pub fn reset(&self) {
        self.tt.clear();
        self.stopped.store(false, Ordering::Relaxed);
        self.nodes.store(0, Ordering::Relaxed);
    }

    /// Nodes visited by all tasks since the last reset.
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }

    /// Count one node and return the new total.
    #[inline]
    fn count_node(&self) -> u64 {
        self.nodes.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}

// =============================================================================
// Searcher: per-task search state
// =============================================================================

/// Per-task search worker. Each root evaluation owns one; the TT, the
/// Zobrist keys and the stop flag are shared through `Arc<SharedState>`.
pub struct Searcher {
    shared: Arc<SharedState>,
    perspective: Stone,
    deadline: Option<Instant>,
    nodes: u64,
    stats: SearchStats,
}

impl Searcher {
    /// Create a worker scoring positions for `perspective`.
    ///
    /// `deadline` is captured once by the caller for the whole decision.
    #[must_use]
    pub fn new(shared: Arc<SharedState>, perspective: Stone, deadline: Option<Instant>) -> Self {
        Self {
            shared,
            perspective,
            deadline,
            nodes: 0,
            stats: SearchStats::default(),
        }
    }

    /// Nodes visited by this worker so far.
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Check if search should stop (deadline or global stop signal).
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.shared.is_stopped()
    }

    /// Check the deadline and raise the global stop if it has passed.
    fn check_time(&self) -> bool {
        if self.shared.is_stopped() {
            return true;
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                self.shared.stop();
                return true;
            }
        }
        false
    }

    /// Score the position after the perspective side plays `mov`.
    ///
    /// The opponent moves next and `depth` plies are searched below the
    /// move with a full window. Returns `None` when the search was stopped
    /// or the deadline had already passed, in which case the result must
    /// not be ranked.
    pub fn score_root_move(&mut self, board: &Board, mov: Pos, depth: i8) -> Option<i32> {
        if self.check_time() {
            return None;
        }
        let mut work = board.clone();
        work.place_stone(mov, self.perspective);
        self.nodes += 1;
        self.shared.count_node();
        if has_five_at_pos(&work, mov, self.perspective) {
            return Some(WIN_SCORE);
        }

        let hash = self.shared.zobrist.hash(&work);
        let score = self.minimax(&mut work, self.perspective.opponent(), depth, -INF, INF, hash);
        if self.is_stopped() {
            None
        } else {
            Some(score)
        }
    }

    /// Full-window search of `board` with `to_move` to play.
    ///
    /// At depth 0 this is exactly `evaluate(board, perspective)`.
    pub fn search(&mut self, board: &Board, to_move: Stone, depth: i8) -> i32 {
        let mut work = board.clone();
        let hash = self.shared.zobrist.hash(&work);
        self.minimax(&mut work, to_move, depth, -INF, INF, hash)
    }

    /// Depth-limited minimax with alpha-beta pruning.
    ///
    /// `board` is restored to its entry state before returning; `hash`
    /// must be its fingerprint. Cache entries are keyed by `hash` and
    /// `to_move` together. Returns 0 after a stop, and nothing is cached in
    /// that case.
    pub fn minimax(
        &mut self,
        board: &mut Board,
        to_move: Stone,
        depth: i8,
        mut alpha: i32,
        mut beta: i32,
        hash: u64,
    ) -> i32 {
        self.nodes += 1;

        // Time check every 1024 nodes of the whole decision
        if self.shared.count_node() & TIME_CHECK_MASK == 0 && self.check_time() {
            return 0;
        }
        if self.is_stopped() {
            return 0;
        }

        // TT probe
        let key = self.shared.zobrist.cache_key(hash, to_move);
        self.stats.tt_probes += 1;
        if let Some(score) = self.shared.tt.probe(key, depth, alpha, beta) {
            self.stats.tt_hits += 1;
            return score;
        }

        if depth <= 0 || board.is_full() {
            let score = evaluate(board, self.perspective);
            self.shared.tt.store(key, depth, score, EntryType::Exact);
            return score;
        }

        // Collected first: the board is mutated while they are tried
        let moves: Vec<Pos> = candidates(board).collect();
        if moves.is_empty() {
            return evaluate(board, self.perspective);
        }

        let maximizing = to_move == self.perspective;
        let (alpha_orig, beta_orig) = (alpha, beta);
        let mut best = if maximizing { -INF } else { INF };

        for mov in moves {
            board.place_stone(mov, to_move);
            let won = has_five_at_pos(board, mov, to_move);
            let value = if won {
                if maximizing {
                    WIN_SCORE
                } else {
                    -WIN_SCORE
                }
            } else {
                let child_hash = self.shared.zobrist.update_place(hash, mov, to_move);
                self.minimax(board, to_move.opponent(), depth - 1, alpha, beta, child_hash)
            };
            board.remove_stone(mov);

            if self.is_stopped() {
                return 0;
            }

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }

            // Nothing beats a win on the spot
            if won || beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        let entry_type = if best <= alpha_orig {
            EntryType::UpperBound
        } else if best >= beta_orig {
            EntryType::LowerBound
        } else {
            EntryType::Exact
        };
        self.shared.tt.store(key, depth, best, entry_type);

        best
    }
}
