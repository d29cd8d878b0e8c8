//! Main AI Engine integrating all search components
//!
//! This module provides the decision policy: given a board and the side to
//! move, pick one move. The search follows a priority system:
//!
//! 1. **Opening**: centre cell on an empty board
//! 2. **Immediate win**: any move that completes five in a row
//! 3. **Defense**: block an opponent four, then an opponent three
//! 4. **Alpha-Beta**: minimax over every candidate; the first `parallel_batch`
//!    candidates run concurrently on the engine's thread pool, the rest on
//!    the calling thread
//!
//! The chosen move depends only on the board, the side and the
//! configuration: root scores are compared in candidate order with a strict
//! `>`, so the first of equally scored candidates wins no matter which task
//! finished first.
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, Board, EngineConfig, Stone, Pos};
//!
//! // Use smaller depth for faster example
//! let config = EngineConfig { search_depth: 1, ..EngineConfig::default() };
//! let mut engine = AIEngine::with_config(config).unwrap();
//! let mut board = Board::new();
//!
//! board.place_stone(Pos::new(7, 7), Stone::Black);
//!
//! // Get best move for White
//! let result = engine.choose_move(&board, Stone::White);
//! println!("Best move: {:?}", result.best_move);
//! println!("Search type: {:?}", result.search_type);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::board::{Board, Pos, Stone};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::eval::evaluate;
use crate::search::{
    candidates, find_blocking_move, find_winning_move, has_open_three_pattern, SearchStats,
    Searcher, SharedState, TTStats, WIN_SCORE,
};

/// Type of search that produced the result.
///
/// This indicates which phase of the search hierarchy found the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Centre cell on an empty board
    Opening,
    /// Found immediate winning move (5-in-a-row)
    ImmediateWin,
    /// Defensive move to block opponent's threat
    Defense,
    /// Regular alpha-beta search result
    AlphaBeta,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Best move found; `None` when the board is full or the side is empty
    pub best_move: Option<Pos>,
    /// Evaluation score of the position after the move
    pub score: i32,
    /// Type of search that found this move
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Alpha-beta nodes visited; 0 when a tactical tier decided
    pub nodes: u64,
    /// Search counters merged over all root tasks
    pub stats: SearchStats,
    /// Whether the opponent had an open-three shape before the move
    pub opponent_open_three: bool,
}

impl MoveResult {
    #[inline]
    fn tactical(pos: Pos, score: i32, search_type: SearchType, start: Instant) -> Self {
        Self {
            best_move: Some(pos),
            score,
            search_type,
            time_ms: elapsed_ms(start),
            nodes: 0,
            stats: SearchStats::default(),
            opponent_open_three: false,
        }
    }

    /// Create a result indicating no move exists
    #[inline]
    fn no_move(start: Instant) -> Self {
        Self {
            best_move: None,
            score: 0,
            search_type: SearchType::AlphaBeta,
            time_ms: elapsed_ms(start),
            nodes: 0,
            stats: SearchStats::default(),
            opponent_open_three: false,
        }
    }
}

#[inline]
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Score of one root candidate, `None` if its search was cut short.
struct RootOutcome {
    mov: Pos,
    score: Option<i32>,
    nodes: u64,
    stats: SearchStats,
}

/// Main AI Engine for Gomoku.
///
/// Owns the shared search state (Zobrist keys, transposition table, stop
/// flag) and a dedicated `rayon` pool for the root batch. The table is
/// cleared at the start of every search, so no result leaks from one
/// decision into the next.
pub struct AIEngine {
    config: EngineConfig,
    shared: Arc<SharedState>,
    pool: rayon::ThreadPool,
}

impl AIEngine {
    /// Create a new AI engine with default settings.
    ///
    /// ```
    /// use gomoku::AIEngine;
    ///
    /// let engine = AIEngine::new().unwrap();
    /// assert_eq!(engine.config().search_depth, 3);
    /// ```
    pub fn new() -> Result<Self, EngineError> {
        Self::with_config(EngineConfig::default())
    }

    /// Create an AI engine with custom configuration.
    ///
    /// Fails when the configuration does not validate or the thread pool
    /// cannot be built.
    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("gomoku-search-{i}"))
            .build()?;
        let shared = Arc::new(SharedState::new(config.tt_size_mb));
        debug!(
            "engine ready: {} threads, {} table slots",
            config.threads,
            shared.tt().capacity()
        );
        Ok(Self {
            shared,
            config,
            pool,
        })
    }

    /// Get the best move for the given position.
    ///
    /// Convenience wrapper around [`AIEngine::choose_move`].
    #[must_use]
    pub fn get_move(&mut self, board: &Board, side: Stone) -> Option<Pos> {
        self.choose_move(board, side).best_move
    }

    /// Pick a move for `side`.
    ///
    /// Blocks until the move is decided. A full board or `Stone::Empty` as
    /// side yields `best_move == None`; callers should check
    /// [`Board::is_full`] first.
    ///
    /// # Search Priority
    ///
    /// 1. Opening (empty board)
    /// 2. Immediate winning move
    /// 3. Block the opponent's four, then three
    /// 4. Alpha-beta search over all candidates
    #[must_use]
    pub fn choose_move(&mut self, board: &Board, side: Stone) -> MoveResult {
        let start = Instant::now();

        if side == Stone::Empty || board.is_full() {
            debug!("no move: side {:?}, full board {}", side, board.is_full());
            return MoveResult::no_move(start);
        }

        // 0. Opening: the generator has nothing to offer on an empty board
        if board.is_board_empty() {
            debug!("opening move at centre");
            return MoveResult::tactical(Pos::center(), 0, SearchType::Opening, start);
        }

        let opponent_open_three = has_open_three_pattern(board, side.opponent());

        // 1. Check for immediate winning move
        if let Some(win_move) = find_winning_move(board, side) {
            debug!("immediate win at {}", win_move);
            let mut result =
                MoveResult::tactical(win_move, WIN_SCORE, SearchType::ImmediateWin, start);
            result.opponent_open_three = opponent_open_three;
            return result;
        }

        // 2. Block the opponent's four (or three)
        if let Some(block) = find_blocking_move(board, side) {
            debug!("blocking at {}", block);
            let mut after = board.clone();
            after.place_stone(block, side);
            let mut result =
                MoveResult::tactical(block, evaluate(&after, side), SearchType::Defense, start);
            result.opponent_open_three = opponent_open_three;
            return result;
        }

        // 3. Regular alpha-beta search
        let mut result = self.search_root(board, side, start);
        result.opponent_open_three = opponent_open_three;
        result
    }

    /// Score every root candidate and keep the strictly best one.
    fn search_root(&self, board: &Board, side: Stone, start: Instant) -> MoveResult {
        self.shared.reset();
        let deadline = self
            .config
            .time_limit_ms
            .map(|ms| start + Duration::from_millis(ms));
        let depth = self.config.search_depth;

        let moves: Vec<Pos> = candidates(board).collect();
        let split = self.config.parallel_batch.min(moves.len());
        let (batch, rest) = moves.split_at(split);

        let shared = &self.shared;
        let score_candidate = |mov: Pos| {
            let mut searcher = Searcher::new(Arc::clone(shared), side, deadline);
            let score = searcher.score_root_move(board, mov, depth);
            RootOutcome {
                mov,
                score,
                nodes: searcher.nodes(),
                stats: searcher.stats(),
            }
        };

        // Batch on the pool, collected in candidate order
        let mut outcomes: Vec<RootOutcome> = self
            .pool
            .install(|| batch.par_iter().map(|&mov| score_candidate(mov)).collect());
        outcomes.extend(rest.iter().map(|&mov| score_candidate(mov)));

        let mut nodes = 0;
        let mut stats = SearchStats::default();
        let mut best: Option<(Pos, i32)> = None;
        for outcome in &outcomes {
            nodes += outcome.nodes;
            stats.merge(&outcome.stats);
            if let Some(score) = outcome.score {
                if best.map_or(true, |(_, best_score)| score > best_score) {
                    best = Some((outcome.mov, score));
                }
            }
        }

        let completed = outcomes.iter().filter(|o| o.score.is_some()).count();
        if completed < outcomes.len() {
            warn!(
                "time budget hit: {}/{} candidates scored",
                completed,
                outcomes.len()
            );
        }

        let (best_move, score) = match best {
            Some((mov, score)) => (Some(mov), score),
            None => (moves.first().copied(), 0),
        };

        let time_ms = elapsed_ms(start);
        info!(
            "alpha-beta: {:?} score {} ({} candidates, {} in parallel, {} nodes, {} ms)",
            best_move,
            score,
            moves.len(),
            batch.len(),
            nodes,
            time_ms
        );

        MoveResult {
            best_move,
            score,
            search_type: SearchType::AlphaBeta,
            time_ms,
            nodes,
            stats,
            opponent_open_three: false,
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Clear the transposition table cache.
    pub fn clear_cache(&mut self) {
        self.shared.reset();
    }

    /// Get transposition table statistics.
    #[must_use]
    pub fn tt_stats(&self) -> TTStats {
        self.shared.tt_stats()
    }
}
