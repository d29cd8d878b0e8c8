//! Gomoku AI Engine with freestyle rules
//!
//! A move-decision engine for five-in-a-row:
//! - 15x15 board
//! - 5 or more in a row wins (overlines allowed)
//! - No captures, no forbidden moves
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards
//! - [`rules`]: Win detection
//! - [`eval`]: Position evaluation and heuristics
//! - [`search`]: Hashing, transposition table, move generation, tactical
//!   scans and minimax search
//! - [`engine`]: Decision policy integrating all components
//! - [`config`]: Engine tunables, loadable from TOML
//! - [`error`]: Error types
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{AIEngine, Board, EngineConfig, Stone, Pos};
//!
//! // Shallow search for the doc test
//! let config = EngineConfig { search_depth: 1, threads: 2, ..EngineConfig::default() };
//! let mut engine = AIEngine::with_config(config).unwrap();
//! let mut board = Board::new();
//!
//! assert!(board.place(7, 7, Stone::Black));
//!
//! // AI responds as White
//! if let Some(pos) = engine.get_move(&board, Stone::White) {
//!     assert!(board.place(pos.row.into(), pos.col.into(), Stone::White));
//!     println!("AI plays at ({}, {})", pos.row, pos.col);
//! }
//! ```
//!
//! # Search Priority
//!
//! The AI engine follows this search priority:
//! 1. Centre cell on an empty board
//! 2. Immediate winning move
//! 3. Block the opponent's four, then three
//! 4. Minimax with alpha-beta pruning and a transposition table, the first
//!    root candidates searched in parallel

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, BOARD_SIZE};
pub use config::EngineConfig;
pub use engine::{AIEngine, MoveResult, SearchType};
pub use error::{BoardParseError, ConfigError, EngineError};
