//! Position evaluation
//!
//! - [`patterns`]: window weights and the blocked-end reduction
//! - [`heuristic`]: line scanning and the zero-sum board score

pub mod heuristic;
pub mod patterns;

pub use heuristic::{evaluate, evaluate_line};
pub use patterns::PatternScore;
