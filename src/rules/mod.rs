//! Game rules for freestyle Gomoku
//!
//! Five or more stones in a row win; there are no captures and no
//! forbidden moves.

pub mod win;

pub use win::{check_winner, find_five_positions, has_five_at_pos, has_five_in_row, WIN_LENGTH};
