//! Board structure and terminal-state queries

use std::fmt;
use std::str::FromStr;

use super::bitboard::Bitboard;
use super::line::Lines;
use super::{Pos, Stone, BOARD_SIZE, TOTAL_CELLS};
use crate::error::BoardParseError;
use crate::rules::has_five_at_pos;

/// Game board.
///
/// Every cell goes empty -> occupied at most once through [`Board::place`];
/// the only way back is the explicit reset [`Board::remove_stone`] (or
/// [`Board::reset`] for the whole grid). Cloning is a plain copy of two
/// bitboards, cheap enough for the search to do at every root candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Board {
    /// Black stones bitboard
    pub black: Bitboard,
    /// White stones bitboard
    pub white: Bitboard,
}

impl Board {
    pub fn new() -> Self {
        Self {
            black: Bitboard::new(),
            white: Bitboard::new(),
        }
    }

    /// Place `stone` at (row, col).
    ///
    /// Fails without touching the board when the coordinates are off the
    /// board, the cell is occupied, or `stone` is [`Stone::Empty`].
    pub fn place(&mut self, row: i32, col: i32, stone: Stone) -> bool {
        let Some(pos) = Pos::try_new(row, col) else {
            return false;
        };
        if stone == Stone::Empty || !self.is_empty(pos) {
            return false;
        }
        self.place_stone(pos, stone);
        true
    }

    /// Cell value at (row, col), `None` off the board.
    #[inline]
    pub fn cell(&self, row: i32, col: i32) -> Option<Stone> {
        Pos::try_new(row, col).map(|pos| self.get(pos))
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if self.black.get(pos) {
            Stone::Black
        } else if self.white.get(pos) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.black.get(pos) && !self.white.get(pos)
    }

    /// Place a stone without validation.
    /// Callers must have checked the cell is empty; use `place` otherwise.
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) {
        debug_assert!(self.is_empty(pos));
        match stone {
            Stone::Black => self.black.set(pos),
            Stone::White => self.white.set(pos),
            Stone::Empty => {}
        }
    }

    /// Reset a single cell to empty (unmake).
    #[inline]
    pub fn remove_stone(&mut self, pos: Pos) {
        self.black.clear(pos);
        self.white.clear(pos);
    }

    /// Clear the whole grid.
    pub fn reset(&mut self) {
        self.black = Bitboard::new();
        self.white = Bitboard::new();
    }

    /// Get bitboard for a color (returns None for Empty)
    #[inline]
    pub fn stones(&self, stone: Stone) -> Option<&Bitboard> {
        match stone {
            Stone::Black => Some(&self.black),
            Stone::White => Some(&self.white),
            Stone::Empty => None,
        }
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.black.is_empty() && self.white.is_empty()
    }

    /// True when no empty cell remains.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == TOTAL_CELLS
    }

    /// Whether a run of five or more `stone`s passes through (row, col).
    ///
    /// Anchored at one cell, not a board scan: call it right after placing
    /// at that cell.
    pub fn is_win(&self, row: i32, col: i32, stone: Stone) -> bool {
        match Pos::try_new(row, col) {
            Some(pos) => has_five_at_pos(self, pos, stone),
            None => false,
        }
    }

    /// Every horizontal, vertical and diagonal line of the grid.
    pub fn lines(&self) -> Lines<'_> {
        Lines::new(self)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for c in 0..BOARD_SIZE {
            write!(f, "{:>3}", c)?;
        }
        writeln!(f)?;
        for r in 0..BOARD_SIZE {
            write!(f, "{:>3}", r)?;
            for c in 0..BOARD_SIZE {
                write!(f, "{:>3}", self.get(Pos::new(r as u8, c as u8)).symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parse rows of `.`/`X`/`O`; the index header and leading row numbers
    /// written by `Display` are accepted and ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::new();
        let mut row = 0usize;

        for line in s.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if line.chars().all(|c| c.is_ascii_digit() || c.is_whitespace()) {
                continue;
            }
            if row >= BOARD_SIZE {
                return Err(BoardParseError::RowCount(row + 1));
            }

            let body = line.trim_start_matches(|c: char| c.is_ascii_digit());
            let mut col = 0usize;
            for ch in body.chars().filter(|c| !c.is_whitespace()) {
                let stone = Stone::from_symbol(ch)
                    .ok_or(BoardParseError::InvalidChar { row, ch })?;
                if col < BOARD_SIZE && stone != Stone::Empty {
                    board.place_stone(Pos::new(row as u8, col as u8), stone);
                }
                col += 1;
            }
            if col != BOARD_SIZE {
                return Err(BoardParseError::RowLength { row, len: col });
            }
            row += 1;
        }

        if row != BOARD_SIZE {
            return Err(BoardParseError::RowCount(row));
        }
        Ok(board)
    }
}
