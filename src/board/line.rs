//! Read-only lines of cells along the four axis families
//!
//! A line is computed on demand from the grid and never stored: rows and
//! columns have `BOARD_SIZE` cells, diagonals anywhere from 1 to `BOARD_SIZE`.

use super::{Board, Pos, Stone, BOARD_SIZE};

/// Axis families, in the order the evaluator and scanners walk them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left to right
    Horizontal,
    /// Top to bottom
    Vertical,
    /// Diagonal ↘
    DiagonalDown,
    /// Diagonal ↙
    DiagonalUp,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::DiagonalDown,
        Axis::DiagonalUp,
    ];

    /// Unit step `(dr, dc)` along the axis.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::DiagonalDown => (1, 1),
            Axis::DiagonalUp => (1, -1),
        }
    }

    /// Number of distinct lines in this family.
    #[inline]
    const fn line_count(self) -> usize {
        match self {
            Axis::Horizontal | Axis::Vertical => BOARD_SIZE,
            Axis::DiagonalDown | Axis::DiagonalUp => 2 * BOARD_SIZE - 1,
        }
    }

    /// First cell of the `k`-th line of this family.
    fn start(self, k: usize) -> Pos {
        let n = BOARD_SIZE;
        let (row, col) = match self {
            Axis::Horizontal => (k, 0),
            Axis::Vertical => (0, k),
            Axis::DiagonalDown if k < n => (n - 1 - k, 0),
            Axis::DiagonalDown => (0, k + 1 - n),
            Axis::DiagonalUp if k < n => (0, k),
            Axis::DiagonalUp => (k + 1 - n, n - 1),
        };
        Pos::new(row as u8, col as u8)
    }
}

/// Cells of one line, stored inline (no allocation).
#[derive(Debug, Clone, Copy)]
pub struct Line {
    cells: [Stone; BOARD_SIZE],
    len: usize,
}

impl Line {
    /// Walk from `start` along `(dr, dc)` until the board edge.
    pub fn collect(board: &Board, start: Pos, dr: i32, dc: i32) -> Self {
        let mut cells = [Stone::Empty; BOARD_SIZE];
        let mut len = 0;
        let mut cur = Some(start);
        while let Some(pos) = cur {
            if len == BOARD_SIZE {
                break;
            }
            cells[len] = board.get(pos);
            len += 1;
            cur = pos.offset(dr, dc, 1);
        }
        Self { cells, len }
    }

    #[inline]
    pub fn as_slice(&self) -> &[Stone] {
        &self.cells[..self.len]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Iterator over every line of every axis family.
pub struct Lines<'a> {
    board: &'a Board,
    axis: usize,
    k: usize,
}

impl<'a> Lines<'a> {
    pub(super) fn new(board: &'a Board) -> Self {
        Self {
            board,
            axis: 0,
            k: 0,
        }
    }
}

impl Iterator for Lines<'_> {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        let axis = *Axis::ALL.get(self.axis)?;
        let start = axis.start(self.k);
        let (dr, dc) = axis.delta();

        self.k += 1;
        if self.k == axis.line_count() {
            self.k = 0;
            self.axis += 1;
        }
        Some(Line::collect(self.board, start, dr, dc))
    }
}
