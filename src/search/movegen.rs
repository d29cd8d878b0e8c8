//! Candidate move generation
//!
//! Only empty cells touching at least one stone (8-neighbourhood) are
//! considered. Cells are produced in row-major order, which is also the
//! tie-break order of the tactical scanner and of the root search.

use crate::board::{Board, Pos, TOTAL_CELLS};

/// Eight neighbour offsets, scanned top-left to bottom-right.
const NEIGHBORS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Whether `pos` has at least one occupied neighbour.
#[inline]
fn has_neighbor(board: &Board, pos: Pos) -> bool {
    NEIGHBORS
        .iter()
        .any(|&(dr, dc)| pos.offset(dr, dc, 1).is_some_and(|n| !board.is_empty(n)))
}

/// Lazy iterator over candidate moves.
///
/// Borrowing the board keeps it immutable while the iterator lives; the
/// search collects candidates before it starts placing stones. A clone
/// continues from the same cursor; call [`candidates`] again to restart
/// from the top.
#[derive(Clone)]
pub struct Candidates<'a> {
    board: &'a Board,
    next: usize,
}

impl Iterator for Candidates<'_> {
    type Item = Pos;

    fn next(&mut self) -> Option<Pos> {
        while self.next < TOTAL_CELLS {
            let pos = Pos::from_index(self.next);
            self.next += 1;
            if self.board.is_empty(pos) && has_neighbor(self.board, pos) {
                return Some(pos);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(TOTAL_CELLS - self.next))
    }
}

impl std::iter::FusedIterator for Candidates<'_> {}

/// Candidate moves for `board`, in row-major order.
///
/// Yields nothing on an empty board; the caller picks the opening move.
///
/// ```
/// use gomoku::board::{Board, Pos, Stone};
/// use gomoku::search::candidates;
///
/// let mut board = Board::new();
/// assert_eq!(candidates(&board).count(), 0);
///
/// board.place_stone(Pos::new(7, 7), Stone::Black);
/// assert_eq!(candidates(&board).count(), 8);
/// ```
#[must_use]
pub fn candidates(board: &Board) -> Candidates<'_> {
    Candidates { board, next: 0 }
}
