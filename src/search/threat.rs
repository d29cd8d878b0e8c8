//! Search-free tactical detectors
//!
//! Cheap checks run before the full search:
//! - a move that wins on the spot,
//! - the cell that must be taken to stop an opponent four (or three),
//! - a scan for open-three shapes, reported as a diagnostic.
//!
//! All scans walk anchors in row-major order and the four directions in
//! [`DIRECTIONS`] order, so the first hit is deterministic.

use crate::board::{Board, Pos, Stone, BOARD_SIZE};
use crate::rules::WIN_LENGTH;

use super::movegen::candidates;

/// Direction vectors for line checking (4 directions)
const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// Cells gathered per anchor when looking for open threes.
const SHAPE_SPAN: usize = 6;

/// Open-three shapes, `X` = side, `.` = empty.
const OPEN_THREE_SHAPES: [&[u8]; 3] = [b".XXX.", b"X.XX", b"XX.X"];

/// First candidate that gives `side` five in a row, in generation order.
#[must_use]
pub fn find_winning_move(board: &Board, side: Stone) -> Option<Pos> {
    if side == Stone::Empty {
        return None;
    }
    candidates(board).find(|&pos| {
        let mut next = board.clone();
        next.place_stone(pos, side);
        next.is_win(i32::from(pos.row), i32::from(pos.col), side)
    })
}

/// Cell `side` must take to stop the opponent.
///
/// First pass: length-5 windows holding four opponent stones, one empty cell
/// and none of `side`. Second pass, only if the first finds nothing:
/// length-4 windows holding three opponent stones and one empty cell.
#[must_use]
pub fn find_blocking_move(board: &Board, side: Stone) -> Option<Pos> {
    if side == Stone::Empty {
        return None;
    }
    let opponent = side.opponent();
    let len = WIN_LENGTH as usize;
    scan_windows(board, len, opponent, side)
        .or_else(|| scan_windows(board, len - 1, opponent, side))
}

/// Find the single empty cell of the first window of `len` cells holding
/// `len - 1` stones of `attacker` and none of `defender`.
fn scan_windows(board: &Board, len: usize, attacker: Stone, defender: Stone) -> Option<Pos> {
    for idx in 0..BOARD_SIZE * BOARD_SIZE {
        let anchor = Pos::from_index(idx);
        for &(dr, dc) in &DIRECTIONS {
            if let Some(pos) = window_gap(board, anchor, dr, dc, len, attacker, defender) {
                return Some(pos);
            }
        }
    }
    None
}

#[inline]
fn window_gap(
    board: &Board,
    anchor: Pos,
    dr: i32,
    dc: i32,
    len: usize,
    attacker: Stone,
    defender: Stone,
) -> Option<Pos> {
    let mut attackers = 0;
    let mut gap = None;
    for k in 0..len as i32 {
        let pos = anchor.offset(dr, dc, k)?;
        match board.get(pos) {
            s if s == defender => return None,
            s if s == attacker => attackers += 1,
            _ => {
                if gap.is_some() {
                    return None;
                }
                gap = Some(pos);
            }
        }
    }
    if attackers == len - 1 {
        gap
    } else {
        None
    }
}

/// Whether `side` has an open-three shape anywhere on the board.
///
/// From every anchor and direction up to six in-bounds cells are read and
/// searched for `.XXX.`, `X.XX` or `XX.X` (`X` = `side`). Not a selection
/// tier: [`find_blocking_move`] already answers every such shape of the
/// opponent.
#[must_use]
pub fn has_open_three_pattern(board: &Board, side: Stone) -> bool {
    if side == Stone::Empty {
        return false;
    }
    for idx in 0..BOARD_SIZE * BOARD_SIZE {
        let anchor = Pos::from_index(idx);
        for &(dr, dc) in &DIRECTIONS {
            let mut buf = [0u8; SHAPE_SPAN];
            let mut len = 0;
            while len < SHAPE_SPAN {
                let Some(pos) = anchor.offset(dr, dc, len as i32) else {
                    break;
                };
                buf[len] = match board.get(pos) {
                    Stone::Empty => b'.',
                    s if s == side => b'X',
                    _ => b'O',
                };
                len += 1;
            }
            let cells = &buf[..len];
            if OPEN_THREE_SHAPES
                .iter()
                .any(|shape| cells.windows(shape.len()).any(|w| w == *shape))
            {
                return true;
            }
        }
    }
    false
}
