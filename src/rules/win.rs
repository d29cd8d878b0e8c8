//! Win condition checking: five or more stones in a row (overlines count)

use crate::board::{Axis, Board, Pos, Stone};

/// Length of a winning run.
pub const WIN_LENGTH: i32 = 5;

/// Count the contiguous run of `color` through `pos` along `(dr, dc)`,
/// walking both signs until the board edge or a differing cell.
#[inline]
fn run_through(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone) -> i32 {
    let mut count = 1;
    for sign in [1, -1] {
        let mut k = 1;
        while let Some(next) = pos.offset(dr * sign, dc * sign, k) {
            if board.get(next) != color {
                break;
            }
            count += 1;
            k += 1;
        }
    }
    count
}

/// Fast five-in-a-row check at a specific position.
///
/// Only checks the 4 axes through `pos`, so it must be called with the
/// last placed cell. No allocation.
#[inline]
pub fn has_five_at_pos(board: &Board, pos: Pos, color: Stone) -> bool {
    if color == Stone::Empty || board.get(pos) != color {
        return false;
    }
    Axis::ALL.iter().any(|axis| {
        let (dr, dc) = axis.delta();
        run_through(board, pos, dr, dc, color) >= WIN_LENGTH
    })
}

/// Check if there's 5+ in a row anywhere for the given color
pub fn has_five_in_row(board: &Board, stone: Stone) -> bool {
    find_five_positions(board, stone).is_some()
}

/// Find the positions of a 5-in-a-row if one exists.
///
/// Returns the full run (at least 5 positions, ordered along the axis).
pub fn find_five_positions(board: &Board, stone: Stone) -> Option<Vec<Pos>> {
    let stones = board.stones(stone)?;

    for pos in stones.iter_ones() {
        for axis in Axis::ALL {
            let (dr, dc) = axis.delta();
            // Only start from the first stone of a run
            if pos
                .offset(dr, dc, -1)
                .is_some_and(|prev| board.get(prev) == stone)
            {
                continue;
            }

            let mut line = vec![pos];
            let mut k = 1;
            while let Some(next) = pos.offset(dr, dc, k) {
                if board.get(next) != stone {
                    break;
                }
                line.push(next);
                k += 1;
            }

            if line.len() >= WIN_LENGTH as usize {
                return Some(line);
            }
        }
    }
    None
}

/// Whole-board winner check, for positions whose last move is unknown
/// (loaded from text, for instance).
pub fn check_winner(board: &Board) -> Option<Stone> {
    [Stone::Black, Stone::White]
        .into_iter()
        .find(|&stone| has_five_in_row(board, stone))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_in_row_horizontal() {
        let mut board = Board::new();
        for i in 0..5 {
            board.place_stone(Pos::new(9, i), Stone::Black);
        }
        assert!(has_five_in_row(&board, Stone::Black));
        assert!(!has_five_in_row(&board, Stone::White));
        assert!(has_five_at_pos(&board, Pos::new(9, 2), Stone::Black));
    }

    #[test]
    fn test_five_in_row_diagonal() {
        let mut board = Board::new();
        for i in 0..5 {
            board.place_stone(Pos::new(i, i), Stone::White);
        }
        assert!(has_five_in_row(&board, Stone::White));
        assert!(has_five_at_pos(&board, Pos::new(4, 4), Stone::White));
    }

    #[test]
    fn test_diagonal_sw_five() {
        let mut board = Board::new();
        for i in 0..5 {
            board.place_stone(Pos::new(4 + i, 8 - i), Stone::White);
        }
        assert_eq!(check_winner(&board), Some(Stone::White));
        let five = find_five_positions(&board, Stone::White).unwrap();
        assert_eq!(five.len(), 5);
        assert_eq!(five[0], Pos::new(4, 8));
    }

    #[test]
    fn test_four_in_row_not_win() {
        let mut board = Board::new();
        for i in 0..4 {
            board.place_stone(Pos::new(9, i), Stone::Black);
        }
        assert!(!has_five_in_row(&board, Stone::Black));
        assert!(!has_five_at_pos(&board, Pos::new(9, 3), Stone::Black));
    }

    #[test]
    fn test_gap_breaks_run() {
        let mut board = Board::new();
        for c in [0, 1, 2, 4, 5] {
            board.place_stone(Pos::new(3, c), Stone::Black);
        }
        assert!(!has_five_at_pos(&board, Pos::new(3, 2), Stone::Black));
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_anchor_must_hold_color() {
        let mut board = Board::new();
        for c in 0..5 {
            board.place_stone(Pos::new(0, c), Stone::Black);
        }
        assert!(!has_five_at_pos(&board, Pos::new(1, 0), Stone::Black));
        assert!(!has_five_at_pos(&board, Pos::new(0, 0), Stone::Empty));
    }

    #[test]
    fn test_five_at_corner() {
        let mut board = Board::new();
        for i in 0..5 {
            board.place_stone(Pos::new(10 + i, 10 + i), Stone::White);
        }
        assert!(has_five_at_pos(&board, Pos::new(14, 14), Stone::White));
        assert_eq!(check_winner(&board), Some(Stone::White));
    }

    #[test]
    fn test_empty_not_five() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
        assert!(find_five_positions(&board, Stone::Empty).is_none());
    }
}
