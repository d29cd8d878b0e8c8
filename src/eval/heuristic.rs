//! Static evaluation of a board position
//!
//! Every row, column and diagonal is scanned with a sliding length-5 window.
//! The score for a side is its own window total minus the opponent's, so the
//! result is a net advantage, zero-sum between the two sides.
//!
//! Overlapping windows over the same run are all counted; longer contiguous
//! threats therefore weigh more than their base weight alone.

use crate::board::{Board, Stone};

use super::patterns::{openness_adjusted, window_weight};

/// Window length, equal to the winning run length.
const WINDOW: usize = 5;

/// Evaluate the board from the perspective of the given color.
///
/// Positive values favour `color`. `evaluate(b, Black) == -evaluate(b, White)`.
#[must_use]
pub fn evaluate(board: &Board, color: Stone) -> i32 {
    let opponent = color.opponent();
    board
        .lines()
        .map(|line| {
            let cells = line.as_slice();
            evaluate_line(cells, color) - evaluate_line(cells, opponent)
        })
        .sum()
}

/// Score one line for `color`.
///
/// Windows containing any opponent stone score 0. For the rest, the weight
/// depends on the number of `color` stones and on the cell just outside each
/// end of the window: occupied (by either side) or off the line counts as
/// blocked.
#[must_use]
pub fn evaluate_line(line: &[Stone], color: Stone) -> i32 {
    let n = line.len();
    if n < WINDOW || color == Stone::Empty {
        return 0;
    }
    let opponent = color.opponent();

    let mut score = 0;
    for i in 0..=n - WINDOW {
        let window = &line[i..i + WINDOW];
        if window.contains(&opponent) {
            continue;
        }
        let count = window.iter().filter(|&&s| s == color).count();
        if count == 0 {
            continue;
        }

        let blocked_left = i == 0 || line[i - 1] != Stone::Empty;
        let blocked_right = i + WINDOW >= n || line[i + WINDOW] != Stone::Empty;
        score += openness_adjusted(window_weight(count), count, blocked_left, blocked_right);
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;
    use crate::eval::PatternScore;

    fn parse_line(s: &str) -> Vec<Stone> {
        s.chars().filter_map(Stone::from_symbol).collect()
    }

    #[test]
    fn test_empty_board_is_zero() {
        let board = Board::new();
        assert_eq!(evaluate(&board, Stone::Black), 0);
        assert_eq!(evaluate(&board, Stone::White), 0);
    }

    #[test]
    fn test_short_line_scores_nothing() {
        assert_eq!(evaluate_line(&parse_line("XXXX"), Stone::Black), 0);
    }

    #[test]
    fn test_open_four_beats_half_open_four() {
        let open = evaluate_line(&parse_line(".XXXX."), Stone::Black);
        let half = evaluate_line(&parse_line("OXXXX."), Stone::Black);
        assert!(open > half, "open {} vs half-open {}", open, half);

        let open_long = evaluate_line(&parse_line("....XXXX......."), Stone::Black);
        let half_long = evaluate_line(&parse_line("...OXXXX......."), Stone::Black);
        assert!(open_long > half_long);
    }

    #[test]
    fn test_five_scores_max_regardless_of_openness() {
        assert_eq!(
            evaluate_line(&parse_line("XXXXX"), Stone::Black),
            PatternScore::FIVE
        );
        assert_eq!(
            evaluate_line(&parse_line("OXXXXXO"), Stone::Black),
            PatternScore::FIVE
        );
        let open = evaluate_line(&parse_line(".XXXXX."), Stone::Black);
        assert!(open >= PatternScore::FIVE);
    }

    #[test]
    fn test_window_with_opponent_scores_zero() {
        assert_eq!(evaluate_line(&parse_line("XXOXX"), Stone::Black), 0);
        assert_eq!(evaluate_line(&parse_line("XXOXX"), Stone::White), 0);
    }

    #[test]
    fn test_single_window_weights() {
        // Both ends are off the line: quartered
        assert_eq!(
            evaluate_line(&parse_line("XX..."), Stone::Black),
            PatternScore::TWO / 4
        );
        // Each of the two windows touches one edge of the line
        let score = evaluate_line(&parse_line(".XXX.."), Stone::Black);
        assert_eq!(score, PatternScore::THREE / 2 + PatternScore::THREE / 2);
    }

    #[test]
    fn test_evaluate_zero_sum() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(7, 8), Stone::Black);
        board.place_stone(Pos::new(8, 8), Stone::White);
        board.place_stone(Pos::new(6, 6), Stone::White);
        board.place_stone(Pos::new(7, 6), Stone::Black);

        let black = evaluate(&board, Stone::Black);
        let white = evaluate(&board, Stone::White);
        assert_eq!(black, -white);
        assert!(black > 0, "three in a row should favour black: {}", black);
    }

    #[test]
    fn test_longer_run_scores_higher() {
        let mut two = Board::new();
        two.place_stone(Pos::new(7, 7), Stone::Black);
        two.place_stone(Pos::new(7, 8), Stone::Black);

        let mut three = two.clone();
        three.place_stone(Pos::new(7, 9), Stone::Black);

        assert!(evaluate(&three, Stone::Black) > evaluate(&two, Stone::Black));
    }
}
