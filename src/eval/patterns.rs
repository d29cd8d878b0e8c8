//! Window weights for line evaluation
//!
//! A length-5 window holding only one side's stones is weighted by how many
//! of that side's stones it holds. Each step is ten times the previous one,
//! so a single longer run outweighs any realistic number of shorter ones.

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    /// Five in the window: already a win, never reduced by blocked ends
    pub const FIVE: i32 = 100_000;
    /// Four stones and one empty cell
    pub const FOUR: i32 = 10_000;
    pub const THREE: i32 = 1_000;
    pub const TWO: i32 = 100;
    pub const ONE: i32 = 10;
}

/// Base weight for a window holding `count` stones of one side (0..=5).
#[inline]
pub fn window_weight(count: usize) -> i32 {
    match count {
        5 => PatternScore::FIVE,
        4 => PatternScore::FOUR,
        3 => PatternScore::THREE,
        2 => PatternScore::TWO,
        1 => PatternScore::ONE,
        _ => 0,
    }
}

/// Apply the end-openness reduction: one blocked end halves the weight,
/// two blocked ends quarter it. Fives are exempt.
#[inline]
pub fn openness_adjusted(base: i32, count: usize, blocked_left: bool, blocked_right: bool) -> i32 {
    if count >= 5 {
        return base;
    }
    match (blocked_left, blocked_right) {
        (true, true) => base / 4,
        (true, false) | (false, true) => base / 2,
        (false, false) => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_score_hierarchy() {
        assert!(PatternScore::FIVE > PatternScore::FOUR);
        assert!(PatternScore::FOUR > PatternScore::THREE);
        assert!(PatternScore::THREE > PatternScore::TWO);
        assert!(PatternScore::TWO > PatternScore::ONE);
        // A blocked four still outweighs any open three
        assert!(PatternScore::FOUR / 4 > PatternScore::THREE);
    }

    #[test]
    fn test_window_weight_counts() {
        assert_eq!(window_weight(0), 0);
        assert_eq!(window_weight(3), PatternScore::THREE);
        assert_eq!(window_weight(5), PatternScore::FIVE);
    }

    #[test]
    fn test_openness() {
        let four = PatternScore::FOUR;
        assert_eq!(openness_adjusted(four, 4, false, false), four);
        assert_eq!(openness_adjusted(four, 4, true, false), four / 2);
        assert_eq!(openness_adjusted(four, 4, false, true), four / 2);
        assert_eq!(openness_adjusted(four, 4, true, true), four / 4);
        assert_eq!(
            openness_adjusted(PatternScore::FIVE, 5, true, true),
            PatternScore::FIVE
        );
    }
}
