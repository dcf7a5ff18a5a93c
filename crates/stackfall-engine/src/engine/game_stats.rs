use serde::Serialize;

use super::progression::{POINTS_PER_LINE, Progression};

/// Game statistics tracking score, level, and settlement counts.
///
/// - **Score**: `POINTS_PER_LINE` for every cleared row
/// - **Level**: step function of score against [`Progression`], never decreasing
/// - **Settled figures**: total number of figures merged into the field
/// - **Line clear distribution**: count of settlements that cleared 0, 1, 2, 3 or 4 rows
///
/// # Example
///
/// ```
/// use stackfall_engine::{GameStats, Progression};
///
/// let progression = Progression::default();
/// let mut stats = GameStats::new();
/// stats.record_settlement(2, &progression);
///
/// assert_eq!(stats.score(), 200);
/// assert_eq!(stats.cleared_lines(), 2);
/// assert_eq!(stats.line_cleared_counter()[2], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: usize,
    level: usize,
    settled_figures: usize,
    cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new tracker at score 0, level 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            settled_figures: 0,
            cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    #[must_use]
    pub const fn settled_figures(&self) -> usize {
        self.settled_figures
    }

    #[must_use]
    pub const fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    /// Returns a histogram of settlements by number of rows cleared.
    ///
    /// Index `n` counts settlements that cleared `n` rows at once.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a figure settles.
    ///
    /// # Returns
    ///
    /// The new level if this settlement raised it.
    pub fn record_settlement(
        &mut self,
        cleared_lines: usize,
        progression: &Progression,
    ) -> Option<usize> {
        self.settled_figures += 1;
        self.cleared_lines += cleared_lines;
        if let Some(count) = self.line_cleared_counter.get_mut(cleared_lines) {
            *count += 1;
        }
        self.score += cleared_lines * POINTS_PER_LINE;

        let level = progression.level_for_score(self.score);
        if level > self.level {
            self.level = level;
            return Some(level);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_per_line() {
        let progression = Progression::default();
        let mut stats = GameStats::new();
        stats.record_settlement(0, &progression);
        stats.record_settlement(1, &progression);
        stats.record_settlement(4, &progression);
        assert_eq!(stats.score(), 500);
        assert_eq!(stats.settled_figures(), 3);
        assert_eq!(stats.cleared_lines(), 5);
        assert_eq!(stats.line_cleared_counter(), &[1, 1, 0, 0, 1]);
    }

    #[test]
    fn test_level_up_is_reported_once() {
        let progression = Progression::new(vec![300, 700], vec![500, 400, 300]).unwrap();
        let mut stats = GameStats::new();
        assert_eq!(stats.record_settlement(2, &progression), None);
        assert_eq!(stats.record_settlement(1, &progression), Some(2));
        assert_eq!(stats.record_settlement(0, &progression), None);
        assert_eq!(stats.record_settlement(4, &progression), Some(3));
        assert_eq!(stats.level(), 3);
    }

    #[test]
    fn test_level_never_decreases() {
        let mut stats = GameStats::new();
        let low = Progression::new(vec![100], vec![300]).unwrap();
        stats.record_settlement(1, &low);
        assert_eq!(stats.level(), 2);

        // A stricter policy would map the same score back to level 1.
        let strict = Progression::new(vec![10_000], vec![300]).unwrap();
        stats.record_settlement(0, &strict);
        assert_eq!(stats.level(), 2);
    }
}
