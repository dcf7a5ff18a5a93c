use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Points awarded for each cleared row.
pub const POINTS_PER_LINE: usize = 100;

/// Level policy: score thresholds and the gravity interval of each level.
///
/// - `level_thresholds[i]` is the score needed to reach level `i + 2`
/// - `gravity_intervals_ms[i]` is the gravity interval at level `i + 1`
///
/// Levels past the end of the interval table reuse its last entry.
///
/// Both tables are validated on construction and on deserialization: thresholds must be
/// strictly ascending, intervals non-empty, non-zero and non-increasing.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use stackfall_engine::Progression;
///
/// let progression = Progression::new(vec![300, 700, 1000], vec![500, 400, 300]).unwrap();
/// assert_eq!(progression.level_for_score(299), 1);
/// assert_eq!(progression.level_for_score(700), 3);
/// assert_eq!(progression.gravity_interval(4), Duration::from_millis(300));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProgression")]
pub struct Progression {
    level_thresholds: Vec<usize>,
    gravity_intervals_ms: Vec<u64>,
}

#[derive(Deserialize)]
struct RawProgression {
    level_thresholds: Vec<usize>,
    gravity_intervals_ms: Vec<u64>,
}

impl TryFrom<RawProgression> for Progression {
    type Error = ProgressionError;

    fn try_from(raw: RawProgression) -> Result<Self, Self::Error> {
        Self::new(raw.level_thresholds, raw.gravity_intervals_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ProgressionError {
    #[display("gravity interval table is empty")]
    EmptyGravityTable,
    #[display("gravity interval for level {level} is zero")]
    ZeroInterval { level: usize },
    #[display("gravity interval for level {level} is longer than the one before it")]
    SlowerAtHigherLevel { level: usize },
    #[display("score threshold for level {level} is not above the previous one")]
    UnsortedThresholds { level: usize },
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            level_thresholds: vec![1000, 2000, 3000, 5000, 6000, 7000, 8000],
            gravity_intervals_ms: vec![450, 400, 350, 300, 250, 200, 150],
        }
    }
}

impl Progression {
    pub fn new(
        level_thresholds: Vec<usize>,
        gravity_intervals_ms: Vec<u64>,
    ) -> Result<Self, ProgressionError> {
        if gravity_intervals_ms.is_empty() {
            return Err(ProgressionError::EmptyGravityTable);
        }
        for (i, ms) in gravity_intervals_ms.iter().enumerate() {
            if *ms == 0 {
                return Err(ProgressionError::ZeroInterval { level: i + 1 });
            }
            if i > 0 && *ms > gravity_intervals_ms[i - 1] {
                return Err(ProgressionError::SlowerAtHigherLevel { level: i + 1 });
            }
        }
        for i in 1..level_thresholds.len() {
            if level_thresholds[i] <= level_thresholds[i - 1] {
                return Err(ProgressionError::UnsortedThresholds { level: i + 2 });
            }
        }
        Ok(Self {
            level_thresholds,
            gravity_intervals_ms,
        })
    }

    /// Level reached at the given cumulative score (starting at 1).
    #[must_use]
    pub fn level_for_score(&self, score: usize) -> usize {
        1 + self
            .level_thresholds
            .iter()
            .take_while(|threshold| score >= **threshold)
            .count()
    }

    /// Gravity interval at the given level, clamped to the table range.
    #[must_use]
    pub fn gravity_interval(&self, level: usize) -> Duration {
        let index = level
            .saturating_sub(1)
            .min(self.gravity_intervals_ms.len() - 1);
        Duration::from_millis(self.gravity_intervals_ms[index])
    }
}
