use crate::{
    FIELD_WIDTH,
    core::figure::{Figure, FigureKind},
};

use super::random::RandomSource;

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const LAST_COLUMN: i32 = FIELD_WIDTH as i32 - 1;

/// Produces falling figures and keeps the upcoming shape for the preview.
///
/// Each spawned figure is shifted by a uniform random number of columns so that all of its
/// cells fit inside the field horizontally. Rows are left as the catalog defines them, so new
/// figures enter from above the visible field.
///
/// # Example
///
/// ```
/// use stackfall_engine::{FigureKind, FigureRng, FigureSeed, Spawner};
///
/// let mut spawner = Spawner::new(FigureRng::with_seed(FigureSeed::from_bytes([1; 16])));
/// let upcoming = spawner.next_kind();
/// let figure = spawner.spawn_next();
/// assert_eq!(figure.kind(), upcoming);
/// ```
#[derive(Debug, Clone)]
pub struct Spawner<R> {
    rng: R,
    next: FigureKind,
}

impl<R> Spawner<R>
where
    R: RandomSource,
{
    /// Creates a spawner and draws the first upcoming shape.
    pub fn new(mut rng: R) -> Self {
        let next = draw_kind(&mut rng);
        Self { rng, next }
    }

    /// The shape [`Self::spawn_next`] will produce.
    #[must_use]
    pub fn next_kind(&self) -> FigureKind {
        self.next
    }

    /// Places a figure of the given shape at a random column where it fits.
    pub fn spawn(&mut self, kind: FigureKind) -> Figure {
        let max_shift = LAST_COLUMN - kind.max_col_offset();
        let shift = self.rng.next_int(0, max_shift);
        Figure::at_column(kind, shift)
    }

    /// Spawns the upcoming shape and draws its successor.
    pub fn spawn_next(&mut self) -> Figure {
        let figure = self.spawn(self.next);
        self.next = draw_kind(&mut self.rng);
        log::debug!(
            "spawned {} at {:?}, next {}",
            figure.kind().as_char(),
            figure.cells(),
            self.next.as_char()
        );
        figure
    }

    /// Discards the upcoming shape and draws a new one.
    pub fn reroll(&mut self) {
        self.next = draw_kind(&mut self.rng);
    }
}

fn draw_kind<R>(rng: &mut R) -> FigureKind
where
    R: RandomSource,
{
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let last = FigureKind::LEN as i32 - 1;
    let index = usize::try_from(rng.next_int(0, last)).unwrap_or(0);
    FigureKind::ALL[index.min(FigureKind::LEN - 1)]
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::{FigureRng, FigureSeed};

    /// Replays a fixed list of values, clamped into the requested range, then repeats `min`.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct ScriptedRandom {
        values: VecDeque<i32>,
    }

    impl ScriptedRandom {
        pub(crate) fn new(values: impl IntoIterator<Item = i32>) -> Self {
            Self {
                values: values.into_iter().collect(),
            }
        }
    }

    impl RandomSource for ScriptedRandom {
        fn next_int(&mut self, min: i32, max: i32) -> i32 {
            self.values.pop_front().unwrap_or(min).clamp(min, max)
        }
    }

    #[test]
    fn test_spawn_fits_columns_for_every_shift() {
        for kind in FigureKind::ALL {
            let max_shift = LAST_COLUMN - kind.max_col_offset();
            for shift in 0..=max_shift {
                let mut spawner = Spawner::new(ScriptedRandom::new([0, shift]));
                let figure = spawner.spawn(kind);
                assert!(
                    figure.cells().iter().all(|c| c.is_within_columns()),
                    "{kind:?} at shift {shift}"
                );
            }
        }
    }

    #[test]
    fn test_spawn_uses_full_column_range() {
        // A scripted value above the range is clamped to the widest legal shift.
        let mut spawner = Spawner::new(ScriptedRandom::new([0, 99]));
        let figure = spawner.spawn(FigureKind::T);
        let max_col = figure.cells().iter().map(|c| c.col).max();
        assert_eq!(max_col, Some(LAST_COLUMN));
    }

    #[test]
    fn test_spawn_next_advances_preview() {
        // first draw: next = Z (4); spawn shift 2; successor draw: L (6)
        let mut spawner = Spawner::new(ScriptedRandom::new([4, 2, 6]));
        assert_eq!(spawner.next_kind(), FigureKind::Z);
        let figure = spawner.spawn_next();
        assert_eq!(figure.kind(), FigureKind::Z);
        assert_eq!(figure, Figure::at_column(FigureKind::Z, 2));
        assert_eq!(spawner.next_kind(), FigureKind::L);
    }

    #[test]
    fn test_seeded_spawner_covers_all_kinds() {
        let mut spawner = Spawner::new(FigureRng::with_seed(FigureSeed::from_bytes([3; 16])));
        let mut seen = [false; FigureKind::LEN];
        for _ in 0..500 {
            let figure = spawner.spawn_next();
            seen[figure.kind() as usize] = true;
            assert!(figure.cells().iter().all(|c| c.is_within_columns()));
        }
        assert!(seen.iter().all(|s| *s));
    }
}
