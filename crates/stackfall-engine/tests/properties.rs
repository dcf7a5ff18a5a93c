//! Property tests for spawning, movement, rotation and line clearing.

use std::collections::VecDeque;

use proptest::prelude::*;
use stackfall_engine::{
    Cell, Descent, FIELD_HEIGHT, FIELD_WIDTH, Figure, FigureKind, GameField, GameStats,
    MoveRejected, POINTS_PER_LINE, Progression, RandomSource, SettledField, Spawner,
};

#[derive(Debug, Clone)]
struct Script(VecDeque<i32>);

impl RandomSource for Script {
    fn next_int(&mut self, min: i32, max: i32) -> i32 {
        self.0.pop_front().unwrap_or(min).clamp(min, max)
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const WIDTH: i32 = FIELD_WIDTH as i32;
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const HEIGHT: i32 = FIELD_HEIGHT as i32;

fn any_kind() -> impl Strategy<Value = FigureKind> {
    prop::sample::select(FigureKind::ALL.to_vec())
}

/// Random settled fields, denser toward the bottom.
fn any_settled() -> impl Strategy<Value = SettledField> {
    prop::collection::vec((0..WIDTH, 4..HEIGHT), 0..80)
        .prop_map(|cells| {
            SettledField::from_cells(cells.into_iter().map(|(col, row)| Cell::new(col, row)))
                .unwrap()
        })
}

/// A field holding `settled`, with a falling figure placed at `(col, row)` if it fits.
fn field_with(
    settled: SettledField,
    kind: FigureKind,
    col: i32,
    row: i32,
) -> Option<GameField<Script>> {
    let mut field = GameField::new(Script(VecDeque::new()));
    field.set_settled(settled);
    let figure = Figure::at_column(kind, 0).translated(col, row);
    field.set_falling_figure(figure).ok()?;
    Some(field)
}

proptest! {
    #[test]
    fn spawn_fits_columns(kind_index in 0..7_i32, shift in any::<i32>()) {
        let mut spawner = Spawner::new(Script(VecDeque::from([kind_index, shift])));
        let figure = spawner.spawn_next();
        prop_assert!(figure.cells().iter().all(|c| c.is_within_columns()));
        prop_assert!(figure.cells().iter().all(|c| c.row <= 0));
    }

    #[test]
    fn translation_is_exact_or_noop(
        settled in any_settled(),
        kind in any_kind(),
        col in 0..WIDTH,
        row in 0..HEIGHT,
        left in any::<bool>(),
    ) {
        let Some(mut field) = field_with(settled, kind, col, row) else {
            return Ok(());
        };
        let before = *field.falling_figure();
        let dcol = if left { -1 } else { 1 };
        let result = if left { field.try_move_left() } else { field.try_move_right() };
        let shifted = before.translated(dcol, 0);
        let blocked = shifted
            .cells()
            .iter()
            .any(|c| !c.is_within_columns() || field.settled().is_occupied(*c));
        if blocked {
            prop_assert_eq!(result, Err(MoveRejected));
            prop_assert_eq!(field.falling_figure(), &before);
        } else {
            prop_assert_eq!(result, Ok(()));
            prop_assert_eq!(field.falling_figure(), &shifted);
        }
    }

    #[test]
    fn rotation_is_all_or_nothing(
        settled in any_settled(),
        kind in any_kind(),
        col in 0..WIDTH,
        row in 0..HEIGHT,
    ) {
        let Some(mut field) = field_with(settled, kind, col, row) else {
            return Ok(());
        };
        let before = *field.falling_figure();
        let result = field.try_rotate();
        let after = *field.falling_figure();
        if kind == FigureKind::Square {
            prop_assert_eq!(after, before);
        } else if result.is_ok() {
            prop_assert_eq!(after, before.rotated());
            prop_assert!(field.fits(&after));
        } else {
            prop_assert_eq!(after, before);
            prop_assert!(!field.fits(&before.rotated()));
        }
    }

    #[test]
    fn four_rotations_restore_figure(kind in any_kind(), col in 0..WIDTH, row in 0..HEIGHT) {
        let figure = Figure::at_column(kind, 0).translated(col, row);
        let turned = figure.rotated().rotated().rotated().rotated();
        prop_assert_eq!(turned, figure);
    }

    #[test]
    fn clearing_removes_full_rows(
        full_rows in prop::collection::btree_set(0..HEIGHT, 0..=4),
        extra in prop::collection::vec((0..WIDTH - 1, 0..HEIGHT), 0..40),
    ) {
        // Column 9 is only filled on the full rows, so no other row can become full.
        let cells = full_rows
            .iter()
            .flat_map(|row| (0..WIDTH).map(move |col| Cell::new(col, *row)))
            .chain(extra.into_iter().map(|(col, row)| Cell::new(col, row)));
        let mut settled = SettledField::from_cells(cells).unwrap();
        let before = settled.len();

        let cleared = settled.clear_lines();
        prop_assert_eq!(cleared, full_rows.len());
        prop_assert_eq!(settled.len(), before - cleared * FIELD_WIDTH);
        prop_assert!(settled.full_rows().is_empty());

        let reduced = settled.clone();
        prop_assert_eq!(settled.clear_lines(), 0);
        prop_assert_eq!(settled, reduced);

        let mut stats = GameStats::new();
        stats.record_settlement(cleared, &Progression::default());
        prop_assert_eq!(stats.score(), cleared * POINTS_PER_LINE);
    }

    #[test]
    fn top_out_never_settles(kind in any_kind(), col in 0..WIDTH) {
        let figure = Figure::at_column(kind, 0).translated(col, 0);
        prop_assume!(figure.cells().iter().all(|c| c.is_within_columns()));
        let blockers = figure
            .cells()
            .iter()
            .map(|c| Cell::new(c.col, 1))
            .filter(|c| !figure.cells().contains(c));
        let settled = SettledField::from_cells(blockers).unwrap();
        prop_assume!(!settled.is_empty());

        let mut field = GameField::new(Script(VecDeque::new()));
        field.set_settled(settled.clone());
        field.set_falling_figure(figure).unwrap();
        prop_assert_eq!(field.advance_down(), Descent::ToppedOut);
        prop_assert_eq!(field.settled(), &settled);
    }
}
