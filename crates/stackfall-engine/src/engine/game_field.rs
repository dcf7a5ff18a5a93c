use crate::{
    MoveRejected,
    core::{
        figure::{Figure, FigureKind},
        settled_field::SettledField,
    },
};

use super::{random::RandomSource, spawner::Spawner};

/// Result of moving the falling figure down one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Descent {
    /// The figure moved down by one row.
    Moved,
    /// The figure landed, was merged into the field, and a new figure spawned.
    Settled { cleared_lines: usize },
    /// The figure landed while touching the top of the field. Nothing was merged.
    ToppedOut,
}

/// The falling figure, the settled field, and the spawner feeding them.
///
/// Implements the movement, rotation and settlement rules. It knows nothing about score,
/// pausing or time; [`GameSession`](crate::GameSession) layers those on top.
///
/// # Example
///
/// ```
/// use stackfall_engine::{FigureRng, GameField};
///
/// let mut field = GameField::new(FigureRng::new());
/// _ = field.try_move_left();
/// _ = field.try_rotate();
/// while field.advance_down().is_moved() {}
/// assert_eq!(field.settled().len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct GameField<R> {
    settled: SettledField,
    falling_figure: Figure,
    spawner: Spawner<R>,
}

impl<R> GameField<R>
where
    R: RandomSource,
{
    #[must_use]
    pub fn new(rng: R) -> Self {
        let mut spawner = Spawner::new(rng);
        let falling_figure = spawner.spawn_next();
        Self {
            settled: SettledField::EMPTY,
            falling_figure,
            spawner,
        }
    }

    /// Empties the field and spawns a fresh figure with a fresh successor.
    pub fn reset(&mut self) {
        self.settled = SettledField::EMPTY;
        self.spawner.reroll();
        self.falling_figure = self.spawner.spawn_next();
    }

    #[must_use]
    pub fn settled(&self) -> &SettledField {
        &self.settled
    }

    #[must_use]
    pub fn falling_figure(&self) -> &Figure {
        &self.falling_figure
    }

    #[must_use]
    pub fn next_kind(&self) -> FigureKind {
        self.spawner.next_kind()
    }

    /// Returns `true` if every cell of the figure is inside the columns, above the floor,
    /// and not on a settled cell.
    #[must_use]
    pub fn fits(&self, figure: &Figure) -> bool {
        figure.cells().iter().all(|c| {
            c.is_within_columns() && c.is_above_floor() && !self.settled.is_occupied(*c)
        })
    }

    /// Replaces the falling figure if it fits.
    pub fn set_falling_figure(&mut self, figure: Figure) -> Result<(), MoveRejected> {
        if !self.fits(&figure) {
            return Err(MoveRejected);
        }
        self.falling_figure = figure;
        Ok(())
    }

    /// Replaces the settled field.
    pub fn set_settled(&mut self, settled: SettledField) {
        self.settled = settled;
    }

    pub fn try_move_left(&mut self) -> Result<(), MoveRejected> {
        self.set_falling_figure(self.falling_figure.translated(-1, 0))
    }

    pub fn try_move_right(&mut self) -> Result<(), MoveRejected> {
        self.set_falling_figure(self.falling_figure.translated(1, 0))
    }

    /// Rotates the falling figure a quarter turn around its pivot.
    ///
    /// Squares never rotate. Any other figure either takes the rotated position as a whole,
    /// or stays where it is if any rotated cell would leave the columns, reach the floor, or
    /// overlap a settled cell.
    pub fn try_rotate(&mut self) -> Result<(), MoveRejected> {
        if !self.falling_figure.kind().rotates() {
            return Ok(());
        }
        self.set_falling_figure(self.falling_figure.rotated())
    }

    /// Moves the falling figure down one row, settling it if it cannot move.
    ///
    /// When any cell is blocked by the floor or a settled cell:
    ///
    /// - if the figure touches the top row (some cell at row ≤ 0), the game is lost and the
    ///   field is left untouched
    /// - otherwise the figure is merged, full rows are cleared, and the next figure spawns
    pub fn advance_down(&mut self) -> Descent {
        let moved = self.falling_figure.translated(0, 1);
        if self.fits(&moved) {
            self.falling_figure = moved;
            return Descent::Moved;
        }

        if self.falling_figure.touches_top() {
            log::info!("figure blocked at {:?}", self.falling_figure.cells());
            return Descent::ToppedOut;
        }

        if let Err(e) = self.settled.fill_figure(&self.falling_figure) {
            log::error!("cannot settle figure: {e}");
            return Descent::ToppedOut;
        }
        let cleared_lines = self.settled.clear_lines();
        log::debug!(
            "settled {} at {:?}, cleared {cleared_lines} lines",
            self.falling_figure.kind().as_char(),
            self.falling_figure.cells()
        );

        self.falling_figure = self.spawner.spawn_next();
        Descent::Settled { cleared_lines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, engine::spawner::tests::ScriptedRandom};

    /// Field whose first figure is a Square anchored at column 4, followed by a T at column 0.
    fn square_field() -> GameField<ScriptedRandom> {
        // next = Square, spawn shift 4, next = T, then zeros
        GameField::new(ScriptedRandom::new([1, 4, 2]))
    }

    fn square_at(col: i32, row: i32) -> Figure {
        Figure::at_column(FigureKind::Square, col).translated(0, row)
    }

    #[test]
    fn test_initial_figure() {
        let field = square_field();
        assert_eq!(
            field.falling_figure().cells(),
            &[
                Cell::new(4, 0),
                Cell::new(5, 0),
                Cell::new(4, -1),
                Cell::new(5, -1)
            ]
        );
        assert_eq!(field.next_kind(), FigureKind::T);
    }

    #[test]
    fn test_move_stops_at_walls() {
        let mut field = square_field();
        for _ in 0..4 {
            field.try_move_left().unwrap();
        }
        let at_wall = *field.falling_figure();
        assert_eq!(field.try_move_left(), Err(MoveRejected));
        assert_eq!(field.falling_figure(), &at_wall);

        for _ in 0..8 {
            field.try_move_right().unwrap();
        }
        assert_eq!(field.try_move_right(), Err(MoveRejected));
        assert!(field.falling_figure().cells().iter().any(|c| c.col == 9));
    }

    #[test]
    fn test_move_blocked_by_settled_cell_in_same_row() {
        let mut field = square_field();
        field.set_falling_figure(square_at(4, 10)).unwrap();
        field.set_settled(SettledField::from_cells([Cell::new(3, 10)]).unwrap());
        assert_eq!(field.try_move_left(), Err(MoveRejected));
        assert_eq!(field.falling_figure(), &square_at(4, 10));

        // A settled cell in a row the figure does not occupy is no obstacle.
        field.set_settled(SettledField::from_cells([Cell::new(3, 11)]).unwrap());
        field.try_move_left().unwrap();
        assert_eq!(field.falling_figure(), &square_at(3, 10));
    }

    #[test]
    fn test_rotation_rejected_at_wall() {
        let mut field = square_field();
        // vertical line at column 0, pivot (0, 9): rotating would put a cell at column -1
        let line = Figure::at_column(FigureKind::Line, 0).translated(0, 10);
        field.set_falling_figure(line).unwrap();
        assert_eq!(field.try_rotate(), Err(MoveRejected));
        assert_eq!(field.falling_figure(), &line);
    }

    #[test]
    fn test_rotation_rejected_by_settled_cell() {
        let mut field = square_field();
        let line = Figure::at_column(FigureKind::Line, 4).translated(0, 10);
        field.set_falling_figure(line).unwrap();
        field.set_settled(SettledField::from_cells([Cell::new(6, 9)]).unwrap());
        assert_eq!(field.try_rotate(), Err(MoveRejected));
        assert_eq!(field.falling_figure(), &line);

        field.set_settled(SettledField::EMPTY);
        field.try_rotate().unwrap();
        assert_eq!(field.falling_figure(), &line.rotated());
    }

    #[test]
    fn test_rotation_rejected_at_floor() {
        let mut field = square_field();
        // horizontal line on the bottom row; rotating back to vertical would reach row 20
        let horizontal = Figure::from_cells(
            FigureKind::Line,
            [
                Cell::new(5, 19),
                Cell::new(4, 19),
                Cell::new(3, 19),
                Cell::new(2, 19),
            ],
        )
        .unwrap();
        field.set_falling_figure(horizontal).unwrap();
        assert_eq!(field.try_rotate(), Err(MoveRejected));
        assert_eq!(field.falling_figure(), &horizontal);
    }

    #[test]
    fn test_square_rotation_is_noop() {
        let mut field = square_field();
        let before = *field.falling_figure();
        assert_eq!(field.try_rotate(), Ok(()));
        assert_eq!(field.falling_figure(), &before);
    }

    #[test]
    fn test_square_lands_on_floor() {
        let mut field = square_field();
        for _ in 0..19 {
            assert_eq!(field.advance_down(), Descent::Moved);
        }
        assert_eq!(field.falling_figure(), &square_at(4, 19));
        assert_eq!(
            field.advance_down(),
            Descent::Settled { cleared_lines: 0 }
        );
        let cells: Vec<_> = field.settled().cells().collect();
        assert_eq!(
            cells,
            vec![
                Cell::new(4, 18),
                Cell::new(5, 18),
                Cell::new(4, 19),
                Cell::new(5, 19)
            ]
        );
        assert_eq!(field.falling_figure().kind(), FigureKind::T);
    }

    #[test]
    fn test_top_out_leaves_field_untouched() {
        let mut field = square_field();
        let settled = SettledField::from_cells([Cell::new(4, 1)]).unwrap();
        field.set_settled(settled.clone());
        assert_eq!(field.advance_down(), Descent::ToppedOut);
        assert_eq!(field.settled(), &settled);
        assert_eq!(field.falling_figure(), &square_at(4, 0));
    }

    #[test]
    fn test_reset_clears_field() {
        let mut field = square_field();
        field.set_settled(SettledField::from_cells([Cell::new(0, 19)]).unwrap());
        field.reset();
        assert!(field.settled().is_empty());
    }
}
