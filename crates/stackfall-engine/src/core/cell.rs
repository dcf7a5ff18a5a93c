use serde::{Deserialize, Serialize};

use super::{FIELD_HEIGHT, FIELD_WIDTH};

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const WIDTH: i32 = FIELD_WIDTH as i32;
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const HEIGHT: i32 = FIELD_HEIGHT as i32;

/// A grid coordinate.
///
/// # Coordinate System
///
/// - `col` grows rightward, `row` grows downward
/// - Row 0 is the top of the visible field
/// - Negative rows are valid for a figure that is still entering the field from above
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    #[must_use]
    pub const fn offset(self, dcol: i32, drow: i32) -> Self {
        Self::new(self.col + dcol, self.row + drow)
    }

    /// Returns `true` if the column lies in `[0, FIELD_WIDTH)`.
    #[must_use]
    pub const fn is_within_columns(self) -> bool {
        0 <= self.col && self.col < WIDTH
    }

    /// Returns `true` if the row lies above the floor (`row < FIELD_HEIGHT`).
    ///
    /// Rows above the visible field count as above the floor.
    #[must_use]
    pub const fn is_above_floor(self) -> bool {
        self.row < HEIGHT
    }

    /// Returns `true` if the cell is a position the settled field may hold.
    #[must_use]
    pub const fn is_inside_field(self) -> bool {
        self.is_within_columns() && 0 <= self.row && self.row < HEIGHT
    }

    /// Returns the `(x, y)` index of the cell if it lies inside the field.
    #[must_use]
    pub fn field_index(self) -> Option<(usize, usize)> {
        if !self.is_inside_field() {
            return None;
        }
        Some((usize::try_from(self.col).ok()?, usize::try_from(self.row).ok()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(Cell::new(0, 0).is_inside_field());
        assert!(Cell::new(9, 19).is_inside_field());
        assert!(!Cell::new(10, 0).is_inside_field());
        assert!(!Cell::new(-1, 0).is_inside_field());
        assert!(!Cell::new(0, 20).is_inside_field());

        let entering = Cell::new(3, -2);
        assert!(entering.is_within_columns());
        assert!(entering.is_above_floor());
        assert!(!entering.is_inside_field());
        assert_eq!(entering.field_index(), None);
    }

    #[test]
    fn test_field_index() {
        assert_eq!(Cell::new(4, 7).field_index(), Some((4, 7)));
        assert_eq!(Cell::new(4, 7).offset(-1, 2), Cell::new(3, 9));
    }
}
