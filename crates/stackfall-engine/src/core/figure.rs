use serde::{Deserialize, Serialize};

use super::cell::Cell;

/// Shape tag of a tetromino.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum FigureKind {
    /// Straight line of four cells.
    Line = 0,
    /// 2×2 square. Rotation is a no-op.
    Square = 1,
    T = 2,
    S = 3,
    Z = 4,
    J = 5,
    L = 6,
}

impl FigureKind {
    /// Number of shape tags (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        FigureKind::Line,
        FigureKind::Square,
        FigureKind::T,
        FigureKind::S,
        FigureKind::Z,
        FigureKind::J,
        FigureKind::L,
    ];

    /// Returns the canonical cell offsets of the shape.
    ///
    /// Offsets are relative to an implicit anchor at `(0, 0)`: columns are non-negative and
    /// rows are zero or negative, so a freshly spawned figure hangs above its anchor row.
    /// The second offset is the rotation pivot.
    #[must_use]
    pub const fn offsets(self) -> [Cell; 4] {
        FIGURE_OFFSETS[self as usize]
    }

    /// Returns `false` for shapes whose rotation is a no-op.
    #[must_use]
    pub const fn rotates(self) -> bool {
        !matches!(self, FigureKind::Square)
    }

    /// Returns the largest column offset of the shape.
    #[must_use]
    pub fn max_col_offset(self) -> i32 {
        self.offsets().iter().map(|c| c.col).max().unwrap_or(0)
    }

    /// Returns the `(width, height)` of the shape's bounding box.
    #[must_use]
    pub fn size(self) -> (u8, u8) {
        let offsets = self.offsets();
        let span = |f: fn(&Cell) -> i32| {
            let min = offsets.iter().map(f).min().unwrap_or(0);
            let max = offsets.iter().map(f).max().unwrap_or(0);
            u8::try_from(max - min + 1).unwrap_or(0)
        };
        (span(|c| c.col), span(|c| c.row))
    }

    /// Returns the offsets translated so the bounding box starts at `(0, 0)`.
    ///
    /// Used for next-figure previews.
    #[must_use]
    pub fn preview_cells(self) -> [Cell; 4] {
        let offsets = self.offsets();
        let min_row = offsets.iter().map(|c| c.row).min().unwrap_or(0);
        offsets.map(|c| c.offset(0, -min_row))
    }

    /// Returns the single character representation of this shape tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_engine::FigureKind;
    ///
    /// assert_eq!(FigureKind::Line.as_char(), 'I');
    /// assert_eq!(FigureKind::Square.as_char(), 'O');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            FigureKind::Line => 'I',
            FigureKind::Square => 'O',
            FigureKind::T => 'T',
            FigureKind::S => 'S',
            FigureKind::Z => 'Z',
            FigureKind::J => 'J',
            FigureKind::L => 'L',
        }
    }
}

const FIGURE_OFFSETS: [[Cell; 4]; FigureKind::LEN] = {
    const fn c(col: i32, row: i32) -> Cell {
        Cell::new(col, row)
    }
    [
        // Line
        [c(0, 0), c(0, -1), c(0, -2), c(0, -3)],
        // Square
        [c(0, 0), c(1, 0), c(0, -1), c(1, -1)],
        // T
        [c(0, 0), c(1, 0), c(1, -1), c(2, 0)],
        // S
        [c(0, -1), c(1, -1), c(1, 0), c(2, 0)],
        // Z
        [c(0, 0), c(1, 0), c(1, -1), c(2, -1)],
        // J
        [c(0, 0), c(0, -1), c(0, -2), c(1, -2)],
        // L
        [c(0, 0), c(1, 0), c(1, -1), c(1, -2)],
    ]
};

/// The falling tetromino: four distinct cells and a shape tag.
///
/// Figures are values. Movement and rotation return new figures and never check the field;
/// collision rules live in [`GameField`](crate::GameField).
///
/// # Example
///
/// ```
/// use stackfall_engine::{Cell, Figure, FigureKind};
///
/// let figure = Figure::at_column(FigureKind::Square, 4);
/// assert_eq!(
///     figure.cells(),
///     &[Cell::new(4, 0), Cell::new(5, 0), Cell::new(4, -1), Cell::new(5, -1)]
/// );
/// assert_eq!(figure.rotated(), figure);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Figure {
    kind: FigureKind,
    cells: [Cell; 4],
}

impl Figure {
    /// Places the catalog shape with its anchor at `(col, 0)`.
    #[must_use]
    pub fn at_column(kind: FigureKind, col: i32) -> Self {
        Self {
            kind,
            cells: kind.offsets().map(|c| c.offset(col, 0)),
        }
    }

    /// Builds a figure from explicit cells.
    ///
    /// Returns `None` if any two cells coincide.
    #[must_use]
    pub fn from_cells(kind: FigureKind, cells: [Cell; 4]) -> Option<Self> {
        for (i, a) in cells.iter().enumerate() {
            if cells[i + 1..].contains(a) {
                return None;
            }
        }
        Some(Self { kind, cells })
    }

    #[must_use]
    pub fn kind(&self) -> FigureKind {
        self.kind
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell; 4] {
        &self.cells
    }

    /// The cell the figure rotates around.
    #[must_use]
    pub fn pivot(&self) -> Cell {
        self.cells[1]
    }

    #[must_use]
    pub fn translated(&self, dcol: i32, drow: i32) -> Self {
        Self {
            kind: self.kind,
            cells: self.cells.map(|c| c.offset(dcol, drow)),
        }
    }

    /// Rotates a quarter turn around the pivot, mapping offset `(dx, dy)` to `(-dy, dx)`.
    ///
    /// With rows growing downward this is a clockwise turn on screen. Squares are returned
    /// unchanged.
    #[must_use]
    pub fn rotated(&self) -> Self {
        if !self.kind.rotates() {
            return *self;
        }
        let pivot = self.pivot();
        Self {
            kind: self.kind,
            cells: self.cells.map(|c| {
                let (dx, dy) = (c.col - pivot.col, c.row - pivot.row);
                Cell::new(pivot.col - dy, pivot.row + dx)
            }),
        }
    }

    /// Returns `true` if any cell is at or above the top row of the visible field.
    #[must_use]
    pub fn touches_top(&self) -> bool {
        self.cells.iter().any(|c| c.row <= 0)
    }
}
