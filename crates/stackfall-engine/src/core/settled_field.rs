use std::fmt::Write as _;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::CellOutOfField;

use super::{FIELD_HEIGHT, FIELD_WIDTH, cell::Cell, figure::Figure};

// Bits 0..FIELD_WIDTH of a row, bit N corresponds to column N
const FULL_ROW_MASK: u16 = (1 << FIELD_WIDTH) - 1;

/// The permanently placed blocks.
///
/// Each row is stored as a 16-bit mask where bit N is column N. Cells keep no figure
/// identity once settled, and the mask layout makes "no cell twice" and "every cell inside
/// `[0, FIELD_WIDTH) × [0, FIELD_HEIGHT)`" hold by construction.
///
/// # Example
///
/// ```
/// use stackfall_engine::{Cell, SettledField};
///
/// let mut field = SettledField::EMPTY;
/// field.occupy(Cell::new(0, 19)).unwrap();
/// assert!(field.is_occupied(Cell::new(0, 19)));
/// assert_eq!(field.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettledField {
    rows: [u16; FIELD_HEIGHT],
}

impl Default for SettledField {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Serialize for SettledField {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "0000,0000,...,03ff" (comma-separated hex row masks, top row first)
        let mut hex_string = String::with_capacity(FIELD_HEIGHT * 5);
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                hex_string.push(',');
            }
            write!(&mut hex_string, "{row:04x}").map_err(serde::ser::Error::custom)?;
        }
        serializer.serialize_str(&hex_string)
    }
}

impl<'de> Deserialize<'de> for SettledField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != FIELD_HEIGHT {
            return Err(serde::de::Error::custom(format!(
                "expected {FIELD_HEIGHT} comma-separated hex values, got {}",
                parts.len()
            )));
        }

        let mut rows = [0; FIELD_HEIGHT];
        for (i, hex_str) in parts.iter().enumerate() {
            let bits = u16::from_str_radix(hex_str, 16).map_err(|e| {
                serde::de::Error::custom(format!("invalid hex at row {i}: {hex_str} ({e})"))
            })?;
            if bits & !FULL_ROW_MASK != 0 {
                return Err(serde::de::Error::custom(format!(
                    "row {i} has cells beyond column {}: {hex_str}",
                    FIELD_WIDTH - 1
                )));
            }
            rows[i] = bits;
        }

        Ok(SettledField { rows })
    }
}

impl SettledField {
    pub const EMPTY: Self = Self {
        rows: [0; FIELD_HEIGHT],
    };

    /// Builds a field from a list of cells. Duplicates collapse into one cell.
    pub fn from_cells<I>(cells: I) -> Result<Self, CellOutOfField>
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut field = Self::EMPTY;
        for cell in cells {
            field.occupy(cell)?;
        }
        Ok(field)
    }

    /// Returns `true` if the cell holds a settled block.
    ///
    /// Cells outside the field are never occupied.
    #[must_use]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        cell.field_index()
            .is_some_and(|(x, y)| self.rows[y] & (1 << x) != 0)
    }

    /// Marks a cell as settled.
    pub fn occupy(&mut self, cell: Cell) -> Result<(), CellOutOfField> {
        let (x, y) = cell.field_index().ok_or(CellOutOfField {
            col: cell.col,
            row: cell.row,
        })?;
        self.rows[y] |= 1 << x;
        Ok(())
    }

    /// Merges every cell of the figure into the field.
    ///
    /// The whole merge is rejected if any cell lies outside the field.
    pub fn fill_figure(&mut self, figure: &Figure) -> Result<(), CellOutOfField> {
        let mut rows = self.rows;
        for cell in figure.cells() {
            let (x, y) = cell.field_index().ok_or(CellOutOfField {
                col: cell.col,
                row: cell.row,
            })?;
            rows[y] |= 1 << x;
        }
        self.rows = rows;
        Ok(())
    }

    /// Number of settled cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.iter().map(|r| r.count_ones() as usize).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|r| *r == 0)
    }

    /// Returns `true` if every column of row `y` is occupied.
    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows.get(y) == Some(&FULL_ROW_MASK)
    }

    /// Iterates over the rows from top to bottom, yielding each cell's occupied status.
    pub fn rows(&self) -> impl Iterator<Item = [bool; FIELD_WIDTH]> + '_ {
        self.rows
            .iter()
            .map(|bits| std::array::from_fn(|x| bits & (1 << x) != 0))
    }

    /// Iterates over the settled cells, top row first.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.rows.iter().zip(0..).flat_map(|(bits, row)| {
            (0..).take(FIELD_WIDTH).filter_map(move |col| {
                (bits & (1 << col) != 0).then_some(Cell::new(col, row))
            })
        })
    }

    /// Returns the indices of every completely occupied row, bottom row first.
    #[must_use]
    pub fn full_rows(&self) -> ArrayVec<usize, FIELD_HEIGHT> {
        (0..FIELD_HEIGHT)
            .rev()
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Removes all full rows and compacts the rows above them downward.
    ///
    /// Every remaining row moves down by the number of cleared rows below it. The scan is
    /// repeated until no full row remains, bounded by `FIELD_HEIGHT` passes; since compaction
    /// never produces a new full row the second pass finds nothing. Calling this on a field
    /// without full rows leaves it unchanged.
    ///
    /// # Returns
    ///
    /// The number of rows removed.
    pub fn clear_lines(&mut self) -> usize {
        let mut total = 0;
        for _ in 0..FIELD_HEIGHT {
            let cleared = self.clear_full_rows_once();
            if cleared == 0 {
                break;
            }
            total += cleared;
        }
        total
    }

    fn clear_full_rows_once(&mut self) -> usize {
        let mut count = 0;
        for y in (0..FIELD_HEIGHT).rev() {
            if self.is_row_full(y) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(0);
        count
    }
}
