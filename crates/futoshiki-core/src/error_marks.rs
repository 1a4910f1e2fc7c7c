//! Rule-violation flags for rows, columns and cells.
//!
//! The layout reserves a fixed region per structure regardless of the actual
//! grid size: bits 0-8 flag rows, bits 9-17 flag columns and bits 18-98 flag
//! cells in row-major order of a 9×9 grid. This caps supported grids at
//! [`MAX_GRID_SIZE`]; every accessor asserts that bound.

use crate::{MAX_GRID_SIZE, Position};

const ROW_OFFSET: u32 = 0;
const COLUMN_OFFSET: u32 = MAX_GRID_SIZE as u32;
const CELL_OFFSET: u32 = 2 * MAX_GRID_SIZE as u32;

/// Row, column and cell error flags recomputed on every constraint sweep.
///
/// # Examples
///
/// ```
/// use futoshiki_core::{ErrorMarks, Position};
///
/// let mut marks = ErrorMarks::new();
/// marks.mark_row(2);
/// marks.mark_cell(Position::new(1, 2));
///
/// assert!(marks.row_has_error(2));
/// assert!(marks.cell_has_error(Position::new(1, 2)));
/// assert!(!marks.column_has_error(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ErrorMarks {
    bits: u128,
}

impl ErrorMarks {
    /// Creates an empty mark set.
    #[must_use]
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    fn bit(index: u32) -> u128 {
        1 << index
    }

    fn check(index: u8) {
        assert!(
            index < MAX_GRID_SIZE,
            "error marks support at most {MAX_GRID_SIZE} rows and columns, got index {index}"
        );
    }

    fn cell_bit(pos: Position) -> u128 {
        Self::check(pos.x());
        Self::check(pos.y());
        Self::bit(CELL_OFFSET + u32::from(pos.y()) * u32::from(MAX_GRID_SIZE) + u32::from(pos.x()))
    }

    /// Flags row `y`.
    pub fn mark_row(&mut self, y: u8) {
        Self::check(y);
        self.bits |= Self::bit(ROW_OFFSET + u32::from(y));
    }

    /// Flags column `x`.
    pub fn mark_column(&mut self, x: u8) {
        Self::check(x);
        self.bits |= Self::bit(COLUMN_OFFSET + u32::from(x));
    }

    /// Flags a single cell.
    pub fn mark_cell(&mut self, pos: Position) {
        self.bits |= Self::cell_bit(pos);
    }

    /// Returns `true` if row `y` is flagged.
    #[must_use]
    pub fn row_has_error(&self, y: u8) -> bool {
        Self::check(y);
        self.bits & Self::bit(ROW_OFFSET + u32::from(y)) != 0
    }

    /// Returns `true` if column `x` is flagged.
    #[must_use]
    pub fn column_has_error(&self, x: u8) -> bool {
        Self::check(x);
        self.bits & Self::bit(COLUMN_OFFSET + u32::from(x)) != 0
    }

    /// Returns `true` if the cell at `pos` is flagged.
    #[must_use]
    pub fn cell_has_error(&self, pos: Position) -> bool {
        self.bits & Self::cell_bit(pos) != 0
    }

    /// Returns `true` if nothing is flagged.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Clears every flag.
    pub fn clear(&mut self) {
        self.bits = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_do_not_overlap() {
        let mut marks = ErrorMarks::new();
        marks.mark_row(8);
        assert!(!marks.column_has_error(0));
        assert!(!marks.cell_has_error(Position::ORIGIN));

        let mut marks = ErrorMarks::new();
        marks.mark_column(8);
        assert!(!marks.row_has_error(8));
        assert!(!marks.cell_has_error(Position::ORIGIN));

        let mut marks = ErrorMarks::new();
        marks.mark_cell(Position::new(8, 8));
        assert!(marks.cell_has_error(Position::new(8, 8)));
        assert!(!marks.row_has_error(8));
        assert!(!marks.column_has_error(8));
    }

    #[test]
    fn test_clear() {
        let mut marks = ErrorMarks::new();
        marks.mark_cell(Position::new(3, 4));
        assert!(!marks.is_empty());
        marks.clear();
        assert!(marks.is_empty());
    }

    #[test]
    #[should_panic(expected = "error marks support at most 9")]
    fn test_rejects_tenth_row() {
        let mut marks = ErrorMarks::new();
        marks.mark_row(9);
    }
}
