//! Core data structures for Futoshiki.
//!
//! This crate provides the plain value types shared by the grid engine and the
//! application: digits, positions, guess-mark sets, error flags, greater-than
//! constraints and the level transfer object with its text format. Nothing in
//! here performs I/O or keeps mutable game state.
//!
//! # Overview
//!
//! - [`digit`]: type-safe digits 1-9
//! - [`digit_set`]: guess marks for a single cell
//! - [`position`]: grid coordinates with bounded and wrapping movement
//! - [`error_marks`]: the fixed row/column/cell violation bitset
//! - [`constraint`]: adjacent greater-than relations
//! - [`level`]: [`LevelData`] and the `S`/`N`/`C` level file grammar
//!
//! # Examples
//!
//! ```
//! use futoshiki_core::{GreaterThan, LevelData, Position};
//!
//! let level: LevelData = "S 4\nC 0 0 1 0\n".parse().unwrap();
//! let c = level.constraints[0];
//! let c = GreaterThan::new(c.greater, c.lesser).unwrap();
//! assert!(c.is_row_constraint());
//! assert!(c.is_within(level.grid_size));
//! ```

pub mod constraint;
pub mod digit;
pub mod digit_set;
pub mod error_marks;
pub mod level;
pub mod position;

pub use self::{
    constraint::{ConstraintError, GreaterThan},
    digit::Digit,
    digit_set::DigitSet,
    error_marks::ErrorMarks,
    level::{ConstraintData, LevelData, LevelParseError, LockedCell},
    position::Position,
};

/// Largest supported side length.
///
/// Digits only go up to 9 and [`ErrorMarks`] reserves nine rows, nine columns
/// and 81 cells, so larger grids cannot be represented.
pub const MAX_GRID_SIZE: u8 = 9;
