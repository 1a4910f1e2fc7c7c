//! Level transfer object and its text format.
//!
//! A [`LevelData`] is a grid-independent snapshot of everything a level author
//! fixes: the side length, the locked cells and the greater-than constraints.
//! Derived state (selection, errors, win flag) is never part of it.
//!
//! # Text format
//!
//! One directive per line, whitespace separated, with a case-insensitive
//! leading token:
//!
//! - `S <n>` sets the grid size (the last occurrence wins),
//! - `N <x> <y> <v>` declares a locked cell at `(x, y)` holding `v`,
//! - `C <x1> <y1> <x2> <y2>` declares that cell `(x1, y1)` is greater than
//!   cell `(x2, y2)`.
//!
//! Blank lines and unknown directives are skipped. The writer emits the size,
//! then every locked cell, then every constraint.
//!
//! # Examples
//!
//! ```
//! use futoshiki_core::{Digit, LevelData, Position};
//!
//! let level: LevelData = "S 4\nN 0 0 1\nC 0 0 1 0\n".parse().unwrap();
//! assert_eq!(level.grid_size, 4);
//! assert_eq!(level.locked_cells[0].value, Digit::D1);
//! assert_eq!(level.constraints[0].lesser, Position::new(1, 0));
//! assert_eq!(level.to_string(), "S 4\nN 0 0 1\nC 0 0 1 0\n");
//! ```

use std::{fmt, str::FromStr};

use crate::{Digit, Position};

/// A cell fixed by the level author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockedCell {
    /// Where the cell is.
    pub pos: Position,
    /// The fixed number.
    pub value: Digit,
}

/// Endpoints of a greater-than constraint as stored in a level.
///
/// Adjacency is not checked here; the grid validates constraints when a
/// level is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstraintData {
    /// The cell that must hold the larger number.
    pub greater: Position,
    /// The cell that must hold the smaller number.
    pub lesser: Position,
}

/// Serializable snapshot of a level.
///
/// A `grid_size` of zero means "no valid level".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LevelData {
    /// Side length of the square grid.
    pub grid_size: u8,
    /// Locked cells in row-major order.
    pub locked_cells: Vec<LockedCell>,
    /// Greater-than constraints.
    pub constraints: Vec<ConstraintData>,
}

impl LevelData {
    /// Returns `true` if the level declares a usable grid size.
    #[must_use]
    pub const fn has_grid(&self) -> bool {
        self.grid_size != 0
    }
}

/// Errors produced while parsing the level text format.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum LevelParseError {
    /// A directive ended before all of its arguments were read.
    #[display("line {line}: directive `{directive}` expects {expected} arguments")]
    MissingArgument {
        /// 1-based line number.
        line: usize,
        /// The directive letter.
        directive: char,
        /// Number of arguments the directive takes.
        expected: usize,
    },
    /// An argument is not a non-negative integer that fits in a byte.
    #[display("line {line}: invalid number `{token}`")]
    InvalidNumber {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        #[error(not(source))]
        token: String,
    },
    /// A locked cell value is outside 1-9.
    #[display("line {line}: locked value {value} is not a digit 1-9")]
    InvalidDigit {
        /// 1-based line number.
        line: usize,
        /// The offending value.
        value: u8,
    },
}

fn parse_args<const N: usize>(
    line: usize,
    directive: char,
    tokens: &mut std::str::SplitWhitespace<'_>,
) -> Result<[u8; N], LevelParseError> {
    let mut args = [0; N];
    for arg in &mut args {
        let token = tokens.next().ok_or(LevelParseError::MissingArgument {
            line,
            directive,
            expected: N,
        })?;
        *arg = token
            .parse::<u8>()
            .map_err(|_| LevelParseError::InvalidNumber {
                line,
                token: token.to_owned(),
            })?;
    }
    Ok(args)
}

impl FromStr for LevelData {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut data = LevelData::default();

        for (index, text) in s.lines().enumerate() {
            let line = index + 1;
            let mut tokens = text.split_whitespace();
            let Some(directive) = tokens.next() else {
                continue;
            };

            if directive.eq_ignore_ascii_case("s") {
                let [size] = parse_args::<1>(line, 'S', &mut tokens)?;
                data.grid_size = size;
            } else if directive.eq_ignore_ascii_case("n") {
                let [x, y, value] = parse_args::<3>(line, 'N', &mut tokens)?;
                let value =
                    Digit::try_from_value(value).ok_or(LevelParseError::InvalidDigit { line, value })?;
                data.locked_cells.push(LockedCell {
                    pos: Position::new(x, y),
                    value,
                });
            } else if directive.eq_ignore_ascii_case("c") {
                let [x1, y1, x2, y2] = parse_args::<4>(line, 'C', &mut tokens)?;
                data.constraints.push(ConstraintData {
                    greater: Position::new(x1, y1),
                    lesser: Position::new(x2, y2),
                });
            }
        }

        Ok(data)
    }
}

impl fmt::Display for LevelData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "S {}", self.grid_size)?;
        for cell in &self.locked_cells {
            writeln!(f, "N {} {} {}", cell.pos.x(), cell.pos.y(), cell.value)?;
        }
        for constraint in &self.constraints {
            writeln!(
                f,
                "C {} {} {} {}",
                constraint.greater.x(),
                constraint.greater.y(),
                constraint.lesser.x(),
                constraint.lesser.y()
            )?;
        }
        Ok(())
    }
}
