//! Greater-than constraints between adjacent cells.

use crate::{Digit, Position};

/// Errors raised when building a [`GreaterThan`] constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConstraintError {
    /// Both endpoints refer to the same cell.
    #[display("constraint endpoints must differ, got {pos} twice")]
    SameCell {
        /// The repeated position.
        pos: Position,
    },
    /// The endpoints do not share an edge.
    #[display("constraint endpoints {greater} and {lesser} are not adjacent")]
    NotAdjacent {
        /// The cell that must hold the larger number.
        greater: Position,
        /// The cell that must hold the smaller number.
        lesser: Position,
    },
}

/// "The number at `greater` is strictly larger than the number at `lesser`."
///
/// Endpoints are always orthogonally adjacent; the constructor rejects
/// diagonal, distant and degenerate pairs. An empty endpoint satisfies the
/// constraint trivially.
///
/// # Examples
///
/// ```
/// use futoshiki_core::{Digit, GreaterThan, Position};
///
/// let c = GreaterThan::new(Position::new(0, 0), Position::new(1, 0)).unwrap();
/// assert!(c.is_satisfied_by(Some(Digit::D3), Some(Digit::D2)));
/// assert!(!c.is_satisfied_by(Some(Digit::D2), Some(Digit::D2)));
/// assert!(c.is_satisfied_by(None, Some(Digit::D9)));
///
/// assert!(GreaterThan::new(Position::new(0, 0), Position::new(1, 1)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GreaterThan {
    greater: Position,
    lesser: Position,
}

impl GreaterThan {
    /// Creates a constraint after checking that the endpoints are adjacent.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::SameCell`] if both endpoints are equal and
    /// [`ConstraintError::NotAdjacent`] if they do not share an edge.
    pub fn new(greater: Position, lesser: Position) -> Result<Self, ConstraintError> {
        if greater == lesser {
            return Err(ConstraintError::SameCell { pos: greater });
        }
        if !greater.is_orthogonally_adjacent(lesser) {
            return Err(ConstraintError::NotAdjacent { greater, lesser });
        }
        Ok(Self { greater, lesser })
    }

    /// The cell that must hold the larger number.
    #[must_use]
    pub const fn greater(self) -> Position {
        self.greater
    }

    /// The cell that must hold the smaller number.
    #[must_use]
    pub const fn lesser(self) -> Position {
        self.lesser
    }

    /// Returns the same constraint pointing the other way.
    #[must_use]
    pub const fn flipped(self) -> Self {
        Self {
            greater: self.lesser,
            lesser: self.greater,
        }
    }

    /// Returns `true` if the constraint joins two cells of the same row.
    #[must_use]
    pub const fn is_row_constraint(self) -> bool {
        self.greater.y() == self.lesser.y()
    }

    /// Returns `true` if the constraint joins two cells of the same column.
    #[must_use]
    pub const fn is_column_constraint(self) -> bool {
        self.greater.x() == self.lesser.x()
    }

    /// Returns `true` if both endpoints lie in a grid of side `size`.
    #[must_use]
    pub const fn is_within(self, size: u8) -> bool {
        self.greater.is_within(size) && self.lesser.is_within(size)
    }

    /// Returns `true` if the constraint joins `a` and `b` in either direction.
    #[must_use]
    pub fn joins(self, a: Position, b: Position) -> bool {
        (self.greater == a && self.lesser == b) || (self.greater == b && self.lesser == a)
    }

    /// Evaluates the constraint for the numbers at its endpoints.
    #[must_use]
    pub fn is_satisfied_by(self, greater: Option<Digit>, lesser: Option<Digit>) -> bool {
        match (greater, lesser) {
            (Some(greater), Some(lesser)) => greater > lesser,
            _ => true,
        }
    }
}
