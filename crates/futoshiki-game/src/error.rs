use futoshiki_core::{ConstraintError, Digit, GreaterThan, MAX_GRID_SIZE, Position};

/// Errors reported by [`Grid`](crate::Grid) operations.
///
/// Every failing operation leaves the grid unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum GridError {
    /// The requested side length is zero or larger than [`MAX_GRID_SIZE`].
    #[display("grid size must be between 1 and {MAX_GRID_SIZE}, got {size}")]
    #[from(ignore)]
    InvalidGridSize {
        /// The rejected size.
        size: u8,
    },
    /// A coordinate lies outside the grid.
    #[display("{pos} is outside the {size}x{size} grid")]
    #[from(ignore)]
    OutOfBounds {
        /// The rejected position.
        pos: Position,
        /// The current side length.
        size: u8,
    },
    /// A lock value cannot appear in a grid of this size.
    #[display("cannot lock {value} in a {size}x{size} grid")]
    #[from(ignore)]
    LockValueTooLarge {
        /// The rejected value.
        value: Digit,
        /// The current side length.
        size: u8,
    },
    /// The constraint endpoints are invalid.
    #[display("{_0}")]
    InvalidConstraint(ConstraintError),
    /// A constraint already joins the two cells.
    #[display("a constraint between {} and {} already exists", _0.greater(), _0.lesser())]
    #[from(ignore)]
    DuplicateConstraint(#[error(not(source))] GreaterThan),
}
