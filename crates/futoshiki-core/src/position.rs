//! Grid coordinates.

use std::fmt;

/// A cell coordinate on a square grid, `x` is the column and `y` the row.
///
/// Positions are not tied to a particular grid size; bounds are checked
/// against the side length of the grid they are used with.
///
/// # Examples
///
/// ```
/// use futoshiki_core::Position;
///
/// let pos = Position::new(1, 2);
/// assert_eq!(pos.offset(1, 0, 4), Some(Position::new(2, 2)));
/// assert_eq!(pos.offset(0, 2, 4), None);
/// assert_eq!(pos.wrapping_offset(-2, 0, 4), Position::new(3, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    /// The top-left cell.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Creates a position from column `x` and row `y`.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Returns the column.
    #[must_use]
    pub const fn x(self) -> u8 {
        self.x
    }

    /// Returns the row.
    #[must_use]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Returns `true` if the position lies inside a grid of side `size`.
    #[must_use]
    pub const fn is_within(self, size: u8) -> bool {
        self.x < size && self.y < size
    }

    /// Returns the row-major index of this position in a grid of side `size`.
    #[must_use]
    pub const fn index(self, size: u8) -> usize {
        self.y as usize * size as usize + self.x as usize
    }

    /// Moves by `(dx, dy)`, returning `None` if the result leaves a grid of side `size`.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32, size: u8) -> Option<Self> {
        let x = i32::from(self.x) + dx;
        let y = i32::from(self.y) + dy;
        let size = i32::from(size);
        if !(0..size).contains(&x) || !(0..size).contains(&y) {
            return None;
        }
        Some(Self::new(u8::try_from(x).ok()?, u8::try_from(y).ok()?))
    }

    /// Moves by `(dx, dy)`, wrapping around the edges of a grid of side `size`.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    #[must_use]
    pub fn wrapping_offset(self, dx: i32, dy: i32, size: u8) -> Self {
        assert!(size > 0);
        let size = i32::from(size);
        let x = (i32::from(self.x) + dx).rem_euclid(size);
        let y = (i32::from(self.y) + dy).rem_euclid(size);
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Self::new(x as u8, y as u8)
    }

    /// Returns `true` if `other` shares an edge with this position.
    #[must_use]
    pub const fn is_orthogonally_adjacent(self, other: Self) -> bool {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx + dy == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
