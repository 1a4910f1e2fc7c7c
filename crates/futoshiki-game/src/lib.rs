//! Futoshiki grid engine.
//!
//! [`Grid`] owns the board, the cursor, the locked cells and the greater-than
//! constraints. It interprets direction and digit input according to its
//! edit/alt mode flags and validates the board once per tick with
//! [`Grid::check_constraints`].
//!
//! The engine performs no I/O. User-facing warnings go to a
//! [`NotificationSink`] and semantic events such as a win go to an
//! [`EventSink`], both supplied by the caller.
//!
//! # Examples
//!
//! ```
//! use futoshiki_core::{Digit, Position};
//! use futoshiki_game::{CellState, Grid, ResizePolicy, Severity};
//!
//! let mut grid = Grid::with_size(4).unwrap();
//! let mut notes: Vec<(Severity, String)> = Vec::new();
//!
//! grid.set_edit_mode(true);
//! grid.on_handle_number(Digit::D3, ResizePolicy::RetainLocked, &mut notes);
//! assert_eq!(grid.cell(Position::ORIGIN), CellState::Locked(Digit::D3));
//!
//! let level = grid.to_level_data();
//! assert_eq!(level.to_string(), "S 4\nN 0 0 3\n");
//! ```

mod cell;
mod error;
mod grid;
mod sink;

pub use self::{
    cell::CellState,
    error::GridError,
    grid::{ConstraintLookup, ConstraintToggle, DEFAULT_GRID_SIZE, Grid, GridState, ResizePolicy},
    sink::{
        DEFAULT_NOTIFICATION_DURATION, EventSink, GridEvent, NotificationSink, Severity,
    },
};
