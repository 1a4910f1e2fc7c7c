use futoshiki_core::{
    ConstraintData, Digit, ErrorMarks, GreaterThan, LevelData, LockedCell, MAX_GRID_SIZE,
    Position,
};

use crate::{CellState, EventSink, GridError, GridEvent, NotificationSink};

/// Side length used for a fresh board when no grid exists yet.
pub const DEFAULT_GRID_SIZE: u8 = 5;

/// The two orthogonal input mode flags of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridState {
    /// Authoring instead of playing.
    pub edit_mode: bool,
    /// Secondary interpretation of digit and direction input.
    pub alt_mode: bool,
}

/// What happens to existing content when the grid is resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizePolicy {
    /// Wipe every cell and constraint.
    Discard,
    /// Keep locked cells and constraints that still fit inside the new bounds.
    #[default]
    RetainLocked,
}

/// Result of looking up the constraint between two cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum ConstraintLookup {
    /// No constraint joins the cells.
    NotFound,
    /// A constraint joins the cells.
    Found {
        /// Index into [`Grid::constraints`].
        index: usize,
        /// `true` if the stored constraint points from the second cell to the first.
        flipped: bool,
    },
}

/// What [`Grid::toggle_constraint`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintToggle {
    /// A new constraint was created.
    Added,
    /// The existing constraint was removed.
    Removed,
    /// The existing constraint now points the other way.
    Flipped,
}

/// A Futoshiki board together with its cursor, input modes and validation state.
///
/// A grid of size 0 holds no data; most operations are no-ops on it until a
/// board is created with [`Grid::new_board`], [`Grid::change_grid_size`] or
/// [`Grid::load_level`].
///
/// # Example
///
/// ```
/// use futoshiki_core::{Digit, LevelData};
/// use futoshiki_game::{Grid, GridEvent, ResizePolicy, Severity};
///
/// let level: LevelData = "S 2\nN 0 0 1\n".parse().unwrap();
/// let mut grid = Grid::from_level(&level).unwrap();
/// let mut notes: Vec<(Severity, String)> = Vec::new();
/// let mut events = Vec::new();
///
/// // The cursor starts on the first unlocked cell, (1, 0).
/// grid.on_handle_number(Digit::D2, ResizePolicy::Discard, &mut notes);
/// grid.on_change_selection(0, 1, &mut notes);
/// grid.on_handle_number(Digit::D1, ResizePolicy::Discard, &mut notes);
/// grid.on_change_selection(-1, 0, &mut notes);
/// grid.on_handle_number(Digit::D2, ResizePolicy::Discard, &mut notes);
///
/// grid.check_constraints(&mut events);
/// assert!(grid.player_won());
/// assert_eq!(events, vec![GridEvent::PlayerWon]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    size: u8,
    cells: Vec<CellState>,
    selection: Position,
    constraints: Vec<GreaterThan>,
    errors: ErrorMarks,
    target_sum: u32,
    state: GridState,
    player_won: bool,
}

fn target_sum_for(size: u8) -> u32 {
    let n = u32::from(size);
    n * (n * (n + 1) / 2)
}

fn check_size(size: u8) -> Result<(), GridError> {
    if size == 0 || size > MAX_GRID_SIZE {
        return Err(GridError::InvalidGridSize { size });
    }
    Ok(())
}

impl Grid {
    /// Creates a grid with no data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty grid of side `size`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidGridSize`] unless `size` is in `1..=9`.
    pub fn with_size(size: u8) -> Result<Self, GridError> {
        let mut grid = Self::new();
        grid.change_grid_size(size, ResizePolicy::Discard)?;
        Ok(grid)
    }

    /// Creates a grid from a level.
    ///
    /// # Errors
    ///
    /// See [`Grid::load_level`].
    pub fn from_level(level: &LevelData) -> Result<Self, GridError> {
        let mut grid = Self::new();
        grid.load_level(level)?;
        Ok(grid)
    }

    /// Side length, or 0 if the grid holds no data.
    #[must_use]
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Returns `true` once a board has been created or loaded.
    #[must_use]
    pub fn has_valid_data(&self) -> bool {
        self.size != 0
    }

    /// Returns the cell at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies outside the grid.
    #[must_use]
    pub fn cell(&self, pos: Position) -> CellState {
        assert!(pos.is_within(self.size), "{pos} is outside the grid");
        self.cells[pos.index(self.size)]
    }

    /// Iterates over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }

    /// Current cursor position.
    #[must_use]
    pub fn selection(&self) -> Position {
        self.selection
    }

    /// Moves the cursor to `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `pos` lies outside the grid.
    pub fn set_selection(&mut self, pos: Position) -> Result<(), GridError> {
        self.check_bounds(pos)?;
        self.selection = pos;
        Ok(())
    }

    /// All greater-than constraints in insertion order.
    #[must_use]
    pub fn constraints(&self) -> &[GreaterThan] {
        &self.constraints
    }

    /// Violation flags from the latest [`Grid::check_constraints`] sweep.
    #[must_use]
    pub fn errors(&self) -> &ErrorMarks {
        &self.errors
    }

    /// Sum of all numbers on a solved board.
    #[must_use]
    pub fn target_sum(&self) -> u32 {
        self.target_sum
    }

    /// Current input modes.
    #[must_use]
    pub fn state(&self) -> GridState {
        self.state
    }

    /// Returns `true` after a winning sweep until the next reset or mode change.
    #[must_use]
    pub fn player_won(&self) -> bool {
        self.player_won
    }

    /// Switches between authoring and playing.
    ///
    /// Clears the win flag and any error marks.
    pub fn set_edit_mode(&mut self, edit_mode: bool) {
        self.state.edit_mode = edit_mode;
        self.player_won = false;
        self.errors.clear();
    }

    /// Switches the secondary input interpretation.
    pub fn set_alt_mode(&mut self, alt_mode: bool) {
        self.state.alt_mode = alt_mode;
    }

    fn check_bounds(&self, pos: Position) -> Result<(), GridError> {
        if !pos.is_within(self.size) {
            return Err(GridError::OutOfBounds {
                pos,
                size: self.size,
            });
        }
        Ok(())
    }

    fn cell_mut(&mut self, pos: Position) -> &mut CellState {
        &mut self.cells[pos.index(self.size)]
    }

    /// Replaces the board with an empty one.
    ///
    /// Keeps the current side length, or uses [`DEFAULT_GRID_SIZE`] if the
    /// grid holds no data.
    pub fn new_board(&mut self) {
        let size = if self.has_valid_data() {
            self.size
        } else {
            DEFAULT_GRID_SIZE
        };
        self.reshape(size, ResizePolicy::Discard);
        self.selection = Position::ORIGIN;
    }

    /// Changes the side length.
    ///
    /// [`ResizePolicy::Discard`] wipes every cell and constraint.
    /// [`ResizePolicy::RetainLocked`] keeps locked cells whose position and
    /// value both fit the new size, and constraints whose endpoints both lie
    /// inside the new bounds; player input is dropped in both cases. The cursor is clamped into the new bounds.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidGridSize`] unless `size` is in `1..=9`.
    pub fn change_grid_size(&mut self, size: u8, policy: ResizePolicy) -> Result<(), GridError> {
        check_size(size)?;
        self.reshape(size, policy);
        Ok(())
    }

    fn reshape(&mut self, size: u8, policy: ResizePolicy) {
        let mut cells = vec![CellState::Empty; usize::from(size) * usize::from(size)];
        let mut constraints = Vec::new();

        if policy == ResizePolicy::RetainLocked && self.has_valid_data() {
            for pos in self.positions() {
                if let CellState::Locked(digit) = self.cell(pos)
                    && pos.is_within(size)
                    && digit.value() <= size
                {
                    cells[pos.index(size)] = CellState::Locked(digit);
                }
            }
            constraints = self
                .constraints
                .iter()
                .copied()
                .filter(|c| c.is_within(size))
                .collect();
        }

        self.size = size;
        self.cells = cells;
        self.constraints = constraints;
        self.target_sum = target_sum_for(size);
        self.errors.clear();
        self.player_won = false;
        self.selection = Position::new(
            self.selection.x().min(size - 1),
            self.selection.y().min(size - 1),
        );
    }

    /// Interprets a direction input according to the current modes.
    ///
    /// - play mode: moves the cursor, jumping over locked cells by doubling
    ///   the step until an unlocked cell is found; a move that leaves the
    ///   grid is discarded
    /// - edit mode: moves the cursor, wrapping around the edges
    /// - edit + alt mode: toggles the constraint between the cursor cell and
    ///   its neighbour in that direction
    pub fn on_change_selection(&mut self, dx: i32, dy: i32, notify: &mut impl NotificationSink) {
        if !self.has_valid_data() || (dx == 0 && dy == 0) {
            return;
        }

        match (self.state.edit_mode, self.state.alt_mode) {
            (true, true) => {
                let Some(target) = self.selection.offset(dx, dy, self.size) else {
                    notify.warn("Constraints must stay inside the grid");
                    return;
                };
                if let Err(err) = self.toggle_constraint(self.selection, target) {
                    notify.warn(err.to_string());
                }
            }
            (true, false) => {
                self.selection = self.selection.wrapping_offset(dx, dy, self.size);
            }
            (false, _) => self.move_skipping_locked(dx, dy),
        }
    }

    fn move_skipping_locked(&mut self, mut dx: i32, mut dy: i32) {
        // Every doubling moves further away, so the walk leaves the grid eventually.
        while let Some(target) = self.selection.offset(dx, dy, self.size) {
            if !self.cell(target).is_locked() {
                self.selection = target;
                return;
            }
            dx *= 2;
            dy *= 2;
        }
    }

    /// Interprets a digit input according to the current modes.
    ///
    /// - play mode: toggles the number at the cursor
    /// - play + alt mode: toggles a guess mark at the cursor
    /// - edit mode: toggles a lock with this value at the cursor
    /// - edit + alt mode: resizes the grid to `digit` using `resize_policy`
    pub fn on_handle_number(
        &mut self,
        digit: Digit,
        resize_policy: ResizePolicy,
        notify: &mut impl NotificationSink,
    ) {
        if self.state.edit_mode && self.state.alt_mode {
            // Digits are always a valid size.
            self.reshape(digit.value(), resize_policy);
            return;
        }
        if !self.has_valid_data() {
            return;
        }

        let pos = self.selection;
        match (self.state.edit_mode, self.state.alt_mode) {
            (true, _) => {
                if let Err(err) = self.toggle_lock(pos, digit) {
                    notify.warn(err.to_string());
                }
            }
            (false, true) => self.toggle_guess(pos, digit),
            (false, false) => self.toggle_number(pos, digit),
        }
    }

    fn fits(&self, digit: Digit) -> bool {
        digit.value() <= self.size
    }

    fn toggle_number(&mut self, pos: Position, digit: Digit) {
        let fits = self.fits(digit);
        let cell = self.cell_mut(pos);
        *cell = match *cell {
            CellState::Locked(_) => return,
            CellState::Filled(value) if value == digit => CellState::Empty,
            current if fits => current.toggled_number(digit),
            CellState::Guesses(_) => CellState::Empty,
            current => current,
        };
    }

    fn toggle_guess(&mut self, pos: Position, digit: Digit) {
        let fits = self.fits(digit);
        let cell = self.cell_mut(pos);
        *cell = match *cell {
            CellState::Locked(_) => return,
            current if fits => current.toggled_guess(digit),
            CellState::Filled(_) => CellState::Empty,
            current => current,
        };
    }

    /// Locks `digit` at `pos`, or unlocks the cell if it is already locked to `digit`.
    ///
    /// Locking a cell that is locked to a different value re-locks it.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] or [`GridError::LockValueTooLarge`]
    /// and leaves the grid unchanged.
    pub fn toggle_lock(&mut self, pos: Position, digit: Digit) -> Result<(), GridError> {
        self.check_lock(pos, digit)?;
        let cell = self.cell_mut(pos);
        *cell = match *cell {
            CellState::Locked(current) if current == digit => CellState::Empty,
            _ => CellState::Locked(digit),
        };
        Ok(())
    }

    /// Locks `digit` at `pos` unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] or [`GridError::LockValueTooLarge`]
    /// and leaves the grid unchanged.
    pub fn lock_cell(&mut self, pos: Position, digit: Digit) -> Result<(), GridError> {
        self.check_lock(pos, digit)?;
        *self.cell_mut(pos) = CellState::Locked(digit);
        Ok(())
    }

    fn check_lock(&self, pos: Position, digit: Digit) -> Result<(), GridError> {
        self.check_bounds(pos)?;
        if !self.fits(digit) {
            return Err(GridError::LockValueTooLarge {
                value: digit,
                size: self.size,
            });
        }
        Ok(())
    }

    /// Finds the constraint joining `a` and `b` in either direction.
    #[must_use]
    pub fn lookup_constraint(&self, a: Position, b: Position) -> ConstraintLookup {
        self.constraints
            .iter()
            .position(|c| c.joins(a, b))
            .map_or(ConstraintLookup::NotFound, |index| ConstraintLookup::Found {
                index,
                flipped: self.constraints[index].greater() != a,
            })
    }

    /// Adds the constraint "`greater` > `lesser`".
    ///
    /// # Errors
    ///
    /// Returns an error if the cells are not adjacent, lie outside the grid,
    /// or are already joined by a constraint in either direction.
    pub fn add_greater_than_constraint(
        &mut self,
        greater: Position,
        lesser: Position,
    ) -> Result<(), GridError> {
        let constraint = self.validate_constraint(greater, lesser)?;
        if let ConstraintLookup::Found { index, .. } = self.lookup_constraint(greater, lesser) {
            return Err(GridError::DuplicateConstraint(self.constraints[index]));
        }
        self.constraints.push(constraint);
        Ok(())
    }

    /// Adds, removes or flips the constraint between `from` and `to`.
    ///
    /// A missing constraint is added as "`from` > `to`". An existing one in
    /// that direction is removed, one in the other direction is reversed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cells are not adjacent or lie outside the grid.
    pub fn toggle_constraint(
        &mut self,
        from: Position,
        to: Position,
    ) -> Result<ConstraintToggle, GridError> {
        let constraint = self.validate_constraint(from, to)?;
        match self.lookup_constraint(from, to) {
            ConstraintLookup::NotFound => {
                self.constraints.push(constraint);
                Ok(ConstraintToggle::Added)
            }
            ConstraintLookup::Found {
                index,
                flipped: false,
            } => {
                self.constraints.remove(index);
                Ok(ConstraintToggle::Removed)
            }
            ConstraintLookup::Found {
                index,
                flipped: true,
            } => {
                self.constraints[index] = constraint;
                Ok(ConstraintToggle::Flipped)
            }
        }
    }

    fn validate_constraint(
        &self,
        greater: Position,
        lesser: Position,
    ) -> Result<GreaterThan, GridError> {
        self.check_bounds(greater)?;
        self.check_bounds(lesser)?;
        Ok(GreaterThan::new(greater, lesser)?)
    }

    /// Recomputes the error marks and detects a win.
    ///
    /// In edit mode this only clears the marks. Once the player has won, the
    /// marks are frozen and no further win event is raised until the next
    /// [`Grid::reset`] or mode change.
    ///
    /// A win requires a completely filled board, no duplicate number in any
    /// row or column, every constraint satisfied, and a total equal to
    /// [`Grid::target_sum`]. [`GridEvent::PlayerWon`] is pushed to `events`
    /// exactly once per win.
    pub fn check_constraints(&mut self, events: &mut impl EventSink) {
        if !self.has_valid_data() {
            return;
        }
        if self.state.edit_mode {
            self.errors.clear();
            return;
        }
        if self.player_won {
            return;
        }

        self.errors.clear();
        let mut satisfied = true;
        let mut filled = true;
        let mut sum = 0;

        for y in 0..self.size {
            let mut seen: [Option<u8>; 9] = [None; 9];
            for x in 0..self.size {
                let Some(digit) = self.cell(Position::new(x, y)).number() else {
                    filled = false;
                    continue;
                };
                sum += u32::from(digit.value());
                let slot = &mut seen[usize::from(digit.value() - 1)];
                match *slot {
                    Some(first) => {
                        self.errors.mark_row(y);
                        self.errors.mark_cell(Position::new(first, y));
                        self.errors.mark_cell(Position::new(x, y));
                        satisfied = false;
                    }
                    None => *slot = Some(x),
                }
            }
        }

        for x in 0..self.size {
            let mut seen: [Option<u8>; 9] = [None; 9];
            for y in 0..self.size {
                let Some(digit) = self.cell(Position::new(x, y)).number() else {
                    continue;
                };
                let slot = &mut seen[usize::from(digit.value() - 1)];
                match *slot {
                    Some(first) => {
                        self.errors.mark_column(x);
                        self.errors.mark_cell(Position::new(x, first));
                        self.errors.mark_cell(Position::new(x, y));
                        satisfied = false;
                    }
                    None => *slot = Some(y),
                }
            }
        }

        for &c in &self.constraints {
            if c.is_satisfied_by(self.cell(c.greater()).number(), self.cell(c.lesser()).number()) {
                continue;
            }
            self.errors.mark_cell(c.greater());
            self.errors.mark_cell(c.lesser());
            if c.is_row_constraint() {
                self.errors.mark_row(c.greater().y());
            }
            if c.is_column_constraint() {
                self.errors.mark_column(c.greater().x());
            }
            satisfied = false;
        }

        if satisfied && filled && sum == self.target_sum {
            self.player_won = true;
            events.push_event(GridEvent::PlayerWon);
        }
    }

    /// Clears every player number and guess mark and the win flag.
    ///
    /// Locked cells and constraints are kept.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            if !cell.is_locked() {
                *cell = CellState::Empty;
            }
        }
        self.errors.clear();
        self.player_won = false;
    }

    /// Snapshots the authored content of the grid.
    #[must_use]
    pub fn to_level_data(&self) -> LevelData {
        let locked_cells = self
            .positions()
            .filter_map(|pos| match self.cell(pos) {
                CellState::Locked(value) => Some(LockedCell { pos, value }),
                _ => None,
            })
            .collect();
        let constraints = self
            .constraints
            .iter()
            .map(|c| ConstraintData {
                greater: c.greater(),
                lesser: c.lesser(),
            })
            .collect();
        LevelData {
            grid_size: self.size,
            locked_cells,
            constraints,
        }
    }

    /// Replaces the board with the content of `level`.
    ///
    /// The cursor moves to the first unlocked cell in row-major order and the
    /// win flag is cleared. Input modes are kept.
    ///
    /// # Errors
    ///
    /// Returns the first problem found in `level`; the grid is left unchanged.
    pub fn load_level(&mut self, level: &LevelData) -> Result<(), GridError> {
        check_size(level.grid_size)?;

        let mut grid = Self {
            state: self.state,
            ..Self::default()
        };
        grid.reshape(level.grid_size, ResizePolicy::Discard);
        for cell in &level.locked_cells {
            grid.lock_cell(cell.pos, cell.value)?;
        }
        for c in &level.constraints {
            grid.add_greater_than_constraint(c.greater, c.lesser)?;
        }
        grid.selection = grid
            .positions()
            .find(|&pos| !grid.cell(pos).is_locked())
            .unwrap_or(Position::ORIGIN);

        *self = grid;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use futoshiki_core::DigitSet;
    use proptest::prelude::*;

    use super::*;
    use crate::Severity;

    type Notes = Vec<(Severity, String)>;

    fn pos(x: u8, y: u8) -> Position {
        Position::new(x, y)
    }

    fn d(value: u8) -> Digit {
        Digit::from_value(value)
    }

    /// Cyclic latin square: row `y` is `1..=n` rotated left by `y`.
    fn fill_latin_square(grid: &mut Grid) {
        let n = grid.size();
        for p in grid.positions().collect::<Vec<_>>() {
            if !grid.cell(p).is_locked() {
                *grid.cell_mut(p) = CellState::Filled(d((p.x() + p.y()) % n + 1));
            }
        }
    }

    fn play_grid(text: &str) -> Grid {
        Grid::from_level(&text.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_new_grid_has_no_data() {
        let mut grid = Grid::new();
        let mut notes = Notes::new();
        assert!(!grid.has_valid_data());
        grid.on_change_selection(1, 0, &mut notes);
        grid.on_handle_number(Digit::D1, ResizePolicy::Discard, &mut notes);
        grid.check_constraints(&mut Vec::new());
        assert!(!grid.has_valid_data());
        assert!(notes.is_empty());
    }

    #[test]
    fn test_new_board_uses_default_size() {
        let mut grid = Grid::new();
        grid.new_board();
        assert_eq!(grid.size(), DEFAULT_GRID_SIZE);
        assert_eq!(grid.selection(), Position::ORIGIN);

        grid.change_grid_size(3, ResizePolicy::Discard).unwrap();
        grid.lock_cell(pos(1, 1), Digit::D2).unwrap();
        grid.new_board();
        assert_eq!(grid.size(), 3);
        assert!(grid.cell(pos(1, 1)).is_empty());
    }

    #[test]
    fn test_rejects_invalid_sizes() {
        let mut grid = Grid::with_size(4).unwrap();
        assert_eq!(
            grid.change_grid_size(0, ResizePolicy::Discard),
            Err(GridError::InvalidGridSize { size: 0 })
        );
        assert_eq!(
            grid.change_grid_size(10, ResizePolicy::RetainLocked),
            Err(GridError::InvalidGridSize { size: 10 })
        );
        assert_eq!(grid.size(), 4);
    }

    #[test]
    fn test_retain_keeps_in_bounds_locks_and_constraints() {
        let mut grid = Grid::with_size(5).unwrap();
        grid.lock_cell(pos(0, 0), Digit::D1).unwrap();
        grid.lock_cell(pos(4, 4), Digit::D5).unwrap();
        grid.add_greater_than_constraint(pos(1, 1), pos(2, 1)).unwrap();
        grid.add_greater_than_constraint(pos(3, 3), pos(3, 4)).unwrap();
        grid.set_selection(pos(4, 2)).unwrap();

        grid.change_grid_size(3, ResizePolicy::RetainLocked).unwrap();

        assert_eq!(grid.cell(pos(0, 0)), CellState::Locked(Digit::D1));
        assert_eq!(grid.constraints().len(), 1);
        assert_eq!(grid.constraints()[0].greater(), pos(1, 1));
        assert_eq!(grid.selection(), pos(2, 2));
        assert_eq!(grid.target_sum(), 18);

        grid.change_grid_size(5, ResizePolicy::RetainLocked).unwrap();
        assert!(grid.cell(pos(4, 4)).is_empty());
        assert_eq!(grid.cell(pos(0, 0)), CellState::Locked(Digit::D1));
    }

    #[test]
    fn test_lock_toggle_round_trip() {
        let mut grid = Grid::with_size(4).unwrap();
        let p = pos(2, 3);

        grid.toggle_lock(p, Digit::D3).unwrap();
        assert_eq!(grid.cell(p), CellState::Locked(Digit::D3));
        grid.toggle_lock(p, Digit::D3).unwrap();
        assert_eq!(grid.cell(p), CellState::Empty);

        grid.toggle_lock(p, Digit::D3).unwrap();
        grid.toggle_lock(p, Digit::D4).unwrap();
        assert_eq!(grid.cell(p), CellState::Locked(Digit::D4));
    }

    #[test]
    fn test_lock_rejects_invalid_input() {
        let mut grid = Grid::with_size(4).unwrap();
        assert_eq!(
            grid.toggle_lock(pos(4, 0), Digit::D1),
            Err(GridError::OutOfBounds {
                pos: pos(4, 0),
                size: 4
            })
        );
        assert_eq!(
            grid.toggle_lock(pos(0, 0), Digit::D5),
            Err(GridError::LockValueTooLarge {
                value: Digit::D5,
                size: 4
            })
        );
        assert!(grid.cell(pos(0, 0)).is_empty());
    }

    #[test]
    fn test_editor_lock_warns_on_large_value() {
        let mut grid = Grid::with_size(3).unwrap();
        grid.set_edit_mode(true);
        let mut notes = Notes::new();
        grid.on_handle_number(Digit::D7, ResizePolicy::Discard, &mut notes);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].0, Severity::Warning);
        assert!(grid.cell(Position::ORIGIN).is_empty());

        grid.on_handle_number(Digit::D2, ResizePolicy::Discard, &mut notes);
        assert_eq!(grid.cell(Position::ORIGIN), CellState::Locked(Digit::D2));
    }

    #[test]
    fn test_constraint_lookup_and_toggle() {
        let mut grid = Grid::with_size(4).unwrap();
        let a = pos(1, 2);
        let b = pos(2, 2);
        grid.add_greater_than_constraint(a, b).unwrap();

        assert_eq!(
            grid.lookup_constraint(a, b),
            ConstraintLookup::Found {
                index: 0,
                flipped: false
            }
        );
        assert_eq!(
            grid.lookup_constraint(b, a),
            ConstraintLookup::Found {
                index: 0,
                flipped: true
            }
        );

        assert_eq!(grid.toggle_constraint(b, a), Ok(ConstraintToggle::Flipped));
        assert_eq!(grid.constraints()[0].greater(), b);
        assert_eq!(grid.toggle_constraint(a, b), Ok(ConstraintToggle::Flipped));
        assert_eq!(grid.constraints()[0].greater(), a);

        assert_eq!(grid.toggle_constraint(a, b), Ok(ConstraintToggle::Removed));
        assert!(grid.lookup_constraint(a, b).is_not_found());
        assert_eq!(grid.toggle_constraint(a, b), Ok(ConstraintToggle::Added));
    }

    #[test]
    fn test_add_constraint_rejects_duplicates_and_bad_pairs() {
        let mut grid = Grid::with_size(3).unwrap();
        grid.add_greater_than_constraint(pos(0, 0), pos(0, 1)).unwrap();
        assert!(matches!(
            grid.add_greater_than_constraint(pos(0, 1), pos(0, 0)),
            Err(GridError::DuplicateConstraint(_))
        ));
        assert!(matches!(
            grid.add_greater_than_constraint(pos(0, 0), pos(1, 1)),
            Err(GridError::InvalidConstraint(_))
        ));
        assert!(matches!(
            grid.add_greater_than_constraint(pos(2, 0), pos(3, 0)),
            Err(GridError::OutOfBounds { .. })
        ));
        assert_eq!(grid.constraints().len(), 1);
    }

    #[test]
    fn test_editor_alt_direction_toggles_constraint() {
        let mut grid = Grid::with_size(3).unwrap();
        grid.set_edit_mode(true);
        grid.set_alt_mode(true);
        let mut notes = Notes::new();

        grid.on_change_selection(1, 0, &mut notes);
        assert_eq!(grid.selection(), Position::ORIGIN);
        assert_eq!(grid.constraints().len(), 1);
        assert!(grid.constraints()[0].joins(pos(0, 0), pos(1, 0)));

        grid.on_change_selection(-1, 0, &mut notes);
        assert_eq!(notes.len(), 1);
        assert_eq!(grid.constraints().len(), 1);
    }

    #[test]
    fn test_editor_selection_wraps() {
        let mut grid = Grid::with_size(4).unwrap();
        grid.set_edit_mode(true);
        let mut notes = Notes::new();
        grid.on_change_selection(-1, 0, &mut notes);
        assert_eq!(grid.selection(), pos(3, 0));
        grid.on_change_selection(0, -1, &mut notes);
        assert_eq!(grid.selection(), pos(3, 3));
        grid.on_change_selection(1, 1, &mut notes);
        assert_eq!(grid.selection(), Position::ORIGIN);
    }

    #[test]
    fn test_play_selection_skips_locked_cells() {
        let mut grid = play_grid("S 5\nN 1 0 1\nN 2 0 2\n");
        let mut notes = Notes::new();
        assert_eq!(grid.selection(), Position::ORIGIN);

        // (1,0) locked, (2,0) locked, (4,0) free.
        grid.on_change_selection(1, 0, &mut notes);
        assert_eq!(grid.selection(), pos(4, 0));

        // (3,0) free.
        grid.on_change_selection(-1, 0, &mut notes);
        assert_eq!(grid.selection(), pos(3, 0));

        // (2,0) locked, (1,0) locked, next probe leaves the grid.
        grid.on_change_selection(-1, 0, &mut notes);
        assert_eq!(grid.selection(), pos(3, 0));

        grid.on_change_selection(0, -1, &mut notes);
        assert_eq!(grid.selection(), pos(3, 0));
    }

    #[test]
    fn test_number_and_guess_input() {
        let mut grid = Grid::with_size(4).unwrap();
        let mut notes = Notes::new();
        let p = Position::ORIGIN;

        grid.on_handle_number(Digit::D2, ResizePolicy::Discard, &mut notes);
        assert_eq!(grid.cell(p), CellState::Filled(Digit::D2));
        grid.on_handle_number(Digit::D2, ResizePolicy::Discard, &mut notes);
        assert_eq!(grid.cell(p), CellState::Empty);

        grid.set_alt_mode(true);
        grid.on_handle_number(Digit::D1, ResizePolicy::Discard, &mut notes);
        grid.on_handle_number(Digit::D3, ResizePolicy::Discard, &mut notes);
        grid.on_handle_number(Digit::D9, ResizePolicy::Discard, &mut notes);
        assert_eq!(
            grid.cell(p).guesses(),
            [Digit::D1, Digit::D3].into_iter().collect::<DigitSet>()
        );

        grid.set_alt_mode(false);
        grid.on_handle_number(Digit::D4, ResizePolicy::Discard, &mut notes);
        assert_eq!(grid.cell(p), CellState::Filled(Digit::D4));
        assert!(notes.is_empty());
    }

    #[test]
    fn test_out_of_range_number_still_clears_guesses() {
        let mut grid = Grid::with_size(3).unwrap();
        let mut notes = Notes::new();
        grid.set_alt_mode(true);
        grid.on_handle_number(Digit::D1, ResizePolicy::Discard, &mut notes);
        grid.set_alt_mode(false);
        grid.on_handle_number(Digit::D8, ResizePolicy::Discard, &mut notes);
        assert_eq!(grid.cell(Position::ORIGIN), CellState::Empty);

        grid.on_handle_number(Digit::D3, ResizePolicy::Discard, &mut notes);
        grid.on_handle_number(Digit::D8, ResizePolicy::Discard, &mut notes);
        assert_eq!(grid.cell(Position::ORIGIN), CellState::Filled(Digit::D3));
    }

    #[test]
    fn test_play_input_never_touches_locked_cells() {
        let mut grid = Grid::with_size(2).unwrap();
        grid.lock_cell(Position::ORIGIN, Digit::D1).unwrap();
        let mut notes = Notes::new();
        grid.on_handle_number(Digit::D2, ResizePolicy::Discard, &mut notes);
        grid.set_alt_mode(true);
        grid.on_handle_number(Digit::D2, ResizePolicy::Discard, &mut notes);
        assert_eq!(grid.cell(Position::ORIGIN), CellState::Locked(Digit::D1));
    }

    #[test]
    fn test_editor_alt_digit_resizes() {
        let mut grid = Grid::with_size(5).unwrap();
        grid.lock_cell(pos(1, 1), Digit::D3).unwrap();
        grid.set_edit_mode(true);
        grid.set_alt_mode(true);
        let mut notes = Notes::new();

        grid.on_handle_number(Digit::D3, ResizePolicy::RetainLocked, &mut notes);
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.cell(pos(1, 1)), CellState::Locked(Digit::D3));

        grid.on_handle_number(Digit::D6, ResizePolicy::Discard, &mut notes);
        assert_eq!(grid.size(), 6);
        assert!(grid.cell(pos(1, 1)).is_empty());
    }

    #[test]
    fn test_win_on_valid_board() {
        let mut grid = Grid::with_size(4).unwrap();
        grid.add_greater_than_constraint(pos(3, 0), pos(2, 0)).unwrap();
        fill_latin_square(&mut grid);

        let mut events = Vec::new();
        grid.check_constraints(&mut events);
        assert!(grid.errors().is_empty());
        assert!(grid.player_won());
        assert_eq!(events, vec![GridEvent::PlayerWon]);

        // Sticky: no second event and no recomputation.
        *grid.cell_mut(pos(0, 0)) = CellState::Filled(Digit::D2);
        grid.check_constraints(&mut events);
        assert_eq!(events.len(), 1);
        assert!(grid.errors().is_empty());

        grid.reset();
        assert!(!grid.player_won());
        assert!(grid.positions().all(|p| grid.cell(p).is_empty()));
    }

    #[test]
    fn test_duplicate_blocks_win() {
        let mut grid = Grid::with_size(3).unwrap();
        fill_latin_square(&mut grid);
        // Row 0 becomes 1 1 3.
        *grid.cell_mut(pos(1, 0)) = CellState::Filled(Digit::D1);

        let mut events = Vec::new();
        grid.check_constraints(&mut events);
        assert!(events.is_empty());
        assert!(!grid.player_won());
        assert!(grid.errors().row_has_error(0));
        assert!(grid.errors().cell_has_error(pos(0, 0)));
        assert!(grid.errors().cell_has_error(pos(1, 0)));
        assert!(!grid.errors().cell_has_error(pos(2, 0)));
        assert!(grid.errors().column_has_error(1));
    }

    #[test]
    fn test_retaining_shrink_drops_oversized_locks() {
        let mut grid = Grid::with_size(5).unwrap();
        grid.lock_cell(pos(0, 0), Digit::D5).unwrap();
        grid.lock_cell(pos(1, 0), Digit::D2).unwrap();

        grid.change_grid_size(3, ResizePolicy::RetainLocked).unwrap();
        assert!(grid.cell(pos(0, 0)).is_empty());
        assert_eq!(grid.cell(pos(1, 0)), CellState::Locked(Digit::D2));

        let saved = grid.to_level_data();
        assert_eq!(saved.to_string(), "S 3\nN 1 0 2\n");
        let reloaded = Grid::from_level(&saved).unwrap();
        assert_eq!(reloaded.to_level_data(), saved);
    }

    #[test]
    fn test_unfilled_board_does_not_win() {
        let mut grid = Grid::with_size(3).unwrap();
        fill_latin_square(&mut grid);
        *grid.cell_mut(pos(2, 2)) = CellState::Empty;

        let mut events = Vec::new();
        grid.check_constraints(&mut events);
        assert!(grid.errors().is_empty());
        assert!(!grid.player_won());
        assert!(events.is_empty());
    }

    #[test]
    fn test_single_cell_board_wins() {
        let mut grid = Grid::with_size(1).unwrap();
        let mut events = Vec::new();
        grid.check_constraints(&mut events);
        assert!(!grid.player_won());

        grid.on_handle_number(Digit::D1, ResizePolicy::Discard, &mut Notes::new());
        grid.check_constraints(&mut events);
        assert!(grid.player_won());
    }

    #[test]
    fn test_constraint_violation_marks() {
        let mut grid = play_grid("S 3\nC 0 0 0 1\n");
        *grid.cell_mut(pos(0, 0)) = CellState::Filled(Digit::D1);
        *grid.cell_mut(pos(0, 1)) = CellState::Filled(Digit::D2);

        grid.check_constraints(&mut Vec::new());
        assert!(grid.errors().column_has_error(0));
        assert!(!grid.errors().row_has_error(0));
        assert!(grid.errors().cell_has_error(pos(0, 0)));
        assert!(grid.errors().cell_has_error(pos(0, 1)));
    }

    #[test]
    fn test_edit_mode_clears_errors() {
        let mut grid = Grid::with_size(2).unwrap();
        *grid.cell_mut(pos(0, 0)) = CellState::Filled(Digit::D1);
        *grid.cell_mut(pos(1, 0)) = CellState::Filled(Digit::D1);
        grid.check_constraints(&mut Vec::new());
        assert!(!grid.errors().is_empty());

        grid.set_edit_mode(true);
        *grid.cell_mut(pos(0, 1)) = CellState::Filled(Digit::D2);
        grid.check_constraints(&mut Vec::new());
        assert!(grid.errors().is_empty());
    }

    #[test]
    fn test_load_example_level_and_conflict() {
        let mut grid = play_grid("S 4\nN 0 0 1\nC 0 0 1 0\n");
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.cell(pos(0, 0)), CellState::Locked(Digit::D1));
        assert_eq!(grid.selection(), pos(1, 0));

        let mut notes = Notes::new();
        grid.on_handle_number(Digit::D1, ResizePolicy::Discard, &mut notes);
        let mut events = Vec::new();
        grid.check_constraints(&mut events);

        assert!(grid.errors().row_has_error(0));
        assert!(grid.errors().cell_has_error(pos(0, 0)));
        assert!(grid.errors().cell_has_error(pos(1, 0)));
        assert!(events.is_empty());

        // The constraint alone also flags the pair.
        grid.reset();
        grid.on_handle_number(Digit::D2, ResizePolicy::Discard, &mut notes);
        grid.check_constraints(&mut events);
        assert!(grid.errors().row_has_error(0));
        assert!(grid.errors().cell_has_error(pos(1, 0)));
    }

    #[test]
    fn test_load_rejects_bad_levels_without_changes() {
        let mut grid = Grid::with_size(2).unwrap();
        let before = grid.clone();
        for text in [
            "S 0\n",
            "S 10\n",
            "S 3\nN 3 0 1\n",
            "S 3\nN 0 0 4\n",
            "S 3\nC 0 0 2 0\n",
            "S 3\nC 0 0 1 0\nC 1 0 0 0\n",
        ] {
            assert!(grid.load_level(&text.parse().unwrap()).is_err(), "{text}");
            assert_eq!(grid, before);
        }
    }

    #[test]
    fn test_load_keeps_modes_and_clears_win() {
        let mut grid = Grid::with_size(1).unwrap();
        grid.on_handle_number(Digit::D1, ResizePolicy::Discard, &mut Notes::new());
        grid.check_constraints(&mut Vec::new());
        grid.set_alt_mode(true);
        assert!(grid.player_won());

        grid.load_level(&"S 2\nN 0 0 1\nN 1 0 2\n".parse().unwrap())
            .unwrap();
        assert!(!grid.player_won());
        assert!(grid.state().alt_mode);
        assert_eq!(grid.selection(), pos(0, 1));
    }

    proptest! {
        #[test]
        fn test_discarding_resize_empties_board(
            start in 1u8..=9,
            size in 1u8..=9,
            locks in prop::collection::vec((0u8..9, 0u8..9, 1u8..=9), 0..20),
        ) {
            let mut grid = Grid::with_size(start).unwrap();
            for (x, y, v) in locks {
                let _ = grid.lock_cell(pos(x, y), d(v));
            }
            let _ = grid.add_greater_than_constraint(pos(0, 0), pos(0, 1));

            grid.change_grid_size(size, ResizePolicy::Discard).unwrap();

            let n = u32::from(size);
            prop_assert_eq!(grid.size(), size);
            prop_assert!(grid.constraints().is_empty());
            prop_assert_eq!(grid.target_sum(), n * (n * (n + 1) / 2));
            prop_assert_eq!(grid.positions().count(), usize::from(size) * usize::from(size));
            for p in grid.positions() {
                prop_assert_eq!(grid.cell(p), CellState::Empty);
            }
        }

        #[test]
        fn test_play_selection_never_lands_on_locked(
            size in 1u8..=9,
            locked in prop::collection::vec(any::<bool>(), 81),
            start in (0u8..9, 0u8..9),
            dir in 0usize..4,
        ) {
            let mut grid = Grid::with_size(size).unwrap();
            for p in grid.positions().collect::<Vec<_>>() {
                if locked[p.index(9)] {
                    grid.lock_cell(p, Digit::D1).unwrap();
                }
            }
            let start = pos(start.0 % size, start.1 % size);
            grid.set_selection(start).unwrap();
            let (dx, dy) = [(1, 0), (-1, 0), (0, 1), (0, -1)][dir];

            grid.on_change_selection(dx, dy, &mut Notes::new());

            let end = grid.selection();
            if end != start {
                prop_assert!(!grid.cell(end).is_locked());
                let step = (i32::from(end.x()) - i32::from(start.x()), i32::from(end.y()) - i32::from(start.y()));
                prop_assert!(step.0 * dx >= 0 && step.1 * dy >= 0);
                prop_assert!(step.0 * dy == 0 && step.1 * dx == 0);
            }
        }

        #[test]
        fn test_retaining_resize_keeps_level_reloadable(
            start in 1u8..=9,
            size in 1u8..=9,
            locks in prop::collection::vec((0u8..9, 0u8..9, 1u8..=9), 0..20),
            links in prop::collection::vec((0u8..9, 0u8..9, 0usize..4), 0..20),
        ) {
            let mut grid = Grid::with_size(start).unwrap();
            for (x, y, v) in locks {
                let _ = grid.lock_cell(pos(x % start, y % start), d((v - 1) % start + 1));
            }
            for (x, y, dir) in links {
                let from = pos(x % start, y % start);
                let (dx, dy) = [(1, 0), (-1, 0), (0, 1), (0, -1)][dir];
                if let Some(to) = from.offset(dx, dy, start) {
                    let _ = grid.add_greater_than_constraint(from, to);
                }
            }

            grid.change_grid_size(size, ResizePolicy::RetainLocked).unwrap();

            let saved = grid.to_level_data();
            let reloaded = Grid::from_level(&saved);
            prop_assert!(reloaded.is_ok(), "{saved} failed to reload: {reloaded:?}");
            if let Ok(reloaded) = reloaded {
                prop_assert_eq!(reloaded.to_level_data(), saved);
            }
        }

        #[test]
        fn test_level_round_trip(
            size in 1u8..=9,
            locks in prop::collection::vec((0u8..9, 0u8..9, 1u8..=9), 0..30),
            links in prop::collection::vec((0u8..9, 0u8..9, 0usize..4), 0..30),
        ) {
            let mut expected_locks = BTreeMap::new();
            for (x, y, v) in locks {
                expected_locks.insert(pos(x % size, y % size), d((v - 1) % size + 1));
            }
            let mut pairs = BTreeSet::new();
            let mut expected_constraints = BTreeSet::new();
            for (x, y, dir) in links {
                let from = pos(x % size, y % size);
                let (dx, dy) = [(1, 0), (-1, 0), (0, 1), (0, -1)][dir];
                let Some(to) = from.offset(dx, dy, size) else { continue };
                if pairs.insert((from.min(to), from.max(to))) {
                    expected_constraints.insert((from, to));
                }
            }

            let level = LevelData {
                grid_size: size,
                locked_cells: expected_locks
                    .iter()
                    .map(|(&pos, &value)| LockedCell { pos, value })
                    .collect(),
                constraints: expected_constraints
                    .iter()
                    .map(|&(greater, lesser)| ConstraintData { greater, lesser })
                    .collect(),
            };

            let grid = Grid::from_level(&level).unwrap();
            let saved = Grid::from_level(&grid.to_level_data()).unwrap().to_level_data();

            prop_assert_eq!(saved.grid_size, size);
            let saved_locks: BTreeMap<_, _> =
                saved.locked_cells.iter().map(|c| (c.pos, c.value)).collect();
            prop_assert_eq!(saved_locks, expected_locks);
            let saved_constraints: BTreeSet<_> =
                saved.constraints.iter().map(|c| (c.greater, c.lesser)).collect();
            prop_assert_eq!(saved_constraints, expected_constraints);
        }
    }
}
