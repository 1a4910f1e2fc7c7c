use futoshiki_core::{Digit, DigitSet};

/// The contents of a single grid cell.
///
/// A cell holds either a number or a set of guess marks, never both. The
/// variants make that exclusivity structural: placing a number replaces the
/// marks and toggling a mark replaces the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum CellState {
    /// Nothing placed.
    #[default]
    Empty,
    /// A number fixed by the level author. Play input never changes it.
    Locked(Digit),
    /// A number placed by the player.
    Filled(Digit),
    /// Candidate marks placed by the player. The set is never empty.
    Guesses(DigitSet),
}

impl CellState {
    /// Returns the placed number, locked or not.
    #[must_use]
    pub const fn number(self) -> Option<Digit> {
        match self {
            Self::Locked(digit) | Self::Filled(digit) => Some(digit),
            Self::Empty | Self::Guesses(_) => None,
        }
    }

    /// Returns the guess marks, empty unless the cell is [`CellState::Guesses`].
    #[must_use]
    pub const fn guesses(self) -> DigitSet {
        match self {
            Self::Guesses(set) => set,
            _ => DigitSet::EMPTY,
        }
    }

    /// Toggles the player number, returning the new state.
    ///
    /// Entering the number already present clears the cell. Any guess marks
    /// are dropped.
    pub(crate) fn toggled_number(self, digit: Digit) -> Self {
        match self {
            Self::Filled(current) if current == digit => Self::Empty,
            _ => Self::Filled(digit),
        }
    }

    /// Toggles one guess mark, returning the new state.
    pub(crate) fn toggled_guess(self, digit: Digit) -> Self {
        let mut set = self.guesses();
        set.toggle(digit);
        if set.is_empty() {
            Self::Empty
        } else {
            Self::Guesses(set)
        }
    }
}
