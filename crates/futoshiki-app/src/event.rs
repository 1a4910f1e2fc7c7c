//! Semantic events and the double-buffered queue that carries them.
//!
//! Events produced by the dispatcher for the current tick live in the
//! *current* buffer. Anything raised while those are being delivered goes to
//! the *next* buffer and is only promoted once the current buffer has been
//! drained, so a delivery pass never observes its own side effects.

use std::mem;

use futoshiki_core::Digit;
use futoshiki_game::{EventSink, GridEvent};

use crate::input::MappingContext;

/// Operation on the dispatcher's context stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerOp {
    Push(MappingContext),
    Pop,
}

/// Semantic events routed once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Reset the board; the meaning depends on the grid mode.
    BoardReset,
    /// Move the cursor, or toggle a constraint in edit+alt mode.
    ChangeSelection { dx: i32, dy: i32 },
    /// A digit key.
    Number(Digit),
    /// Change the grid's alt and/or edit flag. `None` leaves a flag alone.
    ChangeGridState {
        alt: Option<bool>,
        edit: Option<bool>,
    },
    /// The board was solved.
    PlayerWon,
    /// Save the edited board; alt mode overwrites the loaded level.
    SaveLevel,
    /// Open the level menu, or close it with or without selecting.
    ToggleLevelMenu { commit: bool },
    /// Load the level at this index of the browser's listing.
    SelectLevel(usize),
    /// Push or pop a dispatcher context.
    InputLayer(LayerOp),
    Commit,
    Cancel,
}

impl From<GridEvent> for Event {
    fn from(event: GridEvent) -> Self {
        match event {
            GridEvent::PlayerWon => Self::PlayerWon,
        }
    }
}

/// Whether a receiver consumed an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum HandleResult {
    Handled,
    NotHandled,
}

/// Two-buffer FIFO of [`Event`]s.
#[derive(Debug, Default, Clone)]
pub struct EventQueue {
    current: Vec<Event>,
    next: Vec<Event>,
}

impl EventQueue {
    /// Defers `event` to the next delivery pass.
    pub fn push(&mut self, event: Event) {
        self.next.push(event);
    }

    /// Appends `event` to the pass about to be delivered.
    pub fn push_current(&mut self, event: Event) {
        self.current.push(event);
    }

    /// Takes the events of the current pass, leaving it empty.
    pub fn take_current(&mut self) -> Vec<Event> {
        mem::take(&mut self.current)
    }

    /// Moves deferred events behind the current ones.
    ///
    /// Returns `false` if there was nothing to promote.
    pub fn promote(&mut self) -> bool {
        if self.next.is_empty() {
            return false;
        }
        self.current.append(&mut self.next);
        true
    }

    /// Events waiting in either buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.current.len() + self.next.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty() && self.next.is_empty()
    }

    /// Drops every pending event.
    pub fn clear(&mut self) {
        self.current.clear();
        self.next.clear();
    }
}

impl Extend<Event> for EventQueue {
    fn extend<T: IntoIterator<Item = Event>>(&mut self, iter: T) {
        self.next.extend(iter);
    }
}

impl EventSink for EventQueue {
    fn push_event(&mut self, event: GridEvent) {
        self.push(event.into());
    }
}
