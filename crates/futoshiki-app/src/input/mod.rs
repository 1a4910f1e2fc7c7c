//! Action/context dispatcher.
//!
//! Physical keys are bound to abstract [`ActionType`]s. Each binding carries
//! an [`InteractionKind`] and a [`MappingContext`] mask; once per tick
//! [`ActionMap::generate_events`] evaluates every binding against the active
//! context and the frame's [`InputSource`] and emits one [`Event`] per firing
//! binding.
//!
//! [`Event`]: crate::event::Event

use std::collections::HashSet;

use futoshiki_core::Digit;

pub use self::{
    action_map::{ActionMap, ActionType, Binding, action_event},
    bindings::install_default_bindings,
    context::MappingContext,
};

mod action_map;
mod bindings;
mod context;

/// Physical keys understood by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Enter,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    W,
    A,
    S,
    D,
    R,
    F,
    L,
    E,
    P,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    /// Either control key.
    Control,
}

impl Key {
    /// The number-row key that types `digit`.
    #[must_use]
    pub const fn for_digit(digit: Digit) -> Self {
        match digit {
            Digit::D1 => Self::Num1,
            Digit::D2 => Self::Num2,
            Digit::D3 => Self::Num3,
            Digit::D4 => Self::Num4,
            Digit::D5 => Self::Num5,
            Digit::D6 => Self::Num6,
            Digit::D7 => Self::Num7,
            Digit::D8 => Self::Num8,
            Digit::D9 => Self::Num9,
        }
    }
}

/// How a key must behave during a tick for a binding to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    /// Went down this tick.
    Pressed,
    /// Auto-repeated this tick while held.
    Repeated,
    /// Is currently held.
    Down,
    /// Went up this tick.
    Released,
}

impl InteractionKind {
    /// Returns `true` if `key` matches this interaction in the current frame.
    pub fn is_triggered(self, key: Key, input: &impl InputSource) -> bool {
        match self {
            Self::Pressed => input.is_pressed(key),
            Self::Repeated => input.is_repeated(key),
            Self::Down => input.is_down(key),
            Self::Released => input.is_released(key),
        }
    }
}

/// Per-tick keyboard queries.
pub trait InputSource {
    /// The key went down this tick.
    fn is_pressed(&self, key: Key) -> bool;
    /// The key produced an auto-repeat this tick.
    fn is_repeated(&self, key: Key) -> bool;
    /// The key is held.
    fn is_down(&self, key: Key) -> bool;
    /// The key went up this tick.
    fn is_released(&self, key: Key) -> bool;
}

/// A snapshot of one frame's keyboard state.
///
/// Built by the egui front end every frame, and by hand in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    pressed: HashSet<Key>,
    repeated: HashSet<Key>,
    down: HashSet<Key>,
    released: HashSet<Key>,
}

impl FrameInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a press edge. The key also counts as held.
    #[must_use]
    pub fn press(mut self, key: Key) -> Self {
        self.pressed.insert(key);
        self.down.insert(key);
        self
    }

    /// Records an auto-repeat. The key also counts as held.
    #[must_use]
    pub fn repeat(mut self, key: Key) -> Self {
        self.repeated.insert(key);
        self.down.insert(key);
        self
    }

    /// Records a key that is held without an edge.
    #[must_use]
    pub fn hold(mut self, key: Key) -> Self {
        self.down.insert(key);
        self
    }

    /// Records a release edge.
    #[must_use]
    pub fn release(mut self, key: Key) -> Self {
        self.released.insert(key);
        self.down.remove(&key);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty()
            && self.repeated.is_empty()
            && self.down.is_empty()
            && self.released.is_empty()
    }
}

impl InputSource for FrameInput {
    fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn is_repeated(&self, key: Key) -> bool {
        self.repeated.contains(&key)
    }

    fn is_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }

    fn is_released(&self, key: Key) -> bool {
        self.released.contains(&key)
    }
}
