use std::collections::BTreeMap;

use futoshiki_core::Digit;

use super::{InputSource, InteractionKind, Key, MappingContext};
use crate::event::{Event, EventQueue};

/// Abstract actions a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionType {
    BoardReset,
    SaveLevel,
    ToggleLevelMenu,
    EditorMode,
    PlayMode,
    AltMode,
    NumberMode,
    SelectLeft,
    SelectRight,
    SelectUp,
    SelectDown,
    Number(Digit),
    Commit,
    Cancel,
}

/// Translates an action into the event it produces.
#[must_use]
pub fn action_event(action: ActionType) -> Event {
    match action {
        ActionType::Commit => Event::Commit,
        ActionType::Cancel => Event::Cancel,
        ActionType::SelectLeft => Event::ChangeSelection { dx: -1, dy: 0 },
        ActionType::SelectRight => Event::ChangeSelection { dx: 1, dy: 0 },
        ActionType::SelectUp => Event::ChangeSelection { dx: 0, dy: -1 },
        ActionType::SelectDown => Event::ChangeSelection { dx: 0, dy: 1 },
        ActionType::Number(digit) => Event::Number(digit),
        ActionType::AltMode => Event::ChangeGridState {
            alt: Some(true),
            edit: None,
        },
        ActionType::NumberMode => Event::ChangeGridState {
            alt: Some(false),
            edit: None,
        },
        ActionType::EditorMode => Event::ChangeGridState {
            alt: None,
            edit: Some(true),
        },
        ActionType::PlayMode => Event::ChangeGridState {
            alt: None,
            edit: Some(false),
        },
        ActionType::BoardReset => Event::BoardReset,
        ActionType::SaveLevel => Event::SaveLevel,
        ActionType::ToggleLevelMenu => Event::ToggleLevelMenu { commit: false },
    }
}

/// A key, the way it must be used, and the contexts it is active in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub key: Key,
    pub interaction: InteractionKind,
    pub contexts: MappingContext,
}

impl Binding {
    /// Returns `true` if the binding fires while `active` is the current context.
    pub fn evaluate(&self, active: MappingContext, input: &impl InputSource) -> bool {
        self.contexts.admits(active) && self.interaction.is_triggered(self.key, input)
    }
}

/// Bindings per action plus the stack of active mapping contexts.
///
/// The stack is never empty; its top is the context bindings are evaluated
/// against, and always contains [`MappingContext::ALWAYS_ON`].
#[derive(Debug, Clone)]
pub struct ActionMap {
    bindings: BTreeMap<ActionType, Vec<Binding>>,
    contexts: Vec<MappingContext>,
}

impl Default for ActionMap {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionMap {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: BTreeMap::new(),
            contexts: vec![MappingContext::ALWAYS_ON | MappingContext::GAME],
        }
    }

    /// Registers a binding.
    ///
    /// Returns `false` if `action` already has a binding with the same key
    /// and interaction; the existing binding is kept.
    pub fn add_action(
        &mut self,
        action: ActionType,
        key: Key,
        interaction: InteractionKind,
        contexts: MappingContext,
    ) -> bool {
        let bindings = self.bindings.entry(action).or_default();
        if bindings
            .iter()
            .any(|b| b.key == key && b.interaction == interaction)
        {
            return false;
        }
        bindings.push(Binding {
            key,
            interaction,
            contexts,
        });
        true
    }

    /// Removes every binding of `action` that uses `key`.
    pub fn remove_action(&mut self, action: ActionType, key: Key) {
        if let Some(bindings) = self.bindings.get_mut(&action) {
            bindings.retain(|b| b.key != key);
        }
    }

    /// Removes every binding of `action`.
    pub fn remove_all_actions(&mut self, action: ActionType) {
        self.bindings.remove(&action);
    }

    /// Bindings registered for `action`.
    #[must_use]
    pub fn bindings(&self, action: ActionType) -> &[Binding] {
        self.bindings.get(&action).map_or(&[], Vec::as_slice)
    }

    /// Evaluates every binding and appends one event per firing binding.
    pub fn generate_events(&self, input: &impl InputSource, events: &mut EventQueue) {
        let active = self.current_context();
        for (&action, bindings) in &self.bindings {
            for binding in bindings {
                if binding.evaluate(active, input) {
                    events.push_current(action_event(action));
                }
            }
        }
    }

    /// The context bindings are currently evaluated against.
    #[must_use]
    pub fn current_context(&self) -> MappingContext {
        // The stack starts with one layer and `pop_input_layer` never removes the last.
        self.contexts
            .last()
            .copied()
            .unwrap_or(MappingContext::ALWAYS_ON)
    }

    /// Number of layers on the context stack.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.contexts.len()
    }

    fn top_mut(&mut self) -> &mut MappingContext {
        if self.contexts.is_empty() {
            self.contexts.push(MappingContext::ALWAYS_ON);
        }
        let last = self.contexts.len() - 1;
        &mut self.contexts[last]
    }

    /// Makes `context` the active context until the matching pop.
    pub fn push_input_layer(&mut self, context: MappingContext) {
        self.contexts.push(context | MappingContext::ALWAYS_ON);
        log::debug!(
            "pushed input layer {:?} (depth {})",
            self.current_context(),
            self.contexts.len()
        );
    }

    /// Restores the previous context. The last layer is never removed.
    pub fn pop_input_layer(&mut self) {
        if self.contexts.len() > 1 {
            self.contexts.pop();
            log::debug!(
                "popped input layer, now {:?} (depth {})",
                self.current_context(),
                self.contexts.len()
            );
        } else {
            log::debug!("ignored pop of the last input layer");
        }
    }

    /// Replaces the top context.
    pub fn set_current_mapping_context(&mut self, context: MappingContext) {
        *self.top_mut() = context | MappingContext::ALWAYS_ON;
    }

    /// Adds bits to the top context.
    pub fn add_mapping_context(&mut self, context: MappingContext) {
        *self.top_mut() |= context;
    }

    /// Removes bits from the top context, keeping [`MappingContext::ALWAYS_ON`].
    pub fn remove_mapping_context(&mut self, context: MappingContext) {
        let top = self.top_mut();
        *top = top.difference(context) | MappingContext::ALWAYS_ON;
    }

    /// Resets the top context to [`MappingContext::ALWAYS_ON`] alone.
    pub fn remove_all_mapping_contexts(&mut self) {
        *self.top_mut() = MappingContext::ALWAYS_ON;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::FrameInput;

    fn drain(map: &ActionMap, input: &FrameInput) -> Vec<Event> {
        let mut queue = EventQueue::default();
        map.generate_events(input, &mut queue);
        queue.take_current()
    }

    #[test]
    fn add_action_ignores_same_key_and_interaction() {
        let mut map = ActionMap::new();
        assert!(map.add_action(
            ActionType::Commit,
            Key::Enter,
            InteractionKind::Pressed,
            MappingContext::ALWAYS_ON
        ));
        assert!(!map.add_action(
            ActionType::Commit,
            Key::Enter,
            InteractionKind::Pressed,
            MappingContext::GAME
        ));
        assert!(map.add_action(
            ActionType::Commit,
            Key::Enter,
            InteractionKind::Released,
            MappingContext::ALWAYS_ON
        ));
        assert_eq!(map.bindings(ActionType::Commit).len(), 2);
        assert_eq!(
            map.bindings(ActionType::Commit)[0].contexts,
            MappingContext::ALWAYS_ON
        );
    }

    #[test]
    fn remove_action_by_key_and_wholesale() {
        let mut map = ActionMap::new();
        let ctx = MappingContext::GAME;
        map.add_action(ActionType::SelectUp, Key::ArrowUp, InteractionKind::Pressed, ctx);
        map.add_action(ActionType::SelectUp, Key::ArrowUp, InteractionKind::Repeated, ctx);
        map.add_action(ActionType::SelectUp, Key::W, InteractionKind::Pressed, ctx);

        map.remove_action(ActionType::SelectUp, Key::ArrowUp);
        assert_eq!(map.bindings(ActionType::SelectUp).len(), 1);
        assert_eq!(map.bindings(ActionType::SelectUp)[0].key, Key::W);

        map.remove_all_actions(ActionType::SelectUp);
        assert!(map.bindings(ActionType::SelectUp).is_empty());
        map.remove_action(ActionType::Cancel, Key::Escape);
    }

    #[test]
    fn generate_events_respects_context() {
        let mut map = ActionMap::new();
        map.add_action(
            ActionType::Number(Digit::D3),
            Key::Num3,
            InteractionKind::Pressed,
            MappingContext::GAME | MappingContext::EDITOR,
        );
        map.add_action(
            ActionType::Cancel,
            Key::Escape,
            InteractionKind::Pressed,
            MappingContext::ALWAYS_ON,
        );
        let input = FrameInput::new().press(Key::Num3).press(Key::Escape);

        assert_eq!(
            drain(&map, &input),
            vec![Event::Number(Digit::D3), Event::Cancel]
        );

        map.push_input_layer(MappingContext::LEVEL_SELECTION);
        assert_eq!(drain(&map, &input), vec![Event::Cancel]);

        map.pop_input_layer();
        map.set_current_mapping_context(MappingContext::POST_GAME);
        assert_eq!(drain(&map, &input), vec![Event::Cancel]);
    }

    #[test]
    fn context_stack_never_empties() {
        let mut map = ActionMap::new();
        map.pop_input_layer();
        map.pop_input_layer();
        assert_eq!(map.layer_count(), 1);
        assert_eq!(
            map.current_context(),
            MappingContext::ALWAYS_ON | MappingContext::GAME
        );

        map.push_input_layer(MappingContext::LEVEL_SELECTION);
        assert_eq!(map.layer_count(), 2);
        assert!(map.current_context().contains(MappingContext::ALWAYS_ON));
        map.pop_input_layer();
        assert_eq!(map.layer_count(), 1);
    }

    #[test]
    fn top_context_editing_keeps_always_on() {
        let mut map = ActionMap::new();
        map.remove_all_mapping_contexts();
        assert_eq!(map.current_context(), MappingContext::ALWAYS_ON);

        map.add_mapping_context(MappingContext::EDITOR);
        assert_eq!(
            map.current_context(),
            MappingContext::ALWAYS_ON | MappingContext::EDITOR
        );

        map.remove_mapping_context(MappingContext::EDITOR | MappingContext::ALWAYS_ON);
        assert_eq!(map.current_context(), MappingContext::ALWAYS_ON);

        map.set_current_mapping_context(MappingContext::GAME);
        assert_eq!(
            map.current_context(),
            MappingContext::ALWAYS_ON | MappingContext::GAME
        );
    }

    #[test]
    fn action_events_carry_payloads() {
        assert_eq!(
            action_event(ActionType::SelectUp),
            Event::ChangeSelection { dx: 0, dy: -1 }
        );
        assert_eq!(
            action_event(ActionType::Number(Digit::D7)),
            Event::Number(Digit::D7)
        );
        assert_eq!(
            action_event(ActionType::NumberMode),
            Event::ChangeGridState {
                alt: Some(false),
                edit: None
            }
        );
        assert_eq!(
            action_event(ActionType::EditorMode),
            Event::ChangeGridState {
                alt: None,
                edit: Some(true)
            }
        );
        assert_eq!(
            action_event(ActionType::ToggleLevelMenu),
            Event::ToggleLevelMenu { commit: false }
        );
    }
}
