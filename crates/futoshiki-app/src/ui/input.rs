//! Translates egui keyboard state into a [`FrameInput`].

use eframe::egui::{self, InputState};

use crate::input::{FrameInput, Key};

#[must_use]
pub(crate) fn map_key(key: egui::Key) -> Option<Key> {
    let key = match key {
        egui::Key::Enter => Key::Enter,
        egui::Key::Escape => Key::Escape,
        egui::Key::ArrowUp => Key::ArrowUp,
        egui::Key::ArrowDown => Key::ArrowDown,
        egui::Key::ArrowLeft => Key::ArrowLeft,
        egui::Key::ArrowRight => Key::ArrowRight,
        egui::Key::W => Key::W,
        egui::Key::A => Key::A,
        egui::Key::S => Key::S,
        egui::Key::D => Key::D,
        egui::Key::R => Key::R,
        egui::Key::F => Key::F,
        egui::Key::L => Key::L,
        egui::Key::E => Key::E,
        egui::Key::P => Key::P,
        egui::Key::Num1 => Key::Num1,
        egui::Key::Num2 => Key::Num2,
        egui::Key::Num3 => Key::Num3,
        egui::Key::Num4 => Key::Num4,
        egui::Key::Num5 => Key::Num5,
        egui::Key::Num6 => Key::Num6,
        egui::Key::Num7 => Key::Num7,
        egui::Key::Num8 => Key::Num8,
        egui::Key::Num9 => Key::Num9,
        _ => return None,
    };
    Some(key)
}

/// Frame-to-frame keyboard adapter.
///
/// egui reports modifiers as state rather than key events, so control
/// press and release edges are derived from the modifier transition.
#[derive(Debug, Clone, Default)]
pub(crate) struct EguiInput {
    ctrl_was_down: bool,
}

impl EguiInput {
    pub(crate) fn frame_input(&mut self, i: &InputState) -> FrameInput {
        let mut input = FrameInput::new();
        for event in &i.events {
            if let egui::Event::Key {
                key,
                pressed,
                repeat,
                ..
            } = *event
                && let Some(key) = map_key(key)
            {
                input = match (pressed, repeat) {
                    (true, false) => input.press(key),
                    (true, true) => input.repeat(key),
                    (false, _) => input.release(key),
                };
            }
        }
        for &key in &i.keys_down {
            if let Some(key) = map_key(key) {
                input = input.hold(key);
            }
        }
        self.apply_ctrl(input, i.modifiers.ctrl)
    }

    fn apply_ctrl(&mut self, input: FrameInput, ctrl_down: bool) -> FrameInput {
        let was_down = std::mem::replace(&mut self.ctrl_was_down, ctrl_down);
        match (was_down, ctrl_down) {
            (false, true) => input.press(Key::Control),
            (true, true) => input.hold(Key::Control),
            (true, false) => input.release(Key::Control),
            (false, false) => input,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::input::InputSource as _;

    use super::*;

    #[test]
    fn maps_bound_keys_only() {
        assert_eq!(map_key(egui::Key::Num7), Some(Key::Num7));
        assert_eq!(map_key(egui::Key::ArrowLeft), Some(Key::ArrowLeft));
        assert_eq!(map_key(egui::Key::Q), None);
    }

    #[test]
    fn ctrl_transitions_become_edges() {
        let mut adapter = EguiInput::default();

        let input = adapter.apply_ctrl(FrameInput::new(), true);
        assert!(input.is_pressed(Key::Control));

        let input = adapter.apply_ctrl(FrameInput::new(), true);
        assert!(!input.is_pressed(Key::Control));
        assert!(input.is_down(Key::Control));

        let input = adapter.apply_ctrl(FrameInput::new(), false);
        assert!(input.is_released(Key::Control));

        let input = adapter.apply_ctrl(FrameInput::new(), false);
        assert!(input.is_empty());
    }

    #[test]
    fn key_events_become_edges() {
        let mut adapter = EguiInput::default();
        let mut state = InputState::default();
        state.events.push(egui::Event::Key {
            key: egui::Key::Enter,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        });
        state.events.push(egui::Event::Key {
            key: egui::Key::W,
            physical_key: None,
            pressed: true,
            repeat: true,
            modifiers: egui::Modifiers::NONE,
        });
        let input = adapter.frame_input(&state);
        assert!(input.is_pressed(Key::Enter));
        assert!(input.is_repeated(Key::W));
        assert!(!input.is_pressed(Key::W));
    }
}
