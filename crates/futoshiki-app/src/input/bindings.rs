use futoshiki_core::Digit;

use super::{ActionMap, ActionType, InteractionKind, Key, MappingContext};

/// Registers the game's default keyboard layout.
///
/// | keys            | action                 | contexts                       |
/// |-----------------|------------------------|--------------------------------|
/// | Enter / Escape  | commit / cancel        | always                         |
/// | arrows, WASD    | move selection         | game, editor (+ menu, repeats) |
/// | 1-9             | digit                  | game, editor                   |
/// | Ctrl            | alt mode while held    | game, editor                   |
/// | R               | reset board            | game, editor, post-game        |
/// | F               | save level             | editor                         |
/// | L               | level menu             | always                         |
/// | E / P           | editor / play mode     | see below                      |
pub fn install_default_bindings(map: &mut ActionMap) {
    use InteractionKind::{Pressed, Released, Repeated};

    let always = MappingContext::ALWAYS_ON;
    let game = MappingContext::GAME;
    let post_game = MappingContext::POST_GAME;
    let editor = MappingContext::EDITOR;
    let menu = MappingContext::LEVEL_SELECTION;
    let playing = game | editor;

    map.add_action(ActionType::Commit, Key::Enter, Pressed, always);
    map.add_action(ActionType::Cancel, Key::Escape, Pressed, always);

    for key in [Key::ArrowUp, Key::W] {
        map.add_action(ActionType::SelectUp, key, Pressed, playing | menu);
        map.add_action(ActionType::SelectUp, key, Repeated, menu);
    }
    for key in [Key::ArrowDown, Key::S] {
        map.add_action(ActionType::SelectDown, key, Pressed, playing | menu);
        map.add_action(ActionType::SelectDown, key, Repeated, menu);
    }
    for key in [Key::ArrowLeft, Key::A] {
        map.add_action(ActionType::SelectLeft, key, Pressed, playing);
        map.add_action(ActionType::SelectLeft, key, Repeated, menu);
    }
    for key in [Key::ArrowRight, Key::D] {
        map.add_action(ActionType::SelectRight, key, Pressed, playing);
        map.add_action(ActionType::SelectRight, key, Repeated, menu);
    }

    for digit in Digit::ALL {
        map.add_action(ActionType::Number(digit), Key::for_digit(digit), Pressed, playing);
    }

    map.add_action(ActionType::AltMode, Key::Control, Pressed, playing);
    map.add_action(ActionType::NumberMode, Key::Control, Released, playing);

    map.add_action(ActionType::BoardReset, Key::R, Pressed, playing | post_game);
    map.add_action(ActionType::SaveLevel, Key::F, Pressed, editor);
    map.add_action(ActionType::ToggleLevelMenu, Key::L, Pressed, always);
    map.add_action(ActionType::EditorMode, Key::E, Pressed, game | post_game | editor);
    map.add_action(ActionType::PlayMode, Key::P, Pressed, playing);
}
