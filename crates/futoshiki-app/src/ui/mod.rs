//! egui front end. Everything here is drawn from view models built by
//! [`crate::view_model_builder`] and never mutates the session.

pub(crate) mod browser;
pub(crate) mod easing;
pub(crate) mod game_screen;
pub(crate) mod grid;
pub(crate) mod grid_theme;
pub(crate) mod input;
pub(crate) mod layout;
pub(crate) mod notifications;
pub(crate) mod status_line;
