//! Futoshiki desktop application.
//!
//! # Design Notes
//! - Game logic lives in [`Session`]; this type only feeds it keyboard input
//!   and elapsed time, then draws view models built from it.
//! - Settings persist through eframe storage. Command line options override
//!   them for the current run without being written back.

use std::path::PathBuf;

use eframe::{App, CreationContext, Frame, Storage, egui::Context};

use crate::{
    session::{Session, StartMode},
    settings::Settings,
    ui::{self, input::EguiInput},
    view_model_builder,
};

/// Longest frame time fed to the session, in seconds.
const MAX_FRAME_TIME: f32 = 0.1;

/// Command line overrides applied on top of the stored settings.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    pub levels_dir: Option<PathBuf>,
    pub start_mode: StartMode,
    pub wrap_around: Option<bool>,
}

impl StartupOptions {
    #[must_use]
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(dir) = &self.levels_dir {
            settings.levels_dir.clone_from(dir);
        }
        if let Some(wrap_around) = self.wrap_around {
            settings.browser.wrap_around = wrap_around;
        }
        settings
    }
}

#[derive(Debug)]
pub struct FutoshikiApp {
    session: Session,
    input: EguiInput,
    persisted: Settings,
}

impl FutoshikiApp {
    pub fn new(cc: &CreationContext<'_>, options: &StartupOptions) -> Self {
        let persisted: Settings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        let mut session = Session::with_fs_store(options.apply(persisted.clone()));
        session.start(options.start_mode);
        Self {
            session,
            input: EguiInput::default(),
            persisted,
        }
    }
}

impl App for FutoshikiApp {
    fn save(&mut self, storage: &mut dyn Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.persisted);
    }

    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        let (input, dt) = ctx.input(|i| {
            (
                self.input.frame_input(i),
                i.stable_dt.min(MAX_FRAME_TIME),
            )
        });
        self.session.tick(&input, dt);

        let vm = view_model_builder::build_game_screen_view_model(&self.session);
        ui::game_screen::show(ctx, &vm);

        if vm.is_animating() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_options_override_settings() {
        let options = StartupOptions {
            levels_dir: Some(PathBuf::from("/tmp/levels")),
            start_mode: StartMode::Editor,
            wrap_around: Some(false),
        };
        let settings = options.apply(Settings::default());
        assert_eq!(settings.levels_dir, PathBuf::from("/tmp/levels"));
        assert!(!settings.browser.wrap_around);
        assert_eq!(settings.notifications, Settings::default().notifications);
    }

    #[test]
    fn empty_options_keep_settings() {
        let settings = StartupOptions::default().apply(Settings::default());
        assert_eq!(settings, Settings::default());
    }
}
