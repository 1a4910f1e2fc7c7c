//! Game session: owns every subsystem and routes events between them.
//!
//! One [`Session::tick`] per frame:
//!
//! 1. the action map turns the frame's input into events,
//! 2. the queue is drained: each event is offered to the level browser and,
//!    if it was not handled, dispatched by kind,
//! 3. the grid validates itself, possibly raising a win,
//! 4. the queue is drained again,
//! 5. animations advance by the elapsed time.
//!
//! Events raised while a pass is delivered are deferred to the next pass of
//! the same tick, so all cascades settle before the frame is drawn.

use futoshiki_core::Digit;
use futoshiki_game::{Grid, NotificationSink as _, ResizePolicy};

use crate::{
    browser::{BrowserError, FsLevelStore, LevelBrowser, LevelStore},
    event::{Event, EventQueue, LayerOp},
    input::{ActionMap, InputSource, MappingContext, install_default_bindings},
    notifications::Notifications,
    settings::Settings,
};

/// Upper bound on delivery passes per drain.
///
/// No event chain of the game is longer than a handful of passes; hitting the
/// bound means two handlers keep re-raising each other.
pub const MAX_EVENT_PASSES: usize = 16;

/// How the first tick sets the game up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartMode {
    /// Open the level menu, or the editor if there are no levels.
    #[default]
    Auto,
    /// Go straight to the editor with an empty board.
    Editor,
}

#[derive(Debug)]
pub struct Session {
    action_map: ActionMap,
    grid: Grid,
    browser: LevelBrowser,
    notifications: Notifications,
    events: EventQueue,
    settings: Settings,
}

impl Session {
    pub fn new(settings: Settings, store: Box<dyn LevelStore>) -> Self {
        let mut action_map = ActionMap::new();
        install_default_bindings(&mut action_map);
        Self {
            action_map,
            grid: Grid::new(),
            browser: LevelBrowser::new(store, settings.browser),
            notifications: Notifications::new(settings.notifications),
            events: EventQueue::default(),
            settings,
        }
    }

    /// Creates a session reading levels from [`Settings::levels_dir`].
    #[must_use]
    pub fn with_fs_store(settings: Settings) -> Self {
        let store = FsLevelStore::new(&settings.levels_dir);
        Self::new(settings, Box::new(store))
    }

    /// Lists the levels and queues the opening events.
    pub fn start(&mut self, mode: StartMode) {
        if let Err(e) = self.browser.load_level_names() {
            self.notifications.error(e.to_string());
        }
        log::info!(
            "starting with {} levels in {}",
            self.browser.names().len(),
            self.settings.levels_dir.display()
        );

        match mode {
            StartMode::Auto if self.browser.has_levels() => {
                self.events.push(Event::ToggleLevelMenu { commit: false });
            }
            StartMode::Auto => {
                self.notifications.info("No levels were found. Starting Editor!");
                self.start_editor();
            }
            StartMode::Editor => self.start_editor(),
        }
    }

    /// Runs one frame of game logic.
    pub fn tick(&mut self, input: &impl InputSource, dt: f32) {
        self.action_map.generate_events(input, &mut self.events);
        self.drain_events();

        self.grid.check_constraints(&mut self.events);
        self.drain_events();

        self.browser.update(dt);
        self.notifications.update(dt);
    }

    /// Queues an event for the next tick's delivery.
    pub fn push_event(&mut self, event: Event) {
        self.events.push(event);
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn browser(&self) -> &LevelBrowser {
        &self.browser
    }

    #[must_use]
    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    #[must_use]
    pub fn action_map(&self) -> &ActionMap {
        &self.action_map
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn start_editor(&mut self) {
        self.grid.new_board();
        self.events.push(edit_mode_event(true));
    }

    fn drain_events(&mut self) {
        for _ in 0..MAX_EVENT_PASSES {
            for event in self.events.take_current() {
                self.route(event);
            }
            if !self.events.promote() {
                return;
            }
        }
        log::warn!(
            "dropping {} events still pending after {MAX_EVENT_PASSES} passes",
            self.events.len()
        );
        self.events.clear();
    }

    fn route(&mut self, event: Event) {
        log::trace!("routing {event:?}");
        if self.browser.handle_event(&event, &mut self.events).is_handled() {
            return;
        }

        match event {
            Event::InputLayer(LayerOp::Push(context)) => self.action_map.push_input_layer(context),
            Event::InputLayer(LayerOp::Pop) => self.action_map.pop_input_layer(),
            Event::BoardReset => self.reset_board(),
            Event::PlayerWon => {
                log::info!("level solved");
                self.action_map
                    .set_current_mapping_context(MappingContext::POST_GAME);
            }
            Event::ChangeSelection { dx, dy } => {
                self.grid.on_change_selection(dx, dy, &mut self.notifications);
            }
            Event::Number(digit) => self.handle_number(digit),
            Event::ChangeGridState { alt, edit } => {
                if let Some(alt) = alt {
                    self.grid.set_alt_mode(alt);
                }
                if let Some(edit) = edit {
                    self.grid.set_edit_mode(edit);
                    self.action_map.set_current_mapping_context(if edit {
                        MappingContext::EDITOR
                    } else {
                        MappingContext::GAME
                    });
                }
            }
            Event::ToggleLevelMenu { commit } => {
                if self.browser.is_open() {
                    self.browser.close(commit, &mut self.events);
                    if !commit && !self.grid.has_valid_data() {
                        self.start_editor();
                    }
                } else {
                    self.browser.show_menu(&mut self.events);
                }
            }
            Event::SaveLevel => self.save_level(),
            Event::SelectLevel(index) => self.select_level(index),
            Event::Cancel => {
                if self.grid.state().edit_mode {
                    self.events.push(edit_mode_event(false));
                }
            }
            Event::Commit => {}
        }
    }

    fn handle_number(&mut self, digit: Digit) {
        let policy = ResizePolicy::from(self.settings.editor.resize_policy);
        self.grid
            .on_handle_number(digit, policy, &mut self.notifications);
    }

    fn reset_board(&mut self) {
        let state = self.grid.state();
        if !state.edit_mode {
            self.grid.reset();
            self.action_map
                .set_current_mapping_context(MappingContext::GAME);
            return;
        }
        if state.alt_mode {
            self.grid.new_board();
            return;
        }

        let level = match self.browser.reload_last_level() {
            Ok(level) => level,
            Err(BrowserError::NoLevelLoaded) => {
                self.grid.new_board();
                return;
            }
            Err(e) => {
                self.notifications.error(e.to_string());
                return;
            }
        };
        match self.grid.load_level(&level) {
            Ok(()) => log::info!(
                "reloaded {}",
                self.browser.last_loaded_name().unwrap_or_default()
            ),
            Err(e) => self.notifications.error(format!("Error: {e}")),
        }
    }

    fn save_level(&mut self) {
        let level = self.grid.to_level_data();
        let overwrite = self.grid.state().alt_mode;
        match self.browser.save_level(&level, overwrite) {
            Ok(name) => self.notifications.info(format!("{name} saved successfully!")),
            Err(e) => {
                log::error!("{e}");
                self.notifications.error("Something went wrong");
            }
        }
    }

    fn select_level(&mut self, index: usize) {
        let level = match self.browser.parse_level(index) {
            Ok(level) => level,
            Err(e @ BrowserError::IndexOutOfRange { .. }) => {
                log::warn!("{e}");
                self.start_editor();
                return;
            }
            Err(e) => {
                self.notifications.error(e.to_string());
                self.start_editor();
                return;
            }
        };
        if let Err(e) = self.grid.load_level(&level) {
            self.notifications.error(format!("Error: {e}"));
            self.start_editor();
            return;
        }

        log::info!(
            "loaded {}",
            self.browser.last_loaded_name().unwrap_or_default()
        );
        self.action_map
            .set_current_mapping_context(MappingContext::GAME);
        self.events.push(edit_mode_event(false));
    }
}

fn edit_mode_event(edit: bool) -> Event {
    Event::ChangeGridState {
        alt: None,
        edit: Some(edit),
    }
}
