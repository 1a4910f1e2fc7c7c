//! Level browser.
//!
//! Lists the levels of a [`LevelStore`], lets the player pick one from a
//! sliding menu and hands the parsed [`LevelData`] back to the caller. The
//! browser owns no grid; it talks to the rest of the game only through
//! events pushed onto the [`EventQueue`].

use std::io;

use futoshiki_core::{LevelData, LevelParseError};

pub use self::store::{FsLevelStore, LEVEL_EXTENSION, LevelStore, MemoryLevelStore, level_name};
use crate::{
    event::{Event, EventQueue, HandleResult, LayerOp},
    input::MappingContext,
    settings::BrowserSettings,
};

mod store;

/// Visibility of the level menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum BrowserState {
    #[default]
    Closed,
    /// Sliding in. Input is already accepted.
    Opening,
    Open,
    /// Sliding out. Input is no longer accepted.
    Closing,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum BrowserError {
    #[display("level index {index} is out of range ({count} levels)")]
    IndexOutOfRange { index: usize, count: usize },
    #[display("no level has been loaded yet")]
    NoLevelLoaded,
    #[display("cannot list levels: {source}")]
    Listing { source: io::Error },
    #[display("cannot access {name}: {source}")]
    Io {
        #[error(not(source))]
        name: String,
        source: io::Error,
    },
    #[display("{name} is malformed: {source}")]
    Parse {
        #[error(not(source))]
        name: String,
        source: LevelParseError,
    },
    #[display("Error: Level Data has invalid grid size.")]
    EmptyGrid {
        #[error(not(source))]
        name: String,
    },
}

/// The level menu and the bookkeeping of which level is loaded.
#[derive(Debug)]
pub struct LevelBrowser {
    store: Box<dyn LevelStore>,
    names: Vec<String>,
    selected: usize,
    state: BrowserState,
    slide: f32,
    last_loaded: Option<String>,
    settings: BrowserSettings,
}

impl LevelBrowser {
    pub fn new(store: Box<dyn LevelStore>, settings: BrowserSettings) -> Self {
        Self {
            store,
            names: vec![],
            selected: 0,
            state: BrowserState::Closed,
            slide: 0.0,
            last_loaded: None,
            settings,
        }
    }

    /// Re-reads the level listing from the store.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::Listing`] if the store cannot be enumerated;
    /// the listing is then empty.
    pub fn load_level_names(&mut self) -> Result<(), BrowserError> {
        match self.store.list() {
            Ok(names) => self.names = names,
            Err(source) => {
                self.names.clear();
                return Err(BrowserError::Listing { source });
            }
        }
        self.selected = self.selected.min(self.names.len().saturating_sub(1));
        log::debug!("found {} levels", self.names.len());
        Ok(())
    }

    #[must_use]
    pub fn has_levels(&self) -> bool {
        !self.names.is_empty()
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn state(&self) -> BrowserState {
        self.state
    }

    /// The menu accepts navigation input.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, BrowserState::Opening | BrowserState::Open)
    }

    /// Name of the level most recently parsed or saved.
    #[must_use]
    pub fn last_loaded_name(&self) -> Option<&str> {
        self.last_loaded.as_deref()
    }

    #[must_use]
    pub fn settings(&self) -> &BrowserSettings {
        &self.settings
    }

    /// Slide progress from 0 (hidden) to 1 (fully shown), before easing.
    #[must_use]
    pub fn slide_fraction(&self) -> f32 {
        if self.settings.slide_time <= 0.0 {
            return if self.state.is_closed() { 0.0 } else { 1.0 };
        }
        (self.slide / self.settings.slide_time).clamp(0.0, 1.0)
    }

    /// Opens the menu and activates the level-selection input context.
    pub fn show_menu(&mut self, events: &mut EventQueue) {
        self.slide = 0.0;
        self.state = BrowserState::Opening;
        events.push(Event::InputLayer(LayerOp::Push(MappingContext::LEVEL_SELECTION)));
    }

    /// Closes the menu, requesting the selected level if `commit` is set.
    pub fn close(&mut self, commit: bool, events: &mut EventQueue) {
        events.push(Event::InputLayer(LayerOp::Pop));
        if commit {
            events.push(Event::SelectLevel(self.selected));
        }
        self.state = BrowserState::Closing;
    }

    /// Offers `event` to the open menu.
    pub fn handle_event(&mut self, event: &Event, events: &mut EventQueue) -> HandleResult {
        if !self.is_open() {
            return HandleResult::NotHandled;
        }
        match *event {
            Event::ChangeSelection { dy, .. } => {
                if !self.names.is_empty() {
                    self.selected =
                        step_index(self.selected, dy, self.names.len(), self.settings.wrap_around);
                }
                HandleResult::Handled
            }
            Event::Commit => {
                events.push(Event::ToggleLevelMenu { commit: true });
                HandleResult::Handled
            }
            Event::Cancel => {
                events.push(Event::ToggleLevelMenu { commit: false });
                HandleResult::Handled
            }
            _ => HandleResult::NotHandled,
        }
    }

    /// Advances the slide animation by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let slide_time = self.settings.slide_time.max(0.0);
        match self.state {
            BrowserState::Opening => {
                self.slide += dt;
                if self.slide >= slide_time {
                    self.slide = slide_time;
                    self.state = BrowserState::Open;
                }
            }
            BrowserState::Closing => {
                self.slide -= dt;
                if self.slide <= 0.0 {
                    self.slide = 0.0;
                    self.state = BrowserState::Closed;
                }
            }
            BrowserState::Open | BrowserState::Closed => {}
        }
    }

    /// Reads and parses the level at `index` of the listing.
    ///
    /// The level counts as loaded even when parsing fails, so a later
    /// overwrite targets it.
    ///
    /// # Errors
    ///
    /// Fails if the index is out of range, the level cannot be read or
    /// parsed, or it declares a grid size of zero.
    pub fn parse_level(&mut self, index: usize) -> Result<LevelData, BrowserError> {
        let name = self
            .names
            .get(index)
            .cloned()
            .ok_or(BrowserError::IndexOutOfRange {
                index,
                count: self.names.len(),
            })?;
        self.last_loaded = Some(name.clone());
        self.read_level(name)
    }

    /// Parses the most recently loaded level again.
    ///
    /// # Errors
    ///
    /// Fails with [`BrowserError::NoLevelLoaded`] if nothing was loaded, and
    /// otherwise like [`parse_level`](Self::parse_level).
    pub fn reload_last_level(&self) -> Result<LevelData, BrowserError> {
        let name = self.last_loaded.clone().ok_or(BrowserError::NoLevelLoaded)?;
        self.read_level(name)
    }

    fn read_level(&self, name: String) -> Result<LevelData, BrowserError> {
        let text = match self.store.read(&name) {
            Ok(text) => text,
            Err(source) => return Err(BrowserError::Io { name, source }),
        };
        let level: LevelData = match text.parse() {
            Ok(level) => level,
            Err(source) => return Err(BrowserError::Parse { name, source }),
        };
        if !level.has_grid() {
            return Err(BrowserError::EmptyGrid { name });
        }
        log::info!("parsed {name} ({0}x{0})", level.grid_size);
        Ok(level)
    }

    /// Writes `level` to the store and returns the name it was saved under.
    ///
    /// With `overwrite` the last loaded level is replaced; without it, or
    /// when nothing has been loaded, the level is appended as the next
    /// `LevelNNN` and the listing is refreshed.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::Io`] if the store rejects the write.
    pub fn save_level(&mut self, level: &LevelData, overwrite: bool) -> Result<String, BrowserError> {
        let target = match (&self.last_loaded, overwrite) {
            (Some(name), true) => Some(name.clone()),
            _ => None,
        };
        let overwrite = target.is_some();
        let name = target.unwrap_or_else(|| level_name(self.names.len() + 1));

        let written = self.store.write(&name, &level.to_string());
        if written.is_ok() {
            log::info!("saved {name}");
            self.last_loaded = Some(name.clone());
        }
        if !overwrite && let Err(e) = self.load_level_names() {
            log::warn!("{e}");
        }
        written
            .map(|()| name.clone())
            .map_err(|source| BrowserError::Io { name, source })
    }
}

fn step_index(index: usize, delta: i32, len: usize, wrap: bool) -> usize {
    let step = usize::try_from(delta.unsigned_abs()).unwrap_or(usize::MAX);
    if wrap {
        let step = step % len;
        if delta < 0 {
            (index + len - step) % len
        } else {
            (index + step) % len
        }
    } else if delta < 0 {
        index.saturating_sub(step)
    } else {
        index.saturating_add(step).min(len - 1)
    }
}
