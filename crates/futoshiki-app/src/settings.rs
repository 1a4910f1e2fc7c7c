use std::path::PathBuf;

use futoshiki_game::{DEFAULT_NOTIFICATION_DURATION, ResizePolicy};
use serde::{Deserialize, Serialize};

/// User-adjustable settings, persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory scanned for `*.data` level files.
    pub levels_dir: PathBuf,
    pub browser: BrowserSettings,
    pub editor: EditorSettings,
    pub notifications: NotificationSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            levels_dir: PathBuf::from("./data/"),
            browser: BrowserSettings::default(),
            editor: EditorSettings::default(),
            notifications: NotificationSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Moving past either end of the list jumps to the other end.
    pub wrap_around: bool,
    /// Duration of the slide-in/out animation, in seconds.
    pub slide_time: f32,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            wrap_around: true,
            slide_time: 0.5,
        }
    }
}

/// Serializable mirror of [`ResizePolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResizeMode {
    Discard,
    #[default]
    RetainLocked,
}

impl From<ResizeMode> for ResizePolicy {
    fn from(mode: ResizeMode) -> Self {
        match mode {
            ResizeMode::Discard => Self::Discard,
            ResizeMode::RetainLocked => Self::RetainLocked,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// What happens to locked cells when the editor resizes the grid.
    pub resize_policy: ResizeMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    /// How long a notification stays fully visible, in seconds.
    pub duration: f32,
    pub fade_duration: f32,
    pub slide_duration: f32,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            duration: DEFAULT_NOTIFICATION_DURATION,
            fade_duration: 0.5,
            slide_duration: 0.2,
        }
    }
}
