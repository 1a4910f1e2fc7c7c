//! Timed on-screen notifications.
//!
//! Every notification slides in, stays for its duration, fades out and is
//! then dropped. [`Notifications::update`] advances exactly one phase per
//! notification per call.

use futoshiki_game::{NotificationSink, Severity};

use crate::settings::NotificationSettings;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    severity: Severity,
    message: String,
    remaining: f32,
    fade_left: f32,
    slid: f32,
}

impl Notification {
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The notification list shown in the corner of the window.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    items: Vec<Notification>,
    settings: NotificationSettings,
}

impl Notifications {
    #[must_use]
    pub fn new(settings: NotificationSettings) -> Self {
        Self {
            items: vec![],
            settings,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Notifications from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    /// How far `item` has slid in, from 0 to 1.
    #[must_use]
    pub fn slide_fraction(&self, item: &Notification) -> f32 {
        ratio(item.slid, self.settings.slide_duration)
    }

    /// Remaining opacity of `item`, from 1 down to 0 while fading.
    #[must_use]
    pub fn fade_fraction(&self, item: &Notification) -> f32 {
        ratio(item.fade_left, self.settings.fade_duration)
    }

    /// Advances every notification by `dt` seconds and drops finished ones.
    pub fn update(&mut self, dt: f32) {
        let slide_duration = self.settings.slide_duration;
        self.items.retain_mut(|item| {
            if item.slid < slide_duration {
                item.slid = (item.slid + dt).min(slide_duration);
            } else if item.remaining > 0.0 {
                item.remaining -= dt;
            } else if item.fade_left > 0.0 {
                item.fade_left = (item.fade_left - dt).max(0.0);
            } else {
                return false;
            }
            true
        });
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

fn ratio(value: f32, total: f32) -> f32 {
    if total <= 0.0 {
        1.0
    } else {
        (value / total).clamp(0.0, 1.0)
    }
}

impl NotificationSink for Notifications {
    fn add_notification(&mut self, severity: Severity, message: String, duration: f32) {
        match severity {
            Severity::Info => log::info!("{message}"),
            Severity::Warning => log::warn!("{message}"),
            Severity::Error => log::error!("{message}"),
        }
        self.items.push(Notification {
            severity,
            message,
            remaining: duration,
            fade_left: self.settings.fade_duration,
            slid: 0.0,
        });
    }

    fn info(&mut self, message: impl Into<String>) {
        let duration = self.settings.duration;
        self.add_notification(Severity::Info, message.into(), duration);
    }

    fn warn(&mut self, message: impl Into<String>) {
        let duration = self.settings.duration;
        self.add_notification(Severity::Warning, message.into(), duration);
    }

    fn error(&mut self, message: impl Into<String>) {
        let duration = self.settings.duration;
        self.add_notification(Severity::Error, message.into(), duration);
    }
}
