//! Outbound channels of the grid engine.
//!
//! The grid never reaches for global state. Callers hand it a
//! [`NotificationSink`] for user-facing warnings and an [`EventSink`] for
//! semantic events that the router delivers on its next pass.

/// Default display duration of a notification, in seconds.
pub const DEFAULT_NOTIFICATION_DURATION: f32 = 1.5;

/// How prominently a notification is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Severity {
    /// Informational message.
    #[display("info")]
    Info,
    /// Recoverable problem caused by user input.
    #[display("warning")]
    Warning,
    /// Failed operation.
    #[display("error")]
    Error,
}

/// Receiver of fire-and-forget user notifications.
pub trait NotificationSink {
    /// Queues a notification shown for roughly `duration` seconds.
    fn add_notification(&mut self, severity: Severity, message: String, duration: f32);

    /// Queues an informational notification with the default duration.
    fn info(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.add_notification(Severity::Info, message.into(), DEFAULT_NOTIFICATION_DURATION);
    }

    /// Queues a warning with the default duration.
    fn warn(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.add_notification(Severity::Warning, message.into(), DEFAULT_NOTIFICATION_DURATION);
    }

    /// Queues an error with the default duration.
    fn error(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.add_notification(Severity::Error, message.into(), DEFAULT_NOTIFICATION_DURATION);
    }
}

/// Collects notifications as `(severity, message)` pairs.
impl NotificationSink for Vec<(Severity, String)> {
    fn add_notification(&mut self, severity: Severity, message: String, _duration: f32) {
        self.push((severity, message));
    }
}

/// Events raised by the grid for the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridEvent {
    /// The board was completed without violations.
    PlayerWon,
}

/// Receiver of [`GridEvent`]s.
pub trait EventSink {
    /// Queues an event for the next delivery pass.
    fn push_event(&mut self, event: GridEvent);
}

impl EventSink for Vec<GridEvent> {
    fn push_event(&mut self, event: GridEvent) {
        self.push(event);
    }
}
