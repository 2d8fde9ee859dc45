//! User-facing notifications (toasts).

use log::{info, warn};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Error,
}

/// Fire-and-forget message sink for short user-facing messages.
pub trait Notifier {
    fn notify(&mut self, message: &str, level: Level);
}

/// Default notifier that routes messages through the `log` facade.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, message: &str, level: Level) {
        match level {
            Level::Error => warn!("{message}"),
            Level::Info | Level::Success => info!("{message}"),
        }
    }
}
