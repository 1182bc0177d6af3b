//! Collaborators for a one-shot terminal session.

use parking_lot::Mutex;

use crate::data::{Navigator, Notification, NotificationLevel, Notifier};

/// Remembers the redirect target. The command decides how to report it.
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    target: Mutex<Option<String>>,
}

impl TerminalNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<String> {
        self.target.lock().clone()
    }
}

impl Navigator for TerminalNavigator {
    fn redirect(&self, path: &str) {
        tracing::warn!(path, "Redirect requested");
        *self.target.lock() = Some(path.to_string());
    }
}

/// Prints notifications: success to stdout, errors to stderr.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => println!("✓ {}", notification.message),
            NotificationLevel::Error => eprintln!("✗ {}", notification.message),
        }
    }
}
