//! Collaborators the data layer talks to but does not own: the session
//! provider, navigation, and the notification surface.

use parking_lot::Mutex;

/// Session status as reported by the authentication provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthState {
    pub is_authenticated: bool,
    /// True while the provider is still resolving the session.
    pub loading: bool,
}

impl AuthState {
    /// Session not yet known.
    pub fn resolving() -> Self {
        Self {
            is_authenticated: false,
            loading: true,
        }
    }

    pub fn authenticated() -> Self {
        Self {
            is_authenticated: true,
            loading: false,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            is_authenticated: false,
            loading: false,
        }
    }
}

/// Redirect primitive.
pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Fire-and-forget toast surface.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Navigator that only remembers where it was sent.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    redirects: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().clone()
    }

    pub fn last_redirect(&self) -> Option<String> {
        self.redirects.lock().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) {
        self.redirects.lock().push(path.to_string());
    }
}

/// Notifier that keeps every notification in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().clone()
    }

    pub fn count(&self, level: NotificationLevel) -> usize {
        self.notifications
            .lock()
            .iter()
            .filter(|n| n.level == level)
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().push(notification);
    }
}
