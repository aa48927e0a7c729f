use parking_lot::Mutex;

/// User-facing success/error notifications.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);

    fn error(&self, message: &str);
}

/// Writes notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        tracing::info!(target: "referrals::notify", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::warn!(target: "referrals::notify", "{}", message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

/// Keeps every notification in order so tests can assert on them.
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

    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.notifications.lock())
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.notifications
            .lock()
            .push(Notification::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.notifications
            .lock()
            .push(Notification::Error(message.to_string()));
    }
}
