//! User-visible notifications.

use tokio::sync::mpsc;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

/// Sending half of the notification channel.
///
/// Sends never fail: once the receiver is gone notifications only reach the
/// log.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl Notifier {
    /// Create a notifier and its receiving end.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Report a success.
    pub fn success(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!("{}", message);
        self.send(Level::Success, message);
    }

    /// Report a failure.
    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.send(Level::Error, message);
    }

    fn send(&self, level: Level, message: String) {
        let _ = self.tx.send(Notification { level, message });
    }
}
