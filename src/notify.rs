use colored::*;
use log::debug;
use std::time::{Duration, Instant};

/// How long a notification stays up
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_secs(5);

pub const SUCCESS_MESSAGE: &str = "Belgeniz başarıyla oluşturuldu.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success => "Başarılı",
            Self::Error => "Hata",
        }
    }
}

/// A transient, self-dismissing message
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub raised_at: Instant,
    pub dismiss_after: Duration,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            raised_at: Instant::now(),
            dismiss_after: DEFAULT_DISMISS_AFTER,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }

    pub fn with_dismiss_after(mut self, dismiss_after: Duration) -> Self {
        self.dismiss_after = dismiss_after;
        self
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= self.dismiss_after
    }
}

/// Sink for user-facing notifications
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Notifications currently on screen
#[derive(Debug, Default)]
pub struct ToastBoard {
    toasts: Vec<Notification>,
}

impl ToastBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop expired notifications and return the rest
    pub fn active(&mut self, now: Instant) -> &[Notification] {
        self.toasts.retain(|toast| !toast.is_expired_at(now));
        &self.toasts
    }

    /// Every notification raised so far, expired or not
    pub fn all(&self) -> &[Notification] {
        &self.toasts
    }
}

impl Notifier for ToastBoard {
    fn notify(&mut self, notification: Notification) {
        self.toasts.push(notification);
    }
}

/// Prints notifications to stderr
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, notification: Notification) {
        debug!("{:?} notification: {}", notification.kind, notification.message);
        match notification.kind {
            NotificationKind::Success if !self.quiet => {
                eprintln!("{} {}: {}", "✅".green(), notification.kind.label().green().bold(), notification.message);
            }
            NotificationKind::Success => {}
            NotificationKind::Error => {
                eprintln!("{} {}: {}", "❌".red(), notification.kind.label().red().bold(), notification.message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dismiss_after_five_seconds() {
        let toast = Notification::success(SUCCESS_MESSAGE);
        assert_eq!(toast.dismiss_after, Duration::from_secs(5));
        assert!(!toast.is_expired_at(toast.raised_at + Duration::from_millis(4999)));
        assert!(toast.is_expired_at(toast.raised_at + Duration::from_secs(5)));
    }

    #[test]
    fn test_board_prunes_expired() {
        let mut board = ToastBoard::new();
        let start = Instant::now();
        board.notify(Notification::error("kısa").with_dismiss_after(Duration::from_secs(1)));
        board.notify(Notification::success("uzun"));

        assert_eq!(board.active(start).len(), 2);
        let remaining = board.active(start + Duration::from_secs(2));
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].message, "uzun");
        assert!(board.active(start + Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn test_labels() {
        assert_eq!(NotificationKind::Success.label(), "Başarılı");
        assert_eq!(NotificationKind::Error.label(), "Hata");
    }
}
