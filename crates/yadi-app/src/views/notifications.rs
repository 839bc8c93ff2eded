//! Toast notifications.

use futures_signals::signal::{Mutable, Signal};
use serde::{Deserialize, Serialize};

/// Toast severity, used by frontends to pick styling and timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToastLevel {
    /// Informational, auto-dismisses.
    Info,
    /// A completed action.
    Success,
    /// Something transient went wrong.
    Warning,
    /// An action failed.
    Error,
}

/// A single toast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    /// Severity.
    pub level: ToastLevel,
    /// Message shown to the user.
    pub message: String,
}

/// Pending toasts, oldest first.
#[derive(Clone, Default)]
pub struct Notifications {
    toasts: Mutable<Vec<Toast>>,
}

impl Notifications {
    /// Queue a toast.
    pub fn push(&self, level: ToastLevel, message: impl Into<String>) {
        self.toasts.lock_mut().push(Toast {
            level,
            message: message.into(),
        });
    }

    /// Queue a success toast.
    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message);
    }

    /// Queue an error toast.
    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message);
    }

    /// Drop the oldest toast (called by the frontend when it expires).
    pub fn dismiss_oldest(&self) {
        let mut toasts = self.toasts.lock_mut();
        if !toasts.is_empty() {
            toasts.remove(0);
        }
    }

    /// Drop everything.
    pub fn clear(&self) {
        self.toasts.lock_mut().clear();
    }

    /// Snapshot of the pending toasts.
    #[must_use]
    pub fn current(&self) -> Vec<Toast> {
        self.toasts.get_cloned()
    }

    /// Reactive subscription surface.
    pub fn signal(&self) -> impl Signal<Item = Vec<Toast>> {
        self.toasts.signal_cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_queue_in_order() {
        let notifications = Notifications::default();
        notifications.success("Transfer completed successfully!");
        notifications.error("Transaction Failed");

        let toasts = notifications.current();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].level, ToastLevel::Success);
        assert_eq!(toasts[1].level, ToastLevel::Error);

        notifications.dismiss_oldest();
        assert_eq!(notifications.current()[0].message, "Transaction Failed");
    }

    #[test]
    fn dismiss_on_empty_is_a_noop() {
        let notifications = Notifications::default();
        notifications.dismiss_oldest();
        assert!(notifications.current().is_empty());
    }
}
