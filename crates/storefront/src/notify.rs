//! User-facing notifications ("toasts").
//!
//! The client and stores report outcomes through a [`Notifier`]. A terminal
//! front end logs them; tests record them with [`MemoryNotifier`].

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{error, info, warn};

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastLevel {
    Success,
    Warning,
    Error,
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    /// Show a notification.
    fn notify(&self, level: ToastLevel, message: &str);

    fn success(&self, message: &str) {
        self.notify(ToastLevel::Success, message);
    }

    fn warning(&self, message: &str) {
        self.notify(ToastLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.notify(ToastLevel::Error, message);
    }
}

/// Emits toasts as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: ToastLevel, message: &str) {
        match level {
            ToastLevel::Success => info!(target: "tomato_storefront::toast", "{message}"),
            ToastLevel::Warning => warn!(target: "tomato_storefront::toast", "{message}"),
            ToastLevel::Error => error!(target: "tomato_storefront::toast", "{message}"),
        }
    }
}

/// Records every toast in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    toasts: Arc<Mutex<Vec<Toast>>>,
}

impl MemoryNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All toasts shown so far, oldest first.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().clone()
    }

    /// Messages of the given level, oldest first.
    #[must_use]
    pub fn messages(&self, level: ToastLevel) -> Vec<String> {
        self.toasts
            .lock()
            .iter()
            .filter(|t| t.level == level)
            .map(|t| t.message.clone())
            .collect()
    }

    /// Whether a toast with this exact message was shown.
    #[must_use]
    pub fn contains(&self, message: &str) -> bool {
        self.toasts.lock().iter().any(|t| t.message == message)
    }

    pub fn clear(&self) {
        self.toasts.lock().clear();
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, level: ToastLevel, message: &str) {
        self.toasts.lock().push(Toast {
            level,
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_notifier_records_in_order() {
        let notifier = MemoryNotifier::new();
        notifier.success("登录成功");
        notifier.error("密码不正确");

        let toasts = notifier.toasts();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts.first().map(|t| t.level), Some(ToastLevel::Success));
        assert_eq!(notifier.messages(ToastLevel::Error), vec!["密码不正确"]);
        assert!(notifier.contains("登录成功"));

        notifier.clear();
        assert!(notifier.toasts().is_empty());
    }

    #[test]
    fn test_clones_share_history() {
        let notifier = MemoryNotifier::new();
        let handle = notifier.clone();
        handle.warning("操作过于频繁");
        assert!(notifier.contains("操作过于频繁"));
    }
}
