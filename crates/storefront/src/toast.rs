//! Terminal toasts.
//!
//! The shell shows notifications after the command that raised them, so
//! [`ToastQueue`] holds them until the next render and mirrors each one to
//! the log.

use kruzhki_core::{Notification, Notifier, Severity};

/// Pending notifications waiting to be shown.
#[derive(Debug, Default)]
pub struct ToastQueue {
    pending: Vec<Notification>,
}

impl ToastQueue {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Take every pending toast, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, notification: Notification) {
        match notification.severity {
            Severity::Info => tracing::info!(
                title = %notification.title,
                description = %notification.description,
                "Toast"
            ),
            Severity::Destructive => tracing::warn!(
                title = %notification.title,
                description = %notification.description,
                "Toast"
            ),
        }
        self.pending.push(notification);
    }
}
