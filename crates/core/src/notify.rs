//! Notification collaborator.
//!
//! The core announces what happened (an item went into the cart, an order
//! was placed, a form was incomplete) through a [`Notifier`]. How the
//! notification is shown is up to the implementation; the core never looks
//! at a result.

use serde::{Deserialize, Serialize};

/// How prominently a notification should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Info,
    /// Something the customer has to fix.
    Destructive,
}

/// A transient message for the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    #[must_use]
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Info,
        }
    }

    #[must_use]
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }
}

/// Receives notifications from the storefront.
pub trait Notifier {
    /// Display `notification` to the customer.
    fn notify(&mut self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn notify(&mut self, notification: Notification) {
        (**self).notify(notification);
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&mut self, notification: Notification) {
        (**self).notify(notification);
    }
}

/// A notifier that keeps every notification in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationLog {
    entries: Vec<Notification>,
}

impl NotificationLog {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Every notification received so far, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    /// The most recent notification.
    #[must_use]
    pub fn last(&self) -> Option<&Notification> {
        self.entries.last()
    }

    /// Take all pending notifications, leaving the log empty.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.entries)
    }
}

impl Notifier for NotificationLog {
    fn notify(&mut self, notification: Notification) {
        self.entries.push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_records_in_order() {
        let mut log = NotificationLog::new();
        log.notify(Notification::info("a", "first"));
        log.notify(Notification::destructive("b", "second"));
        assert_eq!(log.entries().len(), 2);
        assert_eq!(log.last().map(|n| n.severity), Some(Severity::Destructive));
    }

    #[test]
    fn test_drain_empties_log() {
        let mut log = NotificationLog::new();
        log.notify(Notification::info("a", "b"));
        let drained = log.drain();
        assert_eq!(drained.len(), 1);
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_notify_through_mut_ref() {
        let mut log = NotificationLog::new();
        {
            let mut by_ref = &mut log;
            Notifier::notify(&mut by_ref, Notification::info("a", "b"));
        }
        assert_eq!(log.entries().len(), 1);
    }
}
