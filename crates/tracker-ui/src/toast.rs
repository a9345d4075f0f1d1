//! Toast notifications
//!
//! Success, info and error messages for the user. The queue doubles as
//! the [`ErrorReporter`] handed to the fetch clients, so backend errors land
//! here as error toasts.

use parking_lot::Mutex;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use tracker_client::ErrorReporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Pending toasts, oldest first
#[derive(Debug, Default)]
pub struct ToastQueue {
    next_id: AtomicU64,
    toasts: Mutex<VecDeque<Toast>>,
}

impl ToastQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, kind: ToastKind, message: &str) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(id, ?kind, "toast");
        self.toasts.lock().push_back(Toast {
            id,
            kind,
            message: message.to_string(),
        });
        id
    }

    pub fn success(&self, message: &str) -> u64 {
        self.push(ToastKind::Success, message)
    }

    pub fn info(&self, message: &str) -> u64 {
        self.push(ToastKind::Info, message)
    }

    pub fn error(&self, message: &str) -> u64 {
        self.push(ToastKind::Error, message)
    }

    /// Remove one toast; returns whether it was still showing
    pub fn dismiss(&self, id: u64) -> bool {
        let mut toasts = self.toasts.lock();
        let before = toasts.len();
        toasts.retain(|toast| toast.id != id);
        toasts.len() != before
    }

    /// Current toasts without removing them
    #[must_use]
    pub fn snapshot(&self) -> Vec<Toast> {
        self.toasts.lock().iter().cloned().collect()
    }

    /// Take every pending toast
    pub fn drain(&self) -> Vec<Toast> {
        self.toasts.lock().drain(..).collect()
    }

    /// Most recent toast, if any
    #[must_use]
    pub fn latest(&self) -> Option<Toast> {
        self.toasts.lock().back().cloned()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.lock().is_empty()
    }
}

impl ErrorReporter for ToastQueue {
    fn report_error(&self, message: &str) {
        self.error(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_and_order() {
        let queue = ToastQueue::new();
        queue.success("saved");
        queue.report_error("boom");

        let toasts = queue.snapshot();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].kind, ToastKind::Success);
        assert_eq!(toasts[1].kind, ToastKind::Error);
        assert_eq!(toasts[1].message, "boom");
    }

    #[test]
    fn dismiss_removes_one() {
        let queue = ToastQueue::new();
        let first = queue.info("one");
        queue.info("two");

        assert!(queue.dismiss(first));
        assert!(!queue.dismiss(first));
        assert_eq!(queue.latest().unwrap().message, "two");
        assert_eq!(queue.drain().len(), 1);
        assert!(queue.is_empty());
    }
}
