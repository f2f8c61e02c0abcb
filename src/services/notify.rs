//! Notification service: short advisory messages for every mutation outcome.
//!
//! DESIGN
//! ======
//! Notifications are fire-and-forget. `ToastLog` logs each one and keeps a
//! bounded backlog that the HTTP layer drains into its responses; nothing
//! depends on a toast being seen.

#[cfg(test)]
#[path = "notify_test.rs"]
mod tests;

use std::collections::VecDeque;
use std::sync::Mutex;

use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: ToastLevel::Success, message: message.into() }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { level: ToastLevel::Error, message: message.into() }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Logs toasts and keeps the most recent `capacity` for the browser.
pub struct ToastLog {
    capacity: usize,
    pending: Mutex<VecDeque<Toast>>,
}

impl ToastLog {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { capacity: capacity.max(1), pending: Mutex::new(VecDeque::new()) }
    }

    /// Take all pending toasts, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Toast> {
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        pending.drain(..).collect()
    }
}

impl Notifier for ToastLog {
    fn notify(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Success => info!(message = %toast.message, "toast"),
            ToastLevel::Error => warn!(message = %toast.message, "toast"),
        }
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if pending.len() == self.capacity {
            pending.pop_front();
        }
        pending.push_back(toast);
    }
}
