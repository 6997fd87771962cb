//! Toast queue: Implementation of Notifier for the TUI.
//!
//! Notifications are kept with their arrival time and expire on their own;
//! the render loop only ever reads the live ones.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::ports::{Notification, NotificationLevel, Notifier};

/// How long a success toast stays visible.
pub const SUCCESS_TTL: Duration = Duration::from_secs(2);

/// How long an error toast stays visible.
pub const ERROR_TTL: Duration = Duration::from_secs(4);

/// Upper bound on queued toasts; the oldest are dropped first.
const MAX_TOASTS: usize = 5;

/// A notification with its expiry.
#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    pub expires_at: Instant,
}

impl Toast {
    fn ttl(level: NotificationLevel) -> Duration {
        match level {
            NotificationLevel::Success => SUCCESS_TTL,
            NotificationLevel::Error => ERROR_TTL,
        }
    }
}

/// Shared, internally synchronized toast queue.
///
/// Cloning yields another handle to the same queue.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    inner: Arc<Mutex<VecDeque<Toast>>>,
}

impl ToastQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave the deque inconsistent.
    fn lock(&self) -> MutexGuard<'_, VecDeque<Toast>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn push_at(&self, notification: Notification, now: Instant) {
        let expires_at = now + Toast::ttl(notification.level);
        let mut queue = self.lock();
        queue.push_back(Toast {
            notification,
            expires_at,
        });
        while queue.len() > MAX_TOASTS {
            queue.pop_front();
        }
    }

    /// Drop expired toasts and return the live ones, oldest first.
    pub fn active_at(&self, now: Instant) -> Vec<Notification> {
        let mut queue = self.lock();
        queue.retain(|t| t.expires_at > now);
        queue.iter().map(|t| t.notification.clone()).collect()
    }

    /// Live toasts as of now.
    pub fn active(&self) -> Vec<Notification> {
        self.active_at(Instant::now())
    }

    /// Remove every toast.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }
}
