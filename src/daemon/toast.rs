//! Transient notifications ("toasts").
//!
//! Each posted message stays visible for a fixed time-to-live and is then
//! dropped. Expiry is computed from the caller's `now_ms`, so no timers
//! are involved.

use uuid::Uuid;

use crate::types::Notification;

#[derive(Debug, Clone)]
struct Toast {
    notification: Notification,
    expires_at_ms: u64,
}

/// Holds the notifications currently on screen.
#[derive(Debug)]
pub struct ToastCenter {
    ttl_ms: u64,
    toasts: Vec<Toast>,
}

impl ToastCenter {
    /// Creates an empty center whose toasts live for `ttl_ms`.
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            ttl_ms,
            toasts: Vec::new(),
        }
    }

    /// Posts a message at `now_ms` and returns its id.
    pub fn post(&mut self, message: impl Into<String>, now_ms: u64) -> Uuid {
        let notification = Notification {
            id: Uuid::new_v4(),
            message: message.into(),
        };
        let id = notification.id;
        tracing::debug!("Notification: {}", notification.message);
        self.toasts.push(Toast {
            notification,
            expires_at_ms: now_ms.saturating_add(self.ttl_ms),
        });
        id
    }

    /// Notifications still visible at `now_ms`, oldest first.
    pub fn active(&self, now_ms: u64) -> Vec<Notification> {
        self.toasts
            .iter()
            .filter(|toast| toast.expires_at_ms > now_ms)
            .map(|toast| toast.notification.clone())
            .collect()
    }

    /// Drops expired notifications. Returns how many were removed.
    pub fn sweep(&mut self, now_ms: u64) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.expires_at_ms > now_ms);
        before - self.toasts.len()
    }

    /// Number of stored notifications, expired or not.
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_and_active() {
        let mut center = ToastCenter::new(3_000);
        let id = center.post("Timer started", 0);

        let active = center.active(100);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, id);
        assert_eq!(active[0].message, "Timer started");
    }

    #[test]
    fn test_expiry() {
        let mut center = ToastCenter::new(3_000);
        center.post("first", 0);
        center.post("second", 2_000);

        let messages: Vec<String> = center
            .active(2_999)
            .into_iter()
            .map(|n| n.message)
            .collect();
        assert_eq!(messages, vec!["first", "second"]);

        let messages: Vec<String> = center
            .active(3_000)
            .into_iter()
            .map(|n| n.message)
            .collect();
        assert_eq!(messages, vec!["second"]);

        assert!(center.active(5_000).is_empty());
    }

    #[test]
    fn test_sweep() {
        let mut center = ToastCenter::new(1_000);
        center.post("a", 0);
        center.post("b", 500);
        center.post("c", 2_000);

        assert_eq!(center.sweep(1_200), 1);
        assert_eq!(center.len(), 2);
        assert_eq!(center.sweep(10_000), 2);
        assert!(center.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut center = ToastCenter::new(1_000);
        let a = center.post("x", 0);
        let b = center.post("x", 0);
        assert_ne!(a, b);
    }
}
