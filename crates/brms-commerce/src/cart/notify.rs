//! Transient user notifications ("toasts").

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

/// A short message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

/// Receives toasts from the cart store and checkout.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, toast: Toast) {
        (**self).notify(toast);
    }
}

/// Collects toasts in memory until drained.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Mutex<Vec<Toast>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending toast, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        match self.toasts.lock() {
            Ok(mut toasts) => std::mem::take(&mut *toasts),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    /// Number of pending toasts.
    pub fn len(&self) -> usize {
        match self.toasts.lock() {
            Ok(toasts) => toasts.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, toast: Toast) {
        match self.toasts.lock() {
            Ok(mut toasts) => toasts.push(toast),
            Err(poisoned) => poisoned.into_inner().push(toast),
        }
    }
}

/// Forwards toasts to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Error => tracing::warn!(text = %toast.message, "toast"),
            ToastKind::Success | ToastKind::Info => {
                tracing::info!(text = %toast.message, "toast")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_drains_in_order() {
        let queue = ToastQueue::new();
        queue.notify(Toast::success("first"));
        queue.notify(Toast::error("second"));
        assert_eq!(queue.len(), 2);

        let toasts = queue.drain();
        assert_eq!(toasts[0].message, "first");
        assert_eq!(toasts[1].kind, ToastKind::Error);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_shared_queue() {
        let queue = Arc::new(ToastQueue::new());
        let handle = Arc::clone(&queue);
        handle.notify(Toast::info("hello"));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_poisoned_queue_keeps_count() {
        let queue = Arc::new(ToastQueue::new());
        queue.notify(Toast::info("before"));

        let handle = Arc::clone(&queue);
        let poisoner = std::thread::spawn(move || {
            let _guard = handle.toasts.lock().unwrap();
            panic!("poison the queue");
        });
        assert!(poisoner.join().is_err());

        queue.notify(Toast::info("after"));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.drain().len(), 2);
    }
}
