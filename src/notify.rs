//! Player-facing notifications (toasts)
//!
//! Sinks are fire-and-forget: the session never reads anything back from them.

use std::collections::VecDeque;

use serde::Serialize;

use crate::sim::ObjectKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Notification {
    /// Player moved into a different district
    ZoneEntered { name: String, description: String },
    /// Swallowed something worth a shout
    HighValueConsumed { kind: ObjectKind, points: u32 },
    /// Run ended with a new best
    NewHighScore { score: u64 },
    /// Session could not start; retryable
    StartFailed { reason: String },
}

impl Notification {
    /// Human-readable toast text
    pub fn message(&self) -> String {
        match self {
            Notification::ZoneEntered { name, .. } => format!("Entering {name}"),
            Notification::HighValueConsumed { kind, points } => {
                format!("Consumed {}! +{} points", kind.as_str(), points)
            }
            Notification::NewHighScore { score } => {
                format!("New high score: {}", crate::format_score(*score))
            }
            Notification::StartFailed { reason } => {
                format!("Failed to initialize game objects: {reason}")
            }
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notification::StartFailed { .. })
    }
}

pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

/// Discards everything
impl NotificationSink for () {
    fn notify(&mut self, _notification: Notification) {}
}

/// Bounded buffer drained by the UI once per frame
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    pending: VecDeque<Notification>,
    capacity: usize,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(16)
    }
}

impl NotificationQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            pending: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl NotificationSink for NotificationQueue {
    /// Oldest entries are dropped when full
    fn notify(&mut self, notification: Notification) {
        if self.pending.len() >= self.capacity {
            self.pending.pop_front();
        }
        self.pending.push_back(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let n = Notification::ZoneEntered {
            name: "Downtown".into(),
            description: "Business Core".into(),
        };
        assert_eq!(n.message(), "Entering Downtown");

        let n = Notification::HighValueConsumed {
            kind: ObjectKind::Hovercar,
            points: 100,
        };
        assert_eq!(n.message(), "Consumed hovercar! +100 points");

        let n = Notification::NewHighScore { score: 12500 };
        assert_eq!(n.message(), "New high score: 12,500");
        assert!(!n.is_error());
    }

    #[test]
    fn test_queue_is_bounded() {
        let mut q = NotificationQueue::new(2);
        for score in 1..=3 {
            q.notify(Notification::NewHighScore { score });
        }
        assert_eq!(
            q.drain(),
            vec![
                Notification::NewHighScore { score: 2 },
                Notification::NewHighScore { score: 3 },
            ]
        );
        assert!(q.is_empty());
    }
}
