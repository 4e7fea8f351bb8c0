//! Event types for the SimpliTab event system
//!
//! The view controller emits a [`UiEvent`] whenever the view state changes;
//! the SSE endpoint forwards them to connected browsers.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Application phase derived from the view state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewPhase {
    /// Nothing submitted yet (neutral placeholder)
    Idle,
    /// A submission is outstanding
    Loading,
    /// The latest submission produced a tablature
    Result,
    /// The latest submission failed
    Error,
}

impl ViewPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewPhase::Idle => "Idle",
            ViewPhase::Loading => "Loading",
            ViewPhase::Result => "Result",
            ViewPhase::Error => "Error",
        }
    }
}

/// SimpliTab event types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiEvent {
    /// Any view-state field changed (form, result, error, copy acknowledgement)
    ViewChanged {
        phase: ViewPhase,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A submission was sent to the generative service
    SubmissionStarted {
        submission_id: Uuid,
        sequence: u64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The latest submission resolved
    SubmissionFinished {
        submission_id: Uuid,
        sequence: u64,
        phase: ViewPhase,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A submission resolved after a newer one was issued; its outcome was dropped
    SubmissionDiscarded {
        submission_id: Uuid,
        sequence: u64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl UiEvent {
    /// SSE event name
    pub fn event_type(&self) -> &'static str {
        match self {
            UiEvent::ViewChanged { .. } => "ViewChanged",
            UiEvent::SubmissionStarted { .. } => "SubmissionStarted",
            UiEvent::SubmissionFinished { .. } => "SubmissionFinished",
            UiEvent::SubmissionDiscarded { .. } => "SubmissionDiscarded",
        }
    }

    pub fn view_changed(phase: ViewPhase) -> Self {
        UiEvent::ViewChanged {
            phase,
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Broadcast bus for [`UiEvent`]s
///
/// Cloning is cheap; all clones share one channel.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<UiEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// # Examples
    ///
    /// ```
    /// use simplitab_common::events::EventBus;
    ///
    /// let event_bus = EventBus::new(100);
    /// assert_eq!(event_bus.capacity(), 100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.tx.subscribe()
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: UiEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_names() {
        assert_eq!(
            UiEvent::view_changed(ViewPhase::Loading).event_type(),
            "ViewChanged"
        );
        let event = UiEvent::SubmissionDiscarded {
            submission_id: Uuid::new_v4(),
            sequence: 3,
            timestamp: chrono::Utc::now(),
        };
        assert_eq!(event.event_type(), "SubmissionDiscarded");
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let json = serde_json::to_value(UiEvent::view_changed(ViewPhase::Result)).unwrap();
        assert_eq!(json["type"], "ViewChanged");
        assert_eq!(json["phase"], "Result");
    }

    #[tokio::test]
    async fn test_subscriber_receives_emitted_event() {
        let bus = EventBus::new(10);
        let mut rx = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        bus.emit_lossy(UiEvent::view_changed(ViewPhase::Error));

        match rx.recv().await.unwrap() {
            UiEvent::ViewChanged { phase, .. } => assert_eq!(phase, ViewPhase::Error),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_emit_without_subscribers_is_silent() {
        let bus = EventBus::new(10);
        bus.emit_lossy(UiEvent::view_changed(ViewPhase::Idle));
        assert_eq!(bus.subscriber_count(), 0);
    }
}
