//! Side-effect dispatch for discrete store events.
//!
//! The original design routed milestone and goal notifications through a
//! process-wide haptics singleton. Here the sink is an injected trait
//! object instead, so tests substitute a recording stub and the store
//! never depends on the sink's outcome.

use std::sync::Mutex;

use crate::events::Event;

/// Receives every event the intake store emits.
///
/// Implementations must not block; the store fires and forgets.
pub trait FeedbackSink: Send {
    fn notify(&self, event: &Event);
}

/// Sink that drops every event. The default when no feedback is wired up.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn notify(&self, _event: &Event) {}
}

/// Sink that records every event for later inspection. Test helper.
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    events: Mutex<Vec<Event>>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events received so far, in dispatch order.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FeedbackSink for RecordingFeedback {
    fn notify(&self, event: &Event) {
        self.events.lock().unwrap().push(event.clone());
    }
}

impl<T: FeedbackSink + Sync> FeedbackSink for std::sync::Arc<T> {
    fn notify(&self, event: &Event) {
        (**self).notify(event);
    }
}
