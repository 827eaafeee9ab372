use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::intake::LogEntry;

/// Every state change in the intake store produces an Event.
/// The host UI polls or subscribes for them; the feedback sink receives
/// each one for haptic/visual side effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Water was logged without crossing any threshold.
    EntryAdded {
        entry: LogEntry,
        total: f64,
        progress: f64,
        at: DateTime<Utc>,
    },
    /// An add crossed a milestone fraction of the daily goal.
    /// Only the highest milestone crossed by a single add is reported.
    MilestoneCrossed {
        milestone: f64,
        total: f64,
        progress: f64,
        at: DateTime<Utc>,
    },
    /// An add crossed the daily goal. Takes precedence over milestones.
    GoalCompleted {
        total: f64,
        at: DateTime<Utc>,
    },
    /// Onboarding finished with a chosen daily goal.
    OnboardingCompleted {
        daily_goal: f64,
        at: DateTime<Utc>,
    },
    /// The most recent add was rolled back.
    Undone {
        entry_id: Uuid,
        amount: f64,
        at: DateTime<Utc>,
    },
    /// A specific entry was removed.
    EntryRemoved {
        entry_id: Uuid,
        amount: f64,
        at: DateTime<Utc>,
    },
    /// All of today's entries were cleared.
    Reset {
        at: DateTime<Utc>,
    },
    /// Full read-only snapshot of the store's published state.
    StateSnapshot {
        total: f64,
        progress: f64,
        remaining: f64,
        complete: bool,
        entry_count: usize,
        daily_goal: f64,
        onboarded: bool,
        at: DateTime<Utc>,
    },
}
