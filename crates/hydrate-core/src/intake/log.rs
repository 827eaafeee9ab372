use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single logged drink. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    /// Volume in goal units (fluid ounces). Always positive.
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    /// Create a new entry stamped with the current time.
    pub fn new(amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            timestamp: Utc::now(),
        }
    }

    /// Whether this entry falls within the current calendar day in the
    /// local timezone.
    pub fn is_today(&self) -> bool {
        self.timestamp.with_timezone(&Local).date_naive() == Local::now().date_naive()
    }
}

/// The user's goal configuration. One instance per process lifetime,
/// persisted on every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalConfig {
    /// Daily intake goal in goal units. Always positive.
    pub daily_goal: f64,
    /// Whether first-run onboarding has been completed.
    pub onboarded: bool,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            daily_goal: DEFAULT_DAILY_GOAL,
            onboarded: false,
        }
    }
}

/// Default daily goal in fluid ounces.
pub const DEFAULT_DAILY_GOAL: f64 = 64.0;
