mod log;
mod store;

pub use log::{GoalConfig, LogEntry, DEFAULT_DAILY_GOAL};
pub use store::{IntakeStore, MILESTONES};
