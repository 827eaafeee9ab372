//! Intake store implementation.
//!
//! The store is the single owner of today's log entries and the goal
//! configuration. Commands take `&mut self` and run strictly sequentially,
//! so the invariants (one pending undo, append-then-persist ordering) hold
//! without locking.
//!
//! ## Persistence
//!
//! The store loads once at construction and saves after every mutation.
//! Saves are best-effort: a failed write is ignored and the in-memory
//! state stays authoritative for the session. A failed or empty load
//! yields defaults instead of failing construction.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = IntakeStore::new(Box::new(db), Box::new(NullFeedback));
//! let event = store.add_water(12.0)?;
//! ```

use chrono::Utc;
use uuid::Uuid;

use super::log::{GoalConfig, LogEntry};
use crate::error::StoreError;
use crate::events::Event;
use crate::feedback::FeedbackSink;
use crate::storage::Persistence;

/// Progress fractions that trigger a one-time notification when crossed.
pub const MILESTONES: [f64; 3] = [0.25, 0.5, 0.75];

/// Core intake store.
///
/// Owns today's entries, the goal configuration, and the pending-undo
/// marker. Emits exactly one [`Event`] per mutating command.
pub struct IntakeStore {
    entries: Vec<LogEntry>,
    goal: GoalConfig,
    /// Id of the most recently added entry, eligible for undo until
    /// superseded by another add, undone, or individually removed.
    last_added: Option<Uuid>,
    persistence: Box<dyn Persistence>,
    feedback: Box<dyn FeedbackSink>,
}

impl IntakeStore {
    /// Construct the store, loading goal and entries from persistence.
    ///
    /// Entries are filtered to the current local calendar day once, here;
    /// they are not re-filtered as time passes during the session.
    /// Missing or corrupt data falls back to defaults.
    pub fn new(persistence: Box<dyn Persistence>, feedback: Box<dyn FeedbackSink>) -> Self {
        let goal = persistence
            .load_goal()
            .ok()
            .flatten()
            .filter(|g| g.daily_goal > 0.0)
            .unwrap_or_default();
        let entries: Vec<LogEntry> = persistence
            .load_entries()
            .unwrap_or_default()
            .into_iter()
            .filter(LogEntry::is_today)
            .collect();
        Self {
            entries,
            goal,
            last_added: None,
            persistence,
            feedback,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn goal(&self) -> &GoalConfig {
        &self.goal
    }

    /// Id of the entry the next `undo_last` would remove, if any.
    pub fn pending_undo(&self) -> Option<Uuid> {
        self.last_added
    }

    /// Sum of today's logged amounts.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// 0.0 .. 1.0 progress toward the daily goal.
    pub fn progress(&self) -> f64 {
        Self::progress_of(self.total(), self.goal.daily_goal)
    }

    /// Amount still to drink today, floored at zero.
    pub fn remaining(&self) -> f64 {
        (self.goal.daily_goal - self.total()).max(0.0)
    }

    pub fn is_complete(&self) -> bool {
        self.total() >= self.goal.daily_goal
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            total: self.total(),
            progress: self.progress(),
            remaining: self.remaining(),
            complete: self.is_complete(),
            entry_count: self.entries.len(),
            daily_goal: self.goal.daily_goal,
            onboarded: self.goal.onboarded,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Log a drink. Rejects non-positive amounts with no state change.
    ///
    /// Emits exactly one event, in priority order: `GoalCompleted` when the
    /// add crosses 100%, otherwise `MilestoneCrossed` for the highest
    /// milestone crossed, otherwise `EntryAdded`. Pre-add progress is
    /// derived from the entries collection before mutation.
    pub fn add_water(&mut self, amount: f64) -> Result<Event, StoreError> {
        if !(amount > 0.0) {
            return Err(StoreError::InvalidAmount { amount });
        }

        let goal = self.goal.daily_goal;
        let before = Self::raw_progress(self.total(), goal);

        let entry = LogEntry::new(amount);
        self.entries.push(entry.clone());
        self.last_added = Some(entry.id);
        self.persist_entries();

        let total = self.total();
        let after = Self::raw_progress(total, goal);
        let at = Utc::now();

        let event = if after >= 1.0 && before < 1.0 {
            Event::GoalCompleted { total, at }
        } else if let Some(milestone) = Self::highest_milestone_crossed(before, after) {
            Event::MilestoneCrossed {
                milestone,
                total,
                progress: after.min(1.0),
                at,
            }
        } else {
            Event::EntryAdded {
                entry,
                total,
                progress: after.min(1.0),
                at,
            }
        };
        self.feedback.notify(&event);
        Ok(event)
    }

    /// Roll back the most recent add.
    ///
    /// Silent no-op returning `None` when nothing is pending, including
    /// when the pending entry was individually removed since the add.
    /// Callers that want a hard error use [`IntakeStore::try_undo_last`].
    pub fn undo_last(&mut self) -> Option<Event> {
        let id = self.last_added.take()?;
        let pos = self.entries.iter().position(|e| e.id == id)?;
        let entry = self.entries.remove(pos);
        self.persist_entries();
        let event = Event::Undone {
            entry_id: entry.id,
            amount: entry.amount,
            at: Utc::now(),
        };
        self.feedback.notify(&event);
        Some(event)
    }

    /// Like [`IntakeStore::undo_last`], but reports `NothingToUndo` instead
    /// of no-opping.
    pub fn try_undo_last(&mut self) -> Result<Event, StoreError> {
        self.undo_last().ok_or(StoreError::NothingToUndo)
    }

    /// Remove the entry with the given id. Idempotent; absent ids no-op.
    pub fn remove_entry(&mut self, id: Uuid) -> Option<Event> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        let entry = self.entries.remove(pos);
        // A removed entry can no longer be undone.
        if self.last_added == Some(id) {
            self.last_added = None;
        }
        self.persist_entries();
        let event = Event::EntryRemoved {
            entry_id: entry.id,
            amount: entry.amount,
            at: Utc::now(),
        };
        self.feedback.notify(&event);
        Some(event)
    }

    /// Clear all of today's entries and the pending undo.
    pub fn reset_today(&mut self) -> Event {
        self.entries.clear();
        self.last_added = None;
        self.persist_entries();
        let event = Event::Reset { at: Utc::now() };
        self.feedback.notify(&event);
        event
    }

    /// Change the daily goal. Rejects non-positive values.
    ///
    /// The 32-128 range shown by goal pickers is presentation guidance;
    /// the store accepts any positive value.
    pub fn set_goal(&mut self, value: f64) -> Result<(), StoreError> {
        if !(value > 0.0) {
            return Err(StoreError::InvalidGoal { value });
        }
        self.goal.daily_goal = value;
        self.persist_goal();
        Ok(())
    }

    /// Finish first-run onboarding with the chosen goal.
    pub fn complete_onboarding(&mut self, goal: f64) -> Result<Event, StoreError> {
        self.set_goal(goal)?;
        self.goal.onboarded = true;
        self.persist_goal();
        let event = Event::OnboardingCompleted {
            daily_goal: goal,
            at: Utc::now(),
        };
        self.feedback.notify(&event);
        Ok(event)
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Progress clamped to 1.0, guarding a zero goal as zero progress.
    fn progress_of(total: f64, goal: f64) -> f64 {
        Self::raw_progress(total, goal).min(1.0)
    }

    /// Unclamped progress fraction used for threshold comparisons.
    fn raw_progress(total: f64, goal: f64) -> f64 {
        if goal <= 0.0 {
            return 0.0;
        }
        total / goal
    }

    /// Highest milestone `m` with `before < m <= after`, if any.
    /// Intermediate milestones crossed by the same add are not reported.
    fn highest_milestone_crossed(before: f64, after: f64) -> Option<f64> {
        MILESTONES
            .iter()
            .rev()
            .copied()
            .find(|&m| before < m && after >= m)
    }

    fn persist_entries(&self) {
        // Best-effort; in-memory state stays authoritative.
        let _ = self.persistence.save_entries(&self.entries);
    }

    fn persist_goal(&self) {
        let _ = self.persistence.save_goal(&self.goal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{NullFeedback, RecordingFeedback};
    use crate::storage::MemoryStorage;
    use std::sync::Arc;

    fn store_with_goal(goal: f64) -> IntakeStore {
        let mut store = IntakeStore::new(
            Box::new(MemoryStorage::new()),
            Box::new(NullFeedback),
        );
        store.set_goal(goal).unwrap();
        store
    }

    fn event_type(event: &Event) -> &'static str {
        match event {
            Event::EntryAdded { .. } => "entry_added",
            Event::MilestoneCrossed { .. } => "milestone",
            Event::GoalCompleted { .. } => "goal_completed",
            Event::OnboardingCompleted { .. } => "onboarding",
            Event::Undone { .. } => "undone",
            Event::EntryRemoved { .. } => "removed",
            Event::Reset { .. } => "reset",
            Event::StateSnapshot { .. } => "snapshot",
        }
    }

    #[test]
    fn totals_accumulate() {
        let mut store = store_with_goal(64.0);
        store.add_water(8.0).unwrap();
        store.add_water(12.0).unwrap();
        store.add_water(8.0).unwrap();
        assert_eq!(store.total(), 28.0);
        assert!((store.progress() - 0.4375).abs() < 1e-12);
        assert_eq!(store.remaining(), 36.0);
        assert!(!store.is_complete());
    }

    #[test]
    fn worked_example_crosses_half() {
        // goal = 64; 8 + 12 + 8 = 28 stays below 0.5, the next 12 crosses it.
        let mut store = store_with_goal(64.0);
        for amount in [8.0, 12.0, 8.0] {
            let event = store.add_water(amount).unwrap();
            assert_ne!(event_type(&event), "milestone");
        }
        let event = store.add_water(12.0).unwrap();
        assert_eq!(store.total(), 40.0);
        match event {
            Event::MilestoneCrossed { milestone, .. } => assert_eq!(milestone, 0.5),
            other => panic!("expected MilestoneCrossed, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_positive_amounts() {
        let mut store = store_with_goal(64.0);
        assert!(matches!(
            store.add_water(0.0),
            Err(StoreError::InvalidAmount { .. })
        ));
        assert!(matches!(
            store.add_water(-3.0),
            Err(StoreError::InvalidAmount { .. })
        ));
        assert!(store.entries().is_empty());
    }

    #[test]
    fn first_add_crosses_quarter() {
        let mut store = store_with_goal(64.0);
        // 10% then up to 30%: exactly one milestone (0.25), not 0.5/0.75.
        store.add_water(6.4).unwrap();
        let event = store.add_water(12.8).unwrap();
        match event {
            Event::MilestoneCrossed { milestone, .. } => assert_eq!(milestone, 0.25),
            other => panic!("expected MilestoneCrossed, got {other:?}"),
        }
    }

    #[test]
    fn completion_takes_precedence_over_milestones() {
        // 70% -> 130% in one add skips 0.75 and reports completion.
        let mut store = store_with_goal(100.0);
        store.add_water(70.0).unwrap();
        let event = store.add_water(60.0).unwrap();
        assert_eq!(event_type(&event), "goal_completed");
        assert_eq!(store.progress(), 1.0);
    }

    #[test]
    fn multi_milestone_jump_reports_highest_only() {
        // 20% -> 80% crosses 0.25, 0.5, 0.75; only 0.75 is reported.
        let mut store = store_with_goal(100.0);
        store.add_water(20.0).unwrap();
        let event = store.add_water(60.0).unwrap();
        match event {
            Event::MilestoneCrossed { milestone, .. } => assert_eq!(milestone, 0.75),
            other => panic!("expected MilestoneCrossed, got {other:?}"),
        }
    }

    #[test]
    fn goal_completed_only_once() {
        let mut store = store_with_goal(10.0);
        let first = store.add_water(12.0).unwrap();
        assert_eq!(event_type(&first), "goal_completed");
        // Already past the goal; further adds are plain entries.
        let second = store.add_water(5.0).unwrap();
        assert_eq!(event_type(&second), "entry_added");
    }

    #[test]
    fn undo_restores_pre_add_state() {
        let mut store = store_with_goal(64.0);
        store.add_water(8.0).unwrap();
        let total_before = store.total();
        let count_before = store.entries().len();

        store.add_water(12.0).unwrap();
        let event = store.undo_last();
        assert!(matches!(event, Some(Event::Undone { amount, .. }) if amount == 12.0));
        assert_eq!(store.total(), total_before);
        assert_eq!(store.entries().len(), count_before);
    }

    #[test]
    fn double_undo_is_noop() {
        let mut store = store_with_goal(64.0);
        store.add_water(8.0).unwrap();
        assert!(store.undo_last().is_some());
        assert!(store.undo_last().is_none());
        assert_eq!(
            store.try_undo_last().unwrap_err(),
            StoreError::NothingToUndo
        );
        assert!(store.entries().is_empty());
    }

    #[test]
    fn undo_skips_entry_removed_since_add() {
        let mut store = store_with_goal(64.0);
        store.add_water(8.0).unwrap();
        let id = store.pending_undo().unwrap();
        assert!(store.remove_entry(id).is_some());
        // The removed entry must not be undone (or re-removed).
        assert!(store.undo_last().is_none());
        assert!(store.entries().is_empty());
    }

    #[test]
    fn remove_entry_is_idempotent() {
        let mut store = store_with_goal(64.0);
        store.add_water(8.0).unwrap();
        let id = store.entries()[0].id;
        assert!(store.remove_entry(id).is_some());
        assert!(store.remove_entry(id).is_none());
        assert!(store.remove_entry(Uuid::new_v4()).is_none());
    }

    #[test]
    fn reset_clears_everything() {
        let mut store = store_with_goal(64.0);
        store.add_water(8.0).unwrap();
        store.add_water(16.0).unwrap();
        store.reset_today();
        assert_eq!(store.total(), 0.0);
        assert!(store.entries().is_empty());
        assert!(store.undo_last().is_none());
    }

    #[test]
    fn set_goal_rejects_non_positive() {
        let mut store = store_with_goal(64.0);
        assert!(matches!(
            store.set_goal(0.0),
            Err(StoreError::InvalidGoal { .. })
        ));
        assert_eq!(store.goal().daily_goal, 64.0);
    }

    #[test]
    fn onboarding_sets_goal_and_flag() {
        let mut store = IntakeStore::new(
            Box::new(MemoryStorage::new()),
            Box::new(NullFeedback),
        );
        assert!(!store.goal().onboarded);
        let event = store.complete_onboarding(96.0).unwrap();
        assert!(matches!(
            event,
            Event::OnboardingCompleted { daily_goal, .. } if daily_goal == 96.0
        ));
        assert_eq!(store.goal().daily_goal, 96.0);
        assert!(store.goal().onboarded);
    }

    #[test]
    fn every_command_notifies_the_sink() {
        let sink = Arc::new(RecordingFeedback::new());
        let mut store = IntakeStore::new(
            Box::new(MemoryStorage::new()),
            Box::new(Arc::clone(&sink)),
        );
        store.add_water(8.0).unwrap();
        store.undo_last();
        store.reset_today();
        let types: Vec<&str> = sink.events().iter().map(event_type).collect();
        assert_eq!(types, vec!["entry_added", "undone", "reset"]);
    }

    #[test]
    fn load_filters_entries_to_today() {
        let storage = MemoryStorage::new();
        let mut old = LogEntry::new(16.0);
        old.timestamp = old.timestamp - chrono::Duration::days(1);
        let today = LogEntry::new(8.0);
        storage
            .save_entries(&[old, today.clone()])
            .unwrap();

        let store = IntakeStore::new(Box::new(storage), Box::new(NullFeedback));
        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.entries()[0].id, today.id);
    }

    #[test]
    fn loaded_goal_survives_restart() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let mut store = IntakeStore::new(
                Box::new(Arc::clone(&storage)),
                Box::new(NullFeedback),
            );
            store.complete_onboarding(80.0).unwrap();
        }
        let store = IntakeStore::new(Box::new(storage), Box::new(NullFeedback));
        assert_eq!(store.goal().daily_goal, 80.0);
        assert!(store.goal().onboarded);
    }

    #[test]
    fn failed_saves_are_non_fatal() {
        struct FailingStorage;
        impl Persistence for FailingStorage {
            fn save_goal(&self, _: &GoalConfig) -> Result<(), crate::error::PersistenceError> {
                Err(crate::error::PersistenceError::Locked)
            }
            fn save_entries(&self, _: &[LogEntry]) -> Result<(), crate::error::PersistenceError> {
                Err(crate::error::PersistenceError::Locked)
            }
            fn load_goal(
                &self,
            ) -> Result<Option<GoalConfig>, crate::error::PersistenceError> {
                Err(crate::error::PersistenceError::Locked)
            }
            fn load_entries(&self) -> Result<Vec<LogEntry>, crate::error::PersistenceError> {
                Err(crate::error::PersistenceError::Locked)
            }
        }

        // Construction falls back to defaults; commands keep working.
        let mut store = IntakeStore::new(Box::new(FailingStorage), Box::new(NullFeedback));
        assert_eq!(store.goal().daily_goal, 64.0);
        store.add_water(8.0).unwrap();
        assert_eq!(store.total(), 8.0);
    }

    #[test]
    fn zero_goal_in_storage_falls_back_to_default() {
        let storage = MemoryStorage::new();
        storage
            .save_goal(&GoalConfig {
                daily_goal: 0.0,
                onboarded: true,
            })
            .unwrap();
        let store = IntakeStore::new(Box::new(storage), Box::new(NullFeedback));
        assert_eq!(store.goal().daily_goal, 64.0);
        assert_eq!(store.progress(), 0.0);
    }
}
