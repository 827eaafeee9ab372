use hydrate_core::{Database, Event, FeedbackSink, IntakeStore};

/// Open the intake store over the default database with terminal feedback.
pub fn open_store() -> Result<IntakeStore, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    Ok(IntakeStore::new(Box::new(db), Box::new(TerminalFeedback)))
}

/// Feedback sink that celebrates thresholds on stderr, standing in for
/// the haptic/audio sink a device build would inject.
pub struct TerminalFeedback;

impl FeedbackSink for TerminalFeedback {
    fn notify(&self, event: &Event) {
        match event {
            Event::MilestoneCrossed { milestone, .. } => {
                eprintln!("~ {}% of today's goal", (milestone * 100.0).round() as u32);
            }
            Event::GoalCompleted { total, .. } => {
                eprintln!("~ daily goal complete at {total} oz");
            }
            _ => {}
        }
    }
}
