use clap::Subcommand;

use crate::common::open_store;

#[derive(Subcommand)]
pub enum GoalAction {
    /// Set the daily goal
    Set {
        /// Daily goal in goal units (must be positive)
        value: f64,
    },
    /// Show the current goal configuration as JSON
    Show,
    /// Complete onboarding with the chosen daily goal
    Onboard {
        /// Daily goal in goal units (must be positive)
        value: f64,
    },
}

pub fn run(action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;

    match action {
        GoalAction::Set { value } => {
            store.set_goal(value)?;
            println!("{}", serde_json::to_string_pretty(store.goal())?);
        }
        GoalAction::Show => {
            println!("{}", serde_json::to_string_pretty(store.goal())?);
        }
        GoalAction::Onboard { value } => {
            let event = store.complete_onboarding(value)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
    }
    Ok(())
}
