use clap::Subcommand;
use uuid::Uuid;

use crate::common::open_store;

#[derive(Subcommand)]
pub enum LogAction {
    /// Log a drink
    Add {
        /// Amount in goal units (e.g. fluid ounces)
        amount: f64,
    },
    /// Roll back the most recent add
    Undo,
    /// Remove a specific entry
    Remove {
        /// Entry id
        id: Uuid,
    },
    /// Clear all of today's entries
    Reset,
    /// List today's entries as JSON
    List,
    /// Print the current store state as JSON
    Status,
}

pub fn run(action: LogAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;

    match action {
        LogAction::Add { amount } => {
            let event = store.add_water(amount)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        LogAction::Undo => match store.undo_last() {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("nothing to undo"),
        },
        LogAction::Remove { id } => match store.remove_entry(id) {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("no entry with id {id}"),
        },
        LogAction::Reset => {
            let event = store.reset_today();
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        LogAction::List => {
            println!("{}", serde_json::to_string_pretty(store.entries())?);
        }
        LogAction::Status => {
            println!("{}", serde_json::to_string_pretty(&store.snapshot())?);
        }
    }
    Ok(())
}
