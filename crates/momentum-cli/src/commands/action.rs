//! Action commands.

use chrono::Utc;
use clap::Subcommand;
use momentum_core::NewAction;
use uuid::Uuid;

use super::{open_tracker, parse_timestamp, report_events, resolve_category, CliResult};

#[derive(Subcommand)]
pub enum ActionAction {
    /// Log a new action
    Log {
        /// What was accomplished
        title: String,
        /// Category id or name
        #[arg(long)]
        category: String,
        /// Optional deadline (RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<String>,
    },
    /// List actions
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
        /// Only incomplete actions
        #[arg(long)]
        open: bool,
    },
    /// Mark an action completed
    Complete {
        /// Action id
        id: String,
    },
    /// Edit an action
    Edit {
        /// Action id
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New deadline (RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<String>,
    },
    /// Delete an action
    Delete {
        /// Action id
        id: String,
    },
}

pub fn run(action: ActionAction) -> CliResult {
    let mut tracker = open_tracker()?;

    match action {
        ActionAction::Log {
            title,
            category,
            deadline,
        } => {
            let category = resolve_category(&tracker, &category)?;
            let deadline = deadline.as_deref().map(parse_timestamp).transpose()?;
            let logged = tracker.log_action(
                NewAction {
                    id: Uuid::new_v4().to_string(),
                    title,
                    category,
                    deadline,
                },
                Utc::now(),
            )?;
            println!("Action logged: {}", logged.id);
            report_events(&mut tracker);
        }
        ActionAction::List { json, open } => {
            let actions: Vec<_> = tracker
                .actions()
                .iter()
                .filter(|a| !open || !a.completed)
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&actions)?);
            } else if actions.is_empty() {
                println!("No actions recorded yet");
            } else {
                for a in actions {
                    let mark = if a.completed { "x" } else { " " };
                    println!(
                        "[{mark}] {}  {}  ({})",
                        a.id,
                        a.title,
                        a.logged_at.format("%Y-%m-%d")
                    );
                }
            }
        }
        ActionAction::Complete { id } => {
            tracker.complete_action(&id, Utc::now())?;
            println!("Action completed: {id}");
            report_events(&mut tracker);
        }
        ActionAction::Edit {
            id,
            title,
            deadline,
        } => {
            let deadline = deadline.as_deref().map(parse_timestamp).transpose()?;
            tracker.edit_action(&id, title, deadline)?;
            println!("Action updated: {id}");
        }
        ActionAction::Delete { id } => {
            tracker.delete_action(&id)?;
            println!("Action deleted: {id}");
        }
    }
    Ok(())
}
