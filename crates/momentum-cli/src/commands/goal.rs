//! Goal commands.

use chrono::Utc;
use clap::Subcommand;
use momentum_core::{progress, NewGoal};
use uuid::Uuid;

use super::{open_tracker, parse_timestamp, report_events, resolve_category, CliResult};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Create a new goal
    Add {
        /// Goal title
        title: String,
        /// Category id or name
        #[arg(long)]
        category: String,
        /// Target count (default: 1)
        #[arg(long, default_value = "1")]
        target: u32,
        /// Deadline (RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        deadline: String,
    },
    /// List goals with their progress
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
        /// Only goals that are not complete
        #[arg(long)]
        active: bool,
    },
    /// Record one unit of progress
    Progress {
        /// Goal id
        id: String,
    },
    /// Edit a goal
    Edit {
        /// Goal id
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New deadline (RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<String>,
        /// Set the current count (clamped to the target)
        #[arg(long)]
        current: Option<u32>,
    },
    /// Delete a goal
    Delete {
        /// Goal id
        id: String,
    },
}

pub fn run(action: GoalAction) -> CliResult {
    let mut tracker = open_tracker()?;

    match action {
        GoalAction::Add {
            title,
            category,
            target,
            deadline,
        } => {
            let category = resolve_category(&tracker, &category)?;
            let deadline = parse_timestamp(&deadline)?;
            let goal = tracker.add_goal(
                NewGoal {
                    id: Uuid::new_v4().to_string(),
                    title,
                    category,
                    target,
                    deadline,
                },
                Utc::now(),
            )?;
            println!("Goal created: {}", goal.id);
        }
        GoalAction::List { json, active } => {
            let goals: Vec<_> = tracker
                .goals()
                .iter()
                .filter(|g| !active || !g.completed)
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&goals)?);
            } else if goals.is_empty() {
                println!("No goals yet");
            } else {
                for g in goals {
                    let projection = progress::project(g.current, g.target)?;
                    println!(
                        "{}  {}  {}/{} ({:.0}%)  due {}",
                        g.id,
                        g.title,
                        g.current,
                        g.target,
                        projection.percent,
                        g.deadline.format("%Y-%m-%d")
                    );
                }
            }
        }
        GoalAction::Progress { id } => {
            let goal = tracker.record_progress(&id, Utc::now())?;
            println!("Progress: {}/{}", goal.current, goal.target);
            report_events(&mut tracker);
        }
        GoalAction::Edit {
            id,
            title,
            deadline,
            current,
        } => {
            let deadline = deadline.as_deref().map(parse_timestamp).transpose()?;
            tracker.edit_goal(&id, title, deadline, current)?;
            println!("Goal updated: {id}");
        }
        GoalAction::Delete { id } => {
            tracker.delete_goal(&id)?;
            println!("Goal deleted: {id}");
        }
    }
    Ok(())
}
