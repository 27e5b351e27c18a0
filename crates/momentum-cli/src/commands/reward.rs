//! Reward commands.

use chrono::Utc;
use clap::Subcommand;
use momentum_core::Reward;
use uuid::Uuid;

use super::{open_tracker, report_events, CliResult};

#[derive(Subcommand)]
pub enum RewardAction {
    /// Create a custom reward
    Add {
        /// Reward title
        title: String,
        /// What the reward grants
        #[arg(long, default_value = "")]
        description: String,
        /// Icon tag
        #[arg(long, default_value = "gift")]
        icon: String,
    },
    /// List rewards
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Claim an unlocked reward
    Claim {
        /// Reward id
        id: String,
    },
    /// Delete a custom reward (seed rewards are refused)
    Delete {
        /// Reward id
        id: String,
    },
}

pub fn run(action: RewardAction) -> CliResult {
    let mut tracker = open_tracker()?;

    match action {
        RewardAction::Add {
            title,
            description,
            icon,
        } => {
            let reward = tracker.add_reward(Reward {
                id: Uuid::new_v4().to_string(),
                title,
                description,
                icon,
                unlocked: false,
                is_default: false,
            })?;
            println!("Reward created: {}", reward.id);
        }
        RewardAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(tracker.rewards())?);
            } else {
                for r in tracker.rewards() {
                    let state = if r.unlocked { "unlocked" } else { "locked" };
                    println!("{}  {}  [{state}]", r.id, r.title);
                }
            }
        }
        RewardAction::Claim { id } => {
            tracker.claim_reward(&id, Utc::now())?;
            println!("Reward claimed: {id}");
            report_events(&mut tracker);
        }
        RewardAction::Delete { id } => {
            tracker.delete_reward(&id)?;
            println!("Reward deleted: {id}");
        }
    }
    Ok(())
}
