//! Streak commands.

use clap::Subcommand;

use super::{open_tracker, CliResult};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Show streaks per category, replayed from the action history
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: StreakAction) -> CliResult {
    let tracker = open_tracker()?;

    match action {
        StreakAction::Show { json } => {
            let mut streaks: Vec<_> = tracker.streaks().collect();
            streaks.sort_by(|a, b| a.category.cmp(&b.category));

            if json {
                println!("{}", serde_json::to_string_pretty(&streaks)?);
            } else if streaks.is_empty() {
                println!("No activity yet");
            } else {
                for s in streaks {
                    let name = tracker
                        .categories()
                        .iter()
                        .find(|c| c.id == s.category)
                        .map(|c| c.name.as_str())
                        .unwrap_or(s.category.as_str());
                    println!(
                        "{name}: {} day(s), longest {} (last activity {})",
                        s.current,
                        s.longest,
                        s.last_activity_at.format("%Y-%m-%d")
                    );
                }
            }
        }
    }
    Ok(())
}
