//! Overdue status and the polling watcher.

use chrono::Utc;
use momentum_core::storage::Config;

use super::{open_tracker, CliResult};

pub fn run(watch: bool, json: bool) -> CliResult {
    if !watch {
        return print_once(json);
    }

    let config = Config::load_or_default();
    let interval = std::time::Duration::from_secs(config.poll.interval_secs.max(1));
    let mut previous_overdue = 0usize;

    loop {
        // Reopen per poll so concurrent CLI invocations are picked up.
        let tracker = open_tracker()?;
        let report = tracker.overdue(Utc::now());
        let total = report.total();

        if total > 0 && previous_overdue == 0 {
            if config.notifications.enabled {
                // Terminal bell as the audible nudge.
                print!("\x07");
            }
            println!(
                "Overdue: {} action(s), {} goal(s)",
                report.actions.len(),
                report.goals.len()
            );
            for a in &report.actions {
                println!("  action {}  {}", a.id, a.title);
            }
            for g in &report.goals {
                println!("  goal   {}  {}", g.id, g.title);
            }
        } else if total == 0 && previous_overdue > 0 {
            println!("All caught up");
        }
        previous_overdue = total;

        std::thread::sleep(interval);
    }
}

fn print_once(json: bool) -> CliResult {
    let tracker = open_tracker()?;
    let report = tracker.overdue(Utc::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.is_empty() {
        println!("Nothing overdue");
        return Ok(());
    }

    println!(
        "Overdue: {} action(s), {} goal(s)",
        report.actions.len(),
        report.goals.len()
    );
    for a in &report.actions {
        println!("  action {}  {}  (due {})", a.id, a.title, fmt_deadline(a.deadline));
    }
    for g in &report.goals {
        println!(
            "  goal   {}  {}  {}/{}  (due {})",
            g.id,
            g.title,
            g.current,
            g.target,
            g.deadline.format("%Y-%m-%d")
        );
    }
    Ok(())
}

fn fmt_deadline(deadline: Option<chrono::DateTime<Utc>>) -> String {
    deadline
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}
