//! CLI command modules and shared helpers.

pub mod action;
pub mod auth;
pub mod category;
pub mod config;
pub mod goal;
pub mod reward;
pub mod status;
pub mod streak;
pub mod suggest;

use chrono::{DateTime, TimeZone, Utc};
use momentum_core::storage::KvDatabase;
use momentum_core::{Event, Tracker};

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the tracker over the default store, with streaks replayed from the
/// action history so short-lived CLI processes still see them.
pub(crate) fn open_tracker() -> Result<Tracker, Box<dyn std::error::Error>> {
    let store = KvDatabase::open()?;
    let mut tracker = Tracker::open(Box::new(store));
    tracker.rebuild_streaks();
    Ok(tracker)
}

/// Resolve a category argument given either as an id or as a
/// case-insensitive display name.
pub(crate) fn resolve_category(
    tracker: &Tracker,
    key: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    tracker
        .categories()
        .iter()
        .find(|c| c.id == key || c.name.eq_ignore_ascii_case(key))
        .map(|c| c.id.clone())
        .ok_or_else(|| format!("unknown category: {key}").into())
}

/// Parse a deadline given as RFC 3339 or as a bare date (midnight UTC).
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    let date = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| format!("invalid date: {raw}"))?;
    Ok(Utc.from_utc_datetime(&midnight))
}

/// Surface the interesting state-change events from the last operation.
pub(crate) fn report_events(tracker: &mut Tracker) {
    let events = tracker.take_events();
    for event in events {
        match event {
            Event::StreakStarted { category_id, .. } => {
                println!("Streak started in {}", category_name(tracker, &category_id));
            }
            Event::StreakAdvanced {
                category_id,
                current,
                ..
            } => {
                println!(
                    "Streak in {}: {current} day(s)",
                    category_name(tracker, &category_id)
                );
            }
            Event::StreakReset {
                category_id,
                longest,
                ..
            } => {
                println!(
                    "Streak in {} reset (longest so far: {longest})",
                    category_name(tracker, &category_id)
                );
            }
            Event::GoalCompleted { goal_id, .. } => {
                let title = tracker
                    .goals()
                    .iter()
                    .find(|g| g.id == goal_id)
                    .map(|g| g.title.clone())
                    .unwrap_or(goal_id);
                println!("Goal completed: {title}");
            }
            Event::RewardUnlocked { reward_id, .. } => {
                let title = tracker
                    .rewards()
                    .iter()
                    .find(|r| r.id == reward_id)
                    .map(|r| r.title.clone())
                    .unwrap_or(reward_id);
                println!("Reward unlocked: {title}");
            }
            _ => {}
        }
    }
}

fn category_name(tracker: &Tracker, category_id: &str) -> String {
    tracker
        .categories()
        .iter()
        .find(|c| c.id == category_id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| category_id.to_string())
}
