//! Suggestion command.

use chrono::Utc;
use momentum_core::storage::Config;
use momentum_core::suggest::{SuggestionContext, SuggestionEngine, SuggestionKind};

use super::{open_tracker, CliResult};

pub fn run(goals: bool, json: bool) -> CliResult {
    let tracker = open_tracker()?;
    let config = Config::load_or_default();
    let engine = SuggestionEngine::from_config(&config.suggestions);

    let recent: Vec<_> = tracker.actions().iter().take(5).cloned().collect();
    let ctx = SuggestionContext {
        categories: tracker.categories(),
        recent_actions: &recent,
        goals: tracker.goals(),
        now: Utc::now(),
        preferred_kind: goals.then_some(SuggestionKind::Goal),
    };

    let suggestions = engine.suggest(&ctx);

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }

    if suggestions.is_empty() {
        println!("No suggestions right now");
        return Ok(());
    }

    for s in suggestions {
        let category = tracker
            .categories()
            .iter()
            .find(|c| c.id == s.category)
            .map(|c| c.name.as_str())
            .unwrap_or("?");
        match s.kind {
            SuggestionKind::Action => println!("action  [{category}]  {}", s.title),
            SuggestionKind::Goal => {
                let target = s.target.map(|t| t.to_string()).unwrap_or_else(|| "1".into());
                let due = s
                    .deadline
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".into());
                println!("goal    [{category}]  {}  (target {target}, due {due})", s.title);
            }
        }
    }
    Ok(())
}
