//! Task suggestion strategies.
//!
//! Two interchangeable strategies sit behind the [`Suggester`] trait: a
//! remote model call and a local time-of-day heuristic. The engine picks
//! the remote one when it is configured and the app is online, and falls
//! back to the heuristic on any remote failure, so suggestions always
//! degrade to something usable.

pub mod heuristic;
pub mod remote;

pub use heuristic::HeuristicSuggester;
pub use remote::RemoteSuggester;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SuggestError;
use crate::model::{Action, Category, Goal};
use crate::storage::SuggestionsConfig;

/// Whether a suggestion proposes a one-off action or a counted goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Action,
    Goal,
}

/// A proposed action or goal, ready to prefill a create operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSuggestion {
    pub title: String,
    /// Category identifier, always one that exists in the context.
    pub category: String,
    pub kind: SuggestionKind,
    /// Target count; only meaningful for goal suggestions.
    #[serde(default)]
    pub target: Option<u32>,
    /// Proposed deadline; only meaningful for goal suggestions.
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
}

/// Snapshot of tracker state a suggester may draw on.
pub struct SuggestionContext<'a> {
    pub categories: &'a [Category],
    pub recent_actions: &'a [Action],
    pub goals: &'a [Goal],
    pub now: DateTime<Utc>,
    /// Forced suggestion kind; derived from the goal list when None.
    pub preferred_kind: Option<SuggestionKind>,
}

impl SuggestionContext<'_> {
    /// Users without goals get goal suggestions; everyone else gets actions,
    /// unless the caller forces a kind.
    pub fn kind(&self) -> SuggestionKind {
        self.preferred_kind.unwrap_or(if self.goals.is_empty() {
            SuggestionKind::Goal
        } else {
            SuggestionKind::Action
        })
    }
}

/// A source of task suggestions.
pub trait Suggester {
    fn suggest(&self, ctx: &SuggestionContext<'_>) -> Result<Vec<TaskSuggestion>, SuggestError>;
}

/// Strategy selector over {remote, heuristic}.
pub struct SuggestionEngine {
    remote: Option<RemoteSuggester>,
    heuristic: HeuristicSuggester,
}

impl SuggestionEngine {
    pub fn new(remote: Option<RemoteSuggester>, heuristic: HeuristicSuggester) -> Self {
        Self { remote, heuristic }
    }

    /// Build the engine from configuration: remote only when an API key is
    /// present and the connectivity flag allows it.
    pub fn from_config(config: &SuggestionsConfig) -> Self {
        let remote = if config.remote_available() {
            RemoteSuggester::from_config(config)
        } else {
            None
        };
        Self::new(remote, HeuristicSuggester::default())
    }

    /// Produce suggestions. Never fails: remote errors and empty remote
    /// replies fall back to the heuristic.
    pub fn suggest(&self, ctx: &SuggestionContext<'_>) -> Vec<TaskSuggestion> {
        if let Some(remote) = &self.remote {
            if let Ok(suggestions) = remote.suggest(ctx) {
                if !suggestions.is_empty() {
                    return suggestions;
                }
            }
        }
        self.heuristic.suggest(ctx).unwrap_or_default()
    }
}
