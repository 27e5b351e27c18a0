//! Overdue detection for actions and goals.
//!
//! Runs on every mutation and on a polling interval, so it must stay a
//! cheap single pass over the in-memory collections.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Action, Goal};

/// Overdue records partitioned out of a snapshot, in input order.
#[derive(Debug, Serialize)]
pub struct OverdueReport<'a> {
    /// Incomplete actions whose deadline has passed.
    pub actions: Vec<&'a Action>,
    /// Incomplete goals whose deadline has passed.
    pub goals: Vec<&'a Goal>,
}

impl OverdueReport<'_> {
    /// Total number of overdue records.
    pub fn total(&self) -> usize {
        self.actions.len() + self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty() && self.goals.is_empty()
    }
}

/// Partition actions and goals into overdue vs. not, relative to `now`.
///
/// A record is overdue iff it is not completed, has a deadline, and that
/// deadline lies strictly before `now`. Records without a deadline are
/// simply excluded. Total function; a stable filter that preserves input
/// order.
pub fn evaluate<'a>(
    actions: &'a [Action],
    goals: &'a [Goal],
    now: DateTime<Utc>,
) -> OverdueReport<'a> {
    let overdue_actions = actions
        .iter()
        .filter(|a| !a.completed && a.deadline.is_some_and(|d| d < now))
        .collect();
    let overdue_goals = goals
        .iter()
        .filter(|g| !g.completed && g.deadline < now)
        .collect();

    OverdueReport {
        actions: overdue_actions,
        goals: overdue_goals,
    }
}
