//! Domain records for the tracker.
//!
//! All records serialize with serde for the key-value store; timestamps are
//! UTC and round-trip through RFC 3339. Identifiers are generated at the
//! boundary (the CLI), never inside this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A logged, timestamped accomplishment assigned to a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    /// Unique identifier, externally generated.
    pub id: String,

    /// What was accomplished. Never empty.
    pub title: String,

    /// Category identifier. Checked against the category list when the
    /// action is created, not afterwards.
    pub category: String,

    /// When the action was logged. Immutable.
    pub logged_at: DateTime<Utc>,

    /// Optional deadline. Actions without one are never overdue.
    pub deadline: Option<DateTime<Utc>>,

    /// Transitions false -> true exactly once, never back.
    pub completed: bool,
}

/// A quantitative target with a current count, a deadline, and a completion
/// state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier, externally generated.
    pub id: String,

    /// Goal title.
    pub title: String,

    /// Category identifier.
    pub category: String,

    /// Target count, at least 1, fixed at creation.
    pub target: u32,

    /// Current count, 0 <= current <= target. Non-decreasing through
    /// progress updates; edits may clamp it.
    pub current: u32,

    /// Deadline. Required for goals.
    pub deadline: DateTime<Utc>,

    /// True iff current == target. Stored explicitly; recomputed on every
    /// progress update and edit.
    pub completed: bool,
}

/// A user-defined grouping with a display color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Display color as a hex string (e.g. "#22c55e").
    pub color: String,

    /// Optional icon tag.
    #[serde(default)]
    pub icon: Option<String>,
}

/// An unlockable incentive item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reward {
    /// Unique identifier.
    pub id: String,

    /// Reward title.
    pub title: String,

    /// What the reward grants.
    pub description: String,

    /// Icon tag (e.g. "coffee", "book").
    pub icon: String,

    /// Whether the reward is currently unlocked and claimable.
    pub unlocked: bool,

    /// Seed rewards are marked default and cannot be deleted.
    #[serde(default)]
    pub is_default: bool,
}

/// Per-category count of consecutive qualifying days of activity.
///
/// At most one streak exists per category. Streaks are created lazily on the
/// first action logged in a category and are never deleted, even if their
/// category is later removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Streak {
    /// Category identifier this streak belongs to.
    pub category: String,

    /// Consecutive qualifying days, at least 1 once the streak exists.
    pub current: u32,

    /// Historical maximum. Always >= current; never decreases.
    pub longest: u32,

    /// When the streak was last advanced or reset.
    pub last_activity_at: DateTime<Utc>,
}

/// Categories seeded on first run or when the stored list is unusable.
pub fn seed_categories() -> Vec<Category> {
    vec![
        Category {
            id: "1".to_string(),
            name: "Exercise".to_string(),
            color: "#22c55e".to_string(),
            icon: None,
        },
        Category {
            id: "2".to_string(),
            name: "Learning".to_string(),
            color: "#3b82f6".to_string(),
            icon: None,
        },
        Category {
            id: "3".to_string(),
            name: "Mindfulness".to_string(),
            color: "#a855f7".to_string(),
            icon: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn action_serialization_roundtrip() {
        let action = Action {
            id: "a1".to_string(),
            title: "Morning run".to_string(),
            category: "1".to_string(),
            logged_at: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
            deadline: None,
            completed: false,
        };

        let json = serde_json::to_string(&action).unwrap();
        let decoded: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.id, action.id);
        assert_eq!(decoded.logged_at, action.logged_at);
        assert!(decoded.deadline.is_none());
    }

    #[test]
    fn reward_default_flag_defaults_to_false() {
        let json = r#"{"id":"r1","title":"T","description":"D","icon":"gift","unlocked":false}"#;
        let decoded: Reward = serde_json::from_str(json).unwrap();
        assert!(!decoded.is_default);
    }

    #[test]
    fn seed_categories_are_distinct() {
        let cats = seed_categories();
        assert_eq!(cats.len(), 3);
        let mut ids: Vec<_> = cats.iter().map(|c| c.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }
}
