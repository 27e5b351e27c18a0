//! Tracker state-change events.
//!
//! Every mutation on the tracker produces an Event. Callers drain the queue
//! after each operation and decide how to surface it (console line, chime,
//! desktop notification).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ActionLogged {
        action_id: String,
        category_id: String,
        at: DateTime<Utc>,
    },
    ActionCompleted {
        action_id: String,
        at: DateTime<Utc>,
    },
    GoalAdded {
        goal_id: String,
        at: DateTime<Utc>,
    },
    GoalProgressed {
        goal_id: String,
        current: u32,
        target: u32,
        at: DateTime<Utc>,
    },
    /// A progress update just brought the goal to its target.
    GoalCompleted {
        goal_id: String,
        at: DateTime<Utc>,
    },
    /// First activity in a category created its streak record.
    StreakStarted {
        category_id: String,
        at: DateTime<Utc>,
    },
    StreakAdvanced {
        category_id: String,
        current: u32,
        longest: u32,
        at: DateTime<Utc>,
    },
    /// A gap of more than one day reset the streak; longest is preserved.
    StreakReset {
        category_id: String,
        longest: u32,
        at: DateTime<Utc>,
    },
    RewardUnlocked {
        reward_id: String,
        at: DateTime<Utc>,
    },
    RewardClaimed {
        reward_id: String,
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = Event::StreakAdvanced {
            category_id: "1".to_string(),
            current: 3,
            longest: 5,
            at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"StreakAdvanced\""));

        let decoded: Event = serde_json::from_str(&json).unwrap();
        match decoded {
            Event::StreakAdvanced { current, longest, .. } => {
                assert_eq!(current, 3);
                assert_eq!(longest, 5);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
