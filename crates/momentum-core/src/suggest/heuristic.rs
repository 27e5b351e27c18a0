//! Local suggestion heuristic.
//!
//! Works entirely from the snapshot: time-of-day buckets matched against
//! category names, plus a "more of what you already do" pick from recent
//! activity. Used whenever the remote suggester is unavailable or fails.

use chrono::{Duration, FixedOffset, Timelike};
use std::collections::BTreeMap;

use super::{SuggestionContext, SuggestionKind, Suggester, TaskSuggestion};
use crate::error::SuggestError;
use crate::model::Category;

/// Heuristic suggester with a display-timezone offset, since "morning"
/// means the user's morning, not UTC's.
#[derive(Debug, Clone, Default)]
pub struct HeuristicSuggester {
    /// Offset in hours from UTC.
    pub timezone_offset: i32,
}

impl HeuristicSuggester {
    pub fn with_offset(timezone_offset: i32) -> Self {
        Self { timezone_offset }
    }

    fn local_hour(&self, ctx: &SuggestionContext<'_>) -> u32 {
        let offset = FixedOffset::east_opt(self.timezone_offset * 3600)
            .unwrap_or_else(|| FixedOffset::east_opt(0).unwrap());
        ctx.now.with_timezone(&offset).hour()
    }
}

/// Find a category whose name contains any of the fragments,
/// case-insensitively.
fn find_category<'a>(categories: &'a [Category], fragments: &[&str]) -> Option<&'a Category> {
    categories.iter().find(|c| {
        let name = c.name.to_lowercase();
        fragments.iter().any(|f| name.contains(f))
    })
}

fn action(title: &str, category: &Category) -> TaskSuggestion {
    TaskSuggestion {
        title: title.to_string(),
        category: category.id.clone(),
        kind: SuggestionKind::Action,
        target: None,
        deadline: None,
    }
}

impl Suggester for HeuristicSuggester {
    fn suggest(&self, ctx: &SuggestionContext<'_>) -> Result<Vec<TaskSuggestion>, SuggestError> {
        let mut suggestions = Vec::new();
        let hour = self.local_hour(ctx);
        let kind = ctx.kind();

        let exercise = find_category(ctx.categories, &["exercise", "fitness"]);
        let learning = find_category(ctx.categories, &["learning", "study"]);
        let mindfulness = find_category(ctx.categories, &["mindful", "meditation"]);

        // Morning (5-11), afternoon (11-17), evening (17-22).
        if (5..11).contains(&hour) {
            if let Some(cat) = exercise {
                suggestions.push(action("Morning workout routine", cat));
            }
            if let Some(cat) = mindfulness {
                suggestions.push(action("Morning meditation session", cat));
            }
        } else if (11..17).contains(&hour) {
            if let Some(cat) = learning {
                suggestions.push(action("Study session for skill improvement", cat));
            }
            if let Some(cat) = exercise {
                suggestions.push(action("Quick stretching break", cat));
            }
        } else if (17..22).contains(&hour) {
            if let Some(cat) = mindfulness {
                suggestions.push(action("Evening relaxation routine", cat));
            }
            if let Some(cat) = exercise {
                suggestions.push(action("Light evening yoga", cat));
            }
        }

        if kind == SuggestionKind::Goal {
            if let Some(cat) = exercise {
                suggestions.push(TaskSuggestion {
                    title: "Complete weekly exercise routine".to_string(),
                    category: cat.id.clone(),
                    kind: SuggestionKind::Goal,
                    target: Some(3),
                    deadline: Some(ctx.now + Duration::days(7)),
                });
            }
            if let Some(cat) = learning {
                suggestions.push(TaskSuggestion {
                    title: "Finish online course module".to_string(),
                    category: cat.id.clone(),
                    kind: SuggestionKind::Goal,
                    target: Some(5),
                    deadline: Some(ctx.now + Duration::days(14)),
                });
            }
        }

        // Suggest more of what the user already does most.
        let mut frequency: BTreeMap<&str, u32> = BTreeMap::new();
        for a in ctx.recent_actions {
            *frequency.entry(a.category.as_str()).or_insert(0) += 1;
        }
        let most_frequent = frequency
            .iter()
            .max_by_key(|(_, count)| **count)
            .map(|(id, _)| *id);

        if let Some(id) = most_frequent {
            if let Some(cat) = ctx.categories.iter().find(|c| c.id == id) {
                let (target, deadline) = if kind == SuggestionKind::Goal {
                    (Some(5), Some(ctx.now + Duration::days(7)))
                } else {
                    (None, None)
                };
                suggestions.push(TaskSuggestion {
                    title: format!("Continue your progress in {}", cat.name),
                    category: cat.id.clone(),
                    kind,
                    target,
                    deadline,
                });
            }
        }

        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    use crate::model::{seed_categories, Action};

    fn at_hour(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 30, 0).unwrap()
    }

    fn logged(id: &str, category: &str) -> Action {
        Action {
            id: id.to_string(),
            title: "did something".to_string(),
            category: category.to_string(),
            logged_at: at_hour(8),
            deadline: None,
            completed: false,
        }
    }

    fn ctx<'a>(
        categories: &'a [crate::model::Category],
        actions: &'a [Action],
        now: DateTime<Utc>,
        preferred: Option<SuggestionKind>,
    ) -> SuggestionContext<'a> {
        SuggestionContext {
            categories,
            recent_actions: actions,
            goals: &[],
            now,
            preferred_kind: preferred,
        }
    }

    #[test]
    fn morning_suggests_workout_and_meditation() {
        let categories = seed_categories();
        let suggester = HeuristicSuggester::default();
        let ctx = ctx(&categories, &[], at_hour(8), Some(SuggestionKind::Action));
        let suggestions = suggester.suggest(&ctx).unwrap();

        let titles: Vec<_> = suggestions.iter().map(|s| s.title.as_str()).collect();
        assert!(titles.contains(&"Morning workout routine"));
        assert!(titles.contains(&"Morning meditation session"));
    }

    #[test]
    fn afternoon_prefers_learning() {
        let categories = seed_categories();
        let suggester = HeuristicSuggester::default();
        let ctx = ctx(&categories, &[], at_hour(13), Some(SuggestionKind::Action));
        let suggestions = suggester.suggest(&ctx).unwrap();
        assert_eq!(suggestions[0].title, "Study session for skill improvement");
    }

    #[test]
    fn timezone_offset_shifts_buckets() {
        let categories = seed_categories();
        // 23:00 UTC is 08:00 at +9.
        let suggester = HeuristicSuggester::with_offset(9);
        let ctx = ctx(&categories, &[], at_hour(23), Some(SuggestionKind::Action));
        let suggestions = suggester.suggest(&ctx).unwrap();
        assert!(suggestions
            .iter()
            .any(|s| s.title == "Morning workout routine"));
    }

    #[test]
    fn goal_kind_adds_targets_and_deadlines() {
        let categories = seed_categories();
        let suggester = HeuristicSuggester::default();
        let now = at_hour(8);
        let ctx = ctx(&categories, &[], now, Some(SuggestionKind::Goal));
        let suggestions = suggester.suggest(&ctx).unwrap();

        let weekly = suggestions
            .iter()
            .find(|s| s.title == "Complete weekly exercise routine")
            .unwrap();
        assert_eq!(weekly.kind, SuggestionKind::Goal);
        assert_eq!(weekly.target, Some(3));
        assert_eq!(weekly.deadline, Some(now + Duration::days(7)));
    }

    #[test]
    fn most_frequent_category_is_suggested() {
        let categories = seed_categories();
        let suggester = HeuristicSuggester::default();
        let actions = vec![logged("a1", "2"), logged("a2", "2"), logged("a3", "1")];
        // 23:30 local falls outside every time bucket, isolating the
        // frequency suggestion.
        let ctx = ctx(&categories, &actions, at_hour(23), Some(SuggestionKind::Action));
        let suggestions = suggester.suggest(&ctx).unwrap();

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].category, "2");
        assert_eq!(suggestions[0].title, "Continue your progress in Learning");
    }

    #[test]
    fn unmatched_categories_yield_no_bucket_suggestions() {
        let categories = vec![crate::model::Category {
            id: "x".to_string(),
            name: "Chores".to_string(),
            color: "#000000".to_string(),
            icon: None,
        }];
        let suggester = HeuristicSuggester::default();
        let ctx = ctx(&categories, &[], at_hour(8), Some(SuggestionKind::Action));
        let suggestions = suggester.suggest(&ctx).unwrap();
        assert!(suggestions.is_empty());
    }
}
