//! The tracker state holder.
//!
//! Owns the authoritative collections and serializes every mutation:
//! one logical state update per user-triggered operation, no internal
//! locking. Each operation validates, applies the relevant pure function,
//! emits events, and writes the touched collections back to the store
//! (best effort; in-memory state is already updated when a save fails).

use chrono::{DateTime, Utc};
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64;
use std::collections::HashMap;

use crate::deadlines::{self, OverdueReport};
use crate::error::{Result, ValidationError};
use crate::events::Event;
use crate::model::{seed_categories, Action, Category, Goal, Reward, Streak};
use crate::progress;
use crate::rewards::{self, default_rewards};
use crate::storage::{self, keys, StateStore};
use crate::streak;

/// Fields for a new action. The id comes from the caller; the tracker
/// never generates identifiers.
#[derive(Debug, Clone)]
pub struct NewAction {
    pub id: String,
    pub title: String,
    pub category: String,
    pub deadline: Option<DateTime<Utc>>,
}

/// Fields for a new goal.
#[derive(Debug, Clone)]
pub struct NewGoal {
    pub id: String,
    pub title: String,
    pub category: String,
    pub target: u32,
    pub deadline: DateTime<Utc>,
}

/// Single-writer owner of all tracker state.
pub struct Tracker {
    store: Box<dyn StateStore>,
    rng: Box<dyn RngCore>,
    actions: Vec<Action>,
    goals: Vec<Goal>,
    categories: Vec<Category>,
    rewards: Vec<Reward>,
    // Keyed by category id. Streaks live for the process lifetime only and
    // survive the removal of their category.
    streaks: HashMap<String, Streak>,
    events: Vec<Event>,
}

impl Tracker {
    /// Open a tracker over `store` with an entropy-seeded reward roll.
    pub fn open(store: Box<dyn StateStore>) -> Self {
        Self::with_rng(store, Box::new(Pcg64::from_entropy()))
    }

    /// Open a tracker with an injected random source. Tests pass a
    /// deterministic one to pin the reward roll.
    pub fn with_rng(store: Box<dyn StateStore>, rng: Box<dyn RngCore>) -> Self {
        let actions = storage::load_or_default(store.as_ref(), keys::ACTIONS, Vec::new);
        let goals = storage::load_or_default(store.as_ref(), keys::GOALS, Vec::new);
        let categories =
            storage::load_or_default(store.as_ref(), keys::CATEGORIES, seed_categories);
        let rewards = storage::load_or_default(store.as_ref(), keys::REWARDS, default_rewards);

        Self {
            store,
            rng,
            actions,
            goals,
            categories,
            rewards,
            streaks: HashMap::new(),
            events: Vec::new(),
        }
    }

    // Accessors. Collections are read-only from outside; every mutation
    // goes through an operation below.

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn rewards(&self) -> &[Reward] {
        &self.rewards
    }

    pub fn streaks(&self) -> impl Iterator<Item = &Streak> {
        self.streaks.values()
    }

    pub fn streak_for(&self, category_id: &str) -> Option<&Streak> {
        self.streaks.get(category_id)
    }

    /// Drain the pending event queue.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Replace the in-memory streaks with ones replayed from the action
    /// log. Short-lived callers (the CLI) invoke this right after opening;
    /// long-lived ones keep the incrementally maintained map.
    pub fn rebuild_streaks(&mut self) {
        self.streaks = streak::rebuild(&self.actions);
    }

    /// Overdue snapshot at `now`. Pure read; safe to call at any cadence.
    pub fn overdue(&self, now: DateTime<Utc>) -> OverdueReport<'_> {
        deadlines::evaluate(&self.actions, &self.goals, now)
    }

    // Actions

    /// Log a new action and advance (or start) its category streak.
    pub fn log_action(&mut self, new: NewAction, at: DateTime<Utc>) -> Result<&Action> {
        if new.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        self.require_category(&new.category)?;

        let action = Action {
            id: new.id,
            title: new.title,
            category: new.category.clone(),
            logged_at: at,
            deadline: new.deadline,
            completed: false,
        };

        self.events.push(Event::ActionLogged {
            action_id: action.id.clone(),
            category_id: action.category.clone(),
            at,
        });
        self.advance_streak(&new.category, at);

        // Newest first, matching the display order everywhere.
        self.actions.insert(0, action);
        storage::save(self.store.as_ref(), keys::ACTIONS, &self.actions)?;
        Ok(&self.actions[0])
    }

    /// Mark an action completed. Completion is monotonic: repeating the
    /// call is a no-op. A fresh completion rolls the reward unlock chance;
    /// the unlocked reward id is returned when the roll succeeds.
    pub fn complete_action(
        &mut self,
        action_id: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<String>> {
        let action = self
            .actions
            .iter_mut()
            .find(|a| a.id == action_id)
            .ok_or_else(|| ValidationError::UnknownAction(action_id.to_string()))?;

        if action.completed {
            return Ok(None);
        }
        action.completed = true;
        self.events.push(Event::ActionCompleted {
            action_id: action_id.to_string(),
            at,
        });

        let unlocked = rewards::roll_unlock(&mut self.rewards, &mut *self.rng);
        if let Some(reward_id) = &unlocked {
            self.events.push(Event::RewardUnlocked {
                reward_id: reward_id.clone(),
                at,
            });
        }

        storage::save(self.store.as_ref(), keys::ACTIONS, &self.actions)?;
        storage::save(self.store.as_ref(), keys::REWARDS, &self.rewards)?;
        Ok(unlocked)
    }

    /// Edit an action's title and/or deadline. The completed flag and the
    /// creation timestamp are not editable.
    pub fn edit_action(
        &mut self,
        action_id: &str,
        title: Option<String>,
        deadline: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let action = self
            .actions
            .iter_mut()
            .find(|a| a.id == action_id)
            .ok_or_else(|| ValidationError::UnknownAction(action_id.to_string()))?;

        if let Some(title) = title {
            if title.trim().is_empty() {
                return Err(ValidationError::EmptyTitle.into());
            }
            action.title = title;
        }
        if deadline.is_some() {
            action.deadline = deadline;
        }

        storage::save(self.store.as_ref(), keys::ACTIONS, &self.actions)?;
        Ok(())
    }

    pub fn delete_action(&mut self, action_id: &str) -> Result<()> {
        let before = self.actions.len();
        self.actions.retain(|a| a.id != action_id);
        if self.actions.len() == before {
            return Err(ValidationError::UnknownAction(action_id.to_string()).into());
        }
        storage::save(self.store.as_ref(), keys::ACTIONS, &self.actions)?;
        Ok(())
    }

    // Goals

    pub fn add_goal(&mut self, new: NewGoal, at: DateTime<Utc>) -> Result<&Goal> {
        if new.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        if new.target == 0 {
            return Err(ValidationError::ZeroTarget.into());
        }
        self.require_category(&new.category)?;

        let goal = Goal {
            id: new.id,
            title: new.title,
            category: new.category,
            target: new.target,
            current: 0,
            deadline: new.deadline,
            completed: false,
        };
        self.events.push(Event::GoalAdded {
            goal_id: goal.id.clone(),
            at,
        });
        self.goals.push(goal);
        storage::save(self.store.as_ref(), keys::GOALS, &self.goals)?;
        Ok(self.goals.last().expect("goal was just pushed"))
    }

    /// Advance a goal's counter by one, clamped at the target. Once the
    /// goal is complete further calls are suppressed.
    pub fn record_progress(&mut self, goal_id: &str, at: DateTime<Utc>) -> Result<&Goal> {
        let idx = self
            .goals
            .iter()
            .position(|g| g.id == goal_id)
            .ok_or_else(|| ValidationError::UnknownGoal(goal_id.to_string()))?;

        if self.goals[idx].completed {
            return Ok(&self.goals[idx]);
        }

        let (current, target) = (self.goals[idx].current, self.goals[idx].target);
        let next = progress::increment(current, target);
        let projection = progress::project(next, target)?;

        let goal = &mut self.goals[idx];
        goal.current = next;
        goal.completed = projection.completed;

        self.events.push(Event::GoalProgressed {
            goal_id: goal_id.to_string(),
            current: next,
            target,
            at,
        });
        if projection.completed {
            self.events.push(Event::GoalCompleted {
                goal_id: goal_id.to_string(),
                at,
            });
        }

        storage::save(self.store.as_ref(), keys::GOALS, &self.goals)?;
        Ok(&self.goals[idx])
    }

    /// Edit a goal. `current` is clamped to the target and the stored
    /// completed flag is recomputed from the edited counter.
    pub fn edit_goal(
        &mut self,
        goal_id: &str,
        title: Option<String>,
        deadline: Option<DateTime<Utc>>,
        current: Option<u32>,
    ) -> Result<()> {
        let goal = self
            .goals
            .iter_mut()
            .find(|g| g.id == goal_id)
            .ok_or_else(|| ValidationError::UnknownGoal(goal_id.to_string()))?;

        if let Some(title) = title {
            if title.trim().is_empty() {
                return Err(ValidationError::EmptyTitle.into());
            }
            goal.title = title;
        }
        if let Some(deadline) = deadline {
            goal.deadline = deadline;
        }
        if let Some(current) = current {
            goal.current = current.min(goal.target);
            goal.completed = goal.current >= goal.target;
        }

        storage::save(self.store.as_ref(), keys::GOALS, &self.goals)?;
        Ok(())
    }

    pub fn delete_goal(&mut self, goal_id: &str) -> Result<()> {
        let before = self.goals.len();
        self.goals.retain(|g| g.id != goal_id);
        if self.goals.len() == before {
            return Err(ValidationError::UnknownGoal(goal_id.to_string()).into());
        }
        storage::save(self.store.as_ref(), keys::GOALS, &self.goals)?;
        Ok(())
    }

    // Categories

    pub fn add_category(&mut self, category: Category) -> Result<&Category> {
        if category.name.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        self.categories.push(category);
        storage::save(self.store.as_ref(), keys::CATEGORIES, &self.categories)?;
        Ok(self.categories.last().expect("category was just pushed"))
    }

    pub fn rename_category(&mut self, category_id: &str, name: String) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        let category = self
            .categories
            .iter_mut()
            .find(|c| c.id == category_id)
            .ok_or_else(|| ValidationError::UnknownCategory(category_id.to_string()))?;
        category.name = name;
        storage::save(self.store.as_ref(), keys::CATEGORIES, &self.categories)?;
        Ok(())
    }

    /// Remove a category. Refused for the last remaining one; the
    /// category's streak record, if any, stays in memory.
    pub fn remove_category(&mut self, category_id: &str) -> Result<()> {
        if self.categories.len() <= 1 {
            return Err(ValidationError::LastCategory.into());
        }
        let before = self.categories.len();
        self.categories.retain(|c| c.id != category_id);
        if self.categories.len() == before {
            return Err(ValidationError::UnknownCategory(category_id.to_string()).into());
        }
        storage::save(self.store.as_ref(), keys::CATEGORIES, &self.categories)?;
        Ok(())
    }

    // Rewards

    pub fn add_reward(&mut self, reward: Reward) -> Result<&Reward> {
        if reward.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        self.rewards.push(reward);
        storage::save(self.store.as_ref(), keys::REWARDS, &self.rewards)?;
        Ok(self.rewards.last().expect("reward was just pushed"))
    }

    /// Delete a user-created reward. Seed rewards are refused.
    pub fn delete_reward(&mut self, reward_id: &str) -> Result<()> {
        let reward = self
            .rewards
            .iter()
            .find(|r| r.id == reward_id)
            .ok_or_else(|| ValidationError::UnknownReward(reward_id.to_string()))?;
        if reward.is_default {
            return Err(ValidationError::DefaultReward.into());
        }
        self.rewards.retain(|r| r.id != reward_id);
        storage::save(self.store.as_ref(), keys::REWARDS, &self.rewards)?;
        Ok(())
    }

    /// Claim an unlocked reward, locking it again for the next cycle.
    pub fn claim_reward(&mut self, reward_id: &str, at: DateTime<Utc>) -> Result<()> {
        let reward = self
            .rewards
            .iter_mut()
            .find(|r| r.id == reward_id)
            .ok_or_else(|| ValidationError::UnknownReward(reward_id.to_string()))?;
        if !reward.unlocked {
            return Err(ValidationError::RewardLocked(reward_id.to_string()).into());
        }
        reward.unlocked = false;
        self.events.push(Event::RewardClaimed {
            reward_id: reward_id.to_string(),
            at,
        });
        storage::save(self.store.as_ref(), keys::REWARDS, &self.rewards)?;
        Ok(())
    }

    // Internals

    fn require_category(&self, category_id: &str) -> Result<(), ValidationError> {
        if self.categories.iter().any(|c| c.id == category_id) {
            Ok(())
        } else {
            Err(ValidationError::UnknownCategory(category_id.to_string()))
        }
    }

    fn advance_streak(&mut self, category_id: &str, at: DateTime<Utc>) {
        match self.streaks.get(category_id) {
            Some(existing) => {
                let updated = streak::advance(existing, at);
                let event = if updated.current == 1 && existing.current > 0 {
                    Event::StreakReset {
                        category_id: category_id.to_string(),
                        longest: updated.longest,
                        at,
                    }
                } else {
                    Event::StreakAdvanced {
                        category_id: category_id.to_string(),
                        current: updated.current,
                        longest: updated.longest,
                        at,
                    }
                };
                self.events.push(event);
                self.streaks.insert(category_id.to_string(), updated);
            }
            None => {
                self.streaks
                    .insert(category_id.to_string(), streak::seed(category_id, at));
                self.events.push(Event::StreakStarted {
                    category_id: category_id.to_string(),
                    at,
                });
            }
        }
    }
}
