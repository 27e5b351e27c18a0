//! Reward seeding and the probabilistic unlock roll.
//!
//! Completing an action gives a 30% chance of unlocking one uniformly
//! chosen, currently locked reward. The random source is injected by the
//! caller so the roll stays deterministic under test.

use rand::Rng;

use crate::model::Reward;

/// Probability that completing an action unlocks a reward.
pub const UNLOCK_CHANCE: f64 = 0.3;

/// Rewards seeded on first run or when the stored list is unusable.
pub fn default_rewards() -> Vec<Reward> {
    let seed = [
        ("1", "Netflix Time", "Enjoy 1 hour of Netflix", "video"),
        ("2", "Gaming Break", "30 minutes of gaming", "gamepad"),
        ("3", "Coffee Break", "Treat yourself to a nice coffee", "coffee"),
        ("4", "Reading Time", "30 minutes of reading your favorite book", "book"),
    ];

    seed.into_iter()
        .map(|(id, title, description, icon)| Reward {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            unlocked: false,
            is_default: true,
        })
        .collect()
}

/// Roll the unlock chance and, on success, unlock one uniformly random
/// locked reward in place. Returns the unlocked reward's id, or None when
/// the roll fails or every reward is already unlocked.
pub fn roll_unlock<R: Rng + ?Sized>(rewards: &mut [Reward], rng: &mut R) -> Option<String> {
    if !rng.gen_bool(UNLOCK_CHANCE) {
        return None;
    }

    let locked: Vec<usize> = rewards
        .iter()
        .enumerate()
        .filter(|(_, r)| !r.unlocked)
        .map(|(i, _)| i)
        .collect();
    if locked.is_empty() {
        return None;
    }

    let picked = locked[rng.gen_range(0..locked.len())];
    rewards[picked].unlocked = true;
    Some(rewards[picked].id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    // All-zero output makes gen_bool(0.3) succeed and gen_range pick index 0;
    // all-ones output makes gen_bool(0.3) fail.
    fn always() -> StepRng {
        StepRng::new(0, 0)
    }

    fn never() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    #[test]
    fn failed_roll_unlocks_nothing() {
        let mut rewards = default_rewards();
        let unlocked = roll_unlock(&mut rewards, &mut never());
        assert!(unlocked.is_none());
        assert!(rewards.iter().all(|r| !r.unlocked));
    }

    #[test]
    fn successful_roll_unlocks_one_locked_reward() {
        let mut rewards = default_rewards();
        let unlocked = roll_unlock(&mut rewards, &mut always());
        assert_eq!(unlocked.as_deref(), Some("1"));
        assert_eq!(rewards.iter().filter(|r| r.unlocked).count(), 1);
    }

    #[test]
    fn successful_roll_skips_already_unlocked_rewards() {
        let mut rewards = default_rewards();
        rewards[0].unlocked = true;
        let unlocked = roll_unlock(&mut rewards, &mut always());
        assert_eq!(unlocked.as_deref(), Some("2"));
    }

    #[test]
    fn roll_with_everything_unlocked_is_a_no_op() {
        let mut rewards = default_rewards();
        for r in &mut rewards {
            r.unlocked = true;
        }
        assert!(roll_unlock(&mut rewards, &mut always()).is_none());
    }

    #[test]
    fn default_rewards_are_locked_and_non_deletable() {
        let rewards = default_rewards();
        assert_eq!(rewards.len(), 4);
        assert!(rewards.iter().all(|r| !r.unlocked && r.is_default));
    }
}
