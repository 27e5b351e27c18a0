//! Goal progress projection and advancement.
//!
//! Two small pure functions shared by every call site that renders or
//! advances a goal counter. `project` is the only fallible function in the
//! computational core: a zero target has no defined completion ratio.

use crate::error::ValidationError;

/// Completion ratio and flag for a goal counter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Percentage in [0, 100].
    pub percent: f64,
    /// True once current has reached target.
    pub completed: bool,
}

/// Project a current/target counter pair into a completion percentage and
/// flag.
///
/// # Errors
/// Returns [`ValidationError::ZeroTarget`] when `target` is zero; the ratio
/// is undefined and must not silently become NaN or infinity.
pub fn project(current: u32, target: u32) -> Result<Projection, ValidationError> {
    if target == 0 {
        return Err(ValidationError::ZeroTarget);
    }
    Ok(Projection {
        percent: 100.0 * f64::from(current) / f64::from(target),
        completed: current >= target,
    })
}

/// Advance a counter by exactly one, clamped at `target`.
///
/// Calling this again once the counter sits at the target is a no-op, so
/// repeated progress updates on a finished goal never overshoot.
pub fn increment(current: u32, target: u32) -> u32 {
    (current + 1).min(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn project_rejects_zero_target() {
        assert_eq!(project(0, 0), Err(ValidationError::ZeroTarget));
        assert_eq!(project(5, 0), Err(ValidationError::ZeroTarget));
    }

    #[test]
    fn project_at_zero_progress() {
        let p = project(0, 10).unwrap();
        assert_eq!(p.percent, 0.0);
        assert!(!p.completed);
    }

    #[test]
    fn project_at_full_progress() {
        let p = project(10, 10).unwrap();
        assert_eq!(p.percent, 100.0);
        assert!(p.completed);
    }

    #[test]
    fn project_partial_progress() {
        let p = project(1, 4).unwrap();
        assert_eq!(p.percent, 25.0);
        assert!(!p.completed);
    }

    #[test]
    fn increment_clamps_at_target() {
        assert_eq!(increment(2, 3), 3);
        assert_eq!(increment(3, 3), 3);
        assert_eq!(increment(0, 1), 1);
    }

    proptest! {
        #[test]
        fn increment_never_exceeds_target(current in 0u32..1000, target in 1u32..1000) {
            let current = current.min(target);
            prop_assert!(increment(current, target) <= target);
        }

        #[test]
        fn increment_is_idempotent_at_target(target in 1u32..1000) {
            prop_assert_eq!(increment(target, target), target);
            prop_assert_eq!(increment(increment(target, target), target), target);
        }

        #[test]
        fn project_is_total_for_positive_targets(current in 0u32..1000, target in 1u32..1000) {
            let p = project(current, target).unwrap();
            prop_assert!(p.percent.is_finite());
            prop_assert_eq!(p.completed, current >= target);
        }
    }
}
