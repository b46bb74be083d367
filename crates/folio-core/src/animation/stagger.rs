#![forbid(unsafe_code)]

//! Stagger utilities: coordinated delay offsets for animation lists.
//!
//! A [`StaggerPlan`] describes how a container reveals its children: wait
//! `delay_children`, then start each child `stagger_children` after the
//! previous one. [`stagger_offsets`] is the underlying distribution.
//!
//! # Invariants
//!
//! 1. `stagger_offsets(0, ..)` returns an empty vec.
//! 2. The first offset is always `Duration::ZERO`.
//! 3. Offsets are monotonically non-decreasing.
//! 4. For `Linear`, `offset[i] = i * delay` exactly (integer arithmetic).

use std::time::Duration;

use super::{EasingFn, ease_in, ease_out};

/// How to distribute delay offsets across items.
#[derive(Debug, Clone, Copy)]
pub enum StaggerMode {
    /// Equal spacing: offset[i] = i * delay.
    Linear,
    /// Slow start, accelerating gaps.
    EaseIn,
    /// Fast start, decelerating gaps.
    EaseOut,
    /// Custom easing function applied to normalized position.
    Custom(EasingFn),
}

/// Compute stagger delay offsets for `count` items.
///
/// For eased modes the total span is `(count - 1) * delay` but the
/// distribution follows the easing curve.
#[must_use]
pub fn stagger_offsets(count: usize, delay: Duration, mode: StaggerMode) -> Vec<Duration> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![Duration::ZERO];
    }

    let easing: EasingFn = match mode {
        StaggerMode::Linear => {
            return (0..count)
                .map(|i| delay.saturating_mul(i as u32))
                .collect();
        }
        StaggerMode::EaseIn => ease_in,
        StaggerMode::EaseOut => ease_out,
        StaggerMode::Custom(f) => f,
    };

    let total_nanos = delay.as_nanos() as f64 * (count - 1) as f64;
    (0..count)
        .map(|i| {
            let t = i as f32 / (count - 1) as f32;
            Duration::from_nanos((total_nanos * easing(t) as f64) as u64)
        })
        .collect()
}

/// Container-level reveal timing for a list of children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaggerPlan {
    /// Wait before the first child starts.
    pub delay_children: Duration,
    /// Gap between consecutive children.
    pub stagger_children: Duration,
}

impl StaggerPlan {
    /// Create a plan.
    #[must_use]
    pub const fn new(delay_children: Duration, stagger_children: Duration) -> Self {
        Self {
            delay_children,
            stagger_children,
        }
    }

    /// Start offset of the child at `index`.
    #[must_use]
    pub fn offset(&self, index: usize) -> Duration {
        self.delay_children
            .saturating_add(self.stagger_children.saturating_mul(index as u32))
    }

    /// Start offsets for `count` children.
    #[must_use]
    pub fn offsets(&self, count: usize) -> Vec<Duration> {
        stagger_offsets(count, self.stagger_children, StaggerMode::Linear)
            .into_iter()
            .map(|d| d.saturating_add(self.delay_children))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn empty_and_single() {
        assert!(stagger_offsets(0, MS_100, StaggerMode::Linear).is_empty());
        assert_eq!(
            stagger_offsets(1, MS_100, StaggerMode::EaseOut),
            vec![Duration::ZERO]
        );
    }

    #[test]
    fn linear_is_exact() {
        let offsets = stagger_offsets(4, MS_100, StaggerMode::Linear);
        assert_eq!(
            offsets,
            vec![
                Duration::ZERO,
                MS_100,
                Duration::from_millis(200),
                Duration::from_millis(300)
            ]
        );
    }

    #[test]
    fn eased_offsets_are_monotone() {
        for mode in [StaggerMode::EaseIn, StaggerMode::EaseOut] {
            let offsets = stagger_offsets(8, MS_100, mode);
            assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
            assert_eq!(offsets[0], Duration::ZERO);
        }
    }

    #[test]
    fn plan_adds_container_delay() {
        let plan = StaggerPlan::new(Duration::from_millis(200), MS_100);
        assert_eq!(plan.offset(0), Duration::from_millis(200));
        assert_eq!(plan.offset(3), Duration::from_millis(500));
        assert_eq!(plan.offsets(3)[2], Duration::from_millis(400));
    }
}
