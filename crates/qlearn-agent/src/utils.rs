//! Exploration schedules

/// Trait for schedules (e.g., for epsilon decay)
pub trait Schedule {
    /// Get value at step t
    fn value(&self, t: usize) -> f64;
}

/// Linear schedule that decays from start to end over steps
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSchedule {
    /// Starting value
    pub start: f64,
    /// Ending value
    pub end: f64,
    /// Number of steps for decay
    pub steps: usize,
}

impl LinearSchedule {
    /// Create a new linear schedule
    #[must_use]
    pub fn new(start: f64, end: f64, steps: usize) -> Self {
        Self { start, end, steps }
    }

    /// Schedule whose `points` values run evenly from `start` to `end`, both
    /// endpoints included
    #[must_use]
    pub fn with_points(start: f64, end: f64, points: usize) -> Self {
        Self::new(start, end, points.saturating_sub(1))
    }
}

impl Schedule for LinearSchedule {
    #[allow(clippy::cast_precision_loss)]
    fn value(&self, t: usize) -> f64 {
        if self.steps == 0 {
            // A single point carries the starting value
            if t == 0 {
                self.start
            } else {
                self.end
            }
        } else if t >= self.steps {
            self.end
        } else {
            let progress = t as f64 / self.steps as f64;
            self.start + (self.end - self.start) * progress
        }
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive
///
/// A single value is just `start`; zero values is empty.
#[must_use]
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    let schedule = LinearSchedule::with_points(start, end, n);
    (0..n).map(|t| schedule.value(t)).collect()
}

/// Per-episode exploration rates for a training run of `episodes` episodes
///
/// The first episode is fully exploratory and the last fully greedy.
#[must_use]
pub fn epsilon_schedule(episodes: usize) -> Vec<f64> {
    linspace(1.0, 0.0, episodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn linear_schedule_hits_both_endpoints() {
        let schedule = LinearSchedule::new(1.0, 0.0, 4);
        assert_eq!(schedule.value(0), 1.0);
        assert_abs_diff_eq!(schedule.value(1), 0.75);
        assert_abs_diff_eq!(schedule.value(2), 0.5);
        assert_eq!(schedule.value(4), 0.0);
        assert_eq!(schedule.value(40), 0.0);
    }

    #[test]
    fn linspace_matches_hand_computed_points() {
        let values = linspace(1.0, 0.0, 5);
        assert_eq!(values.len(), 5);
        for (value, expected) in values.iter().zip([1.0, 0.75, 0.5, 0.25, 0.0]) {
            assert_abs_diff_eq!(*value, expected);
        }
    }

    #[test]
    fn degenerate_lengths() {
        assert!(linspace(1.0, 0.0, 0).is_empty());
        assert_eq!(epsilon_schedule(1), vec![1.0]);
        assert_eq!(epsilon_schedule(2), vec![1.0, 0.0]);
    }

    proptest! {
        #[test]
        fn epsilon_schedule_is_monotone_from_one_to_zero(n in 2usize..2000) {
            let values = epsilon_schedule(n);
            prop_assert_eq!(values.len(), n);
            prop_assert_eq!(values[0], 1.0);
            prop_assert_eq!(values[n - 1], 0.0);
            for pair in values.windows(2) {
                prop_assert!(pair[1] <= pair[0]);
                prop_assert!((0.0..=1.0).contains(&pair[1]));
            }
        }
    }
}
