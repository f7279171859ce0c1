//! Environment traits and types

use crate::{Action, Reward, State};

/// Result of a single environment step
#[derive(Debug, Clone, PartialEq)]
pub struct Step<S> {
    /// Successor state
    pub state: S,
    /// Reward for the transition
    pub reward: Reward,
    /// Whether the episode terminated
    pub done: bool,
    /// Whether the episode was cut short by a wrapper (e.g., time limit)
    pub truncated: bool,
}

impl<S> Step<S> {
    /// A non-final transition
    pub fn transition(state: S, reward: impl Into<Reward>) -> Self {
        Self {
            state,
            reward: reward.into(),
            done: false,
            truncated: false,
        }
    }

    /// A transition that terminates the episode
    pub fn terminal(state: S, reward: impl Into<Reward>) -> Self {
        Self {
            state,
            reward: reward.into(),
            done: true,
            truncated: false,
        }
    }

    /// Whether this step ends the episode, either naturally or by truncation
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.done || self.truncated
    }
}

/// Core environment trait
///
/// The learner only ever calls [`reset`](Environment::reset) at the start of
/// an episode and [`step`](Environment::step) until a step reports the end of
/// the episode. An environment that never terminates keeps the learner in
/// that loop; wrap it in a time limit if that matters to the caller.
pub trait Environment {
    /// State type
    type State: State;
    /// Action type
    type Action: Action;

    /// Re-initialise the environment and return the starting state
    fn reset(&mut self) -> crate::Result<Self::State>;

    /// Apply an action to the current state
    ///
    /// Actions the environment does not understand should be reported as
    /// [`RLError::InvalidAction`](crate::RLError::InvalidAction).
    fn step(&mut self, action: Self::Action) -> crate::Result<Step<Self::State>>;
}

impl<E> Environment for &mut E
where
    E: Environment + ?Sized,
{
    type State = E::State;
    type Action = E::Action;

    fn reset(&mut self) -> crate::Result<Self::State> {
        (**self).reset()
    }

    fn step(&mut self, action: Self::Action) -> crate::Result<Step<Self::State>> {
        (**self).step(action)
    }
}

impl<E> Environment for Box<E>
where
    E: Environment + ?Sized,
{
    type State = E::State;
    type Action = E::Action;

    fn reset(&mut self) -> crate::Result<Self::State> {
        (**self).reset()
    }

    fn step(&mut self, action: Self::Action) -> crate::Result<Step<Self::State>> {
        (**self).step(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RLError;

    /// Counts down to zero, one unit per step
    struct Countdown {
        from: u32,
        left: u32,
    }

    impl Environment for Countdown {
        type State = u32;
        type Action = bool;

        fn reset(&mut self) -> crate::Result<u32> {
            self.left = self.from;
            Ok(self.left)
        }

        fn step(&mut self, action: bool) -> crate::Result<Step<u32>> {
            if !action {
                return Err(RLError::InvalidAction("false".to_string()));
            }
            self.left -= 1;
            if self.left == 0 {
                Ok(Step::terminal(0, 1.0))
            } else {
                Ok(Step::transition(self.left, 0.0))
            }
        }
    }

    fn reset_then_step<E>(mut env: E) -> Step<u32>
    where
        E: Environment<State = u32, Action = bool>,
    {
        env.reset().unwrap();
        env.step(true).unwrap()
    }

    #[test]
    fn borrowed_and_boxed_environments_forward_calls() {
        let mut env = Countdown { from: 2, left: 0 };
        let step = reset_then_step(&mut env);
        assert!(!step.is_last());
        assert_eq!(env.left, 1);

        let last = reset_then_step(Box::new(Countdown { from: 1, left: 0 }));
        assert!(last.done);
        assert!(last.is_last());
        assert_eq!(last.reward, Reward(1.0));
    }

    #[test]
    fn environment_errors_surface_unchanged() {
        let mut env = Countdown { from: 3, left: 0 };
        env.reset().unwrap();
        assert!(matches!(env.step(false), Err(RLError::InvalidAction(_))));
    }

    #[test]
    fn truncated_steps_end_the_episode() {
        let step = Step {
            state: 4_u32,
            reward: Reward(0.0),
            done: false,
            truncated: true,
        };
        assert!(step.is_last());
        assert!(!Step::transition(4_u32, 0.0).is_last());
    }
}
