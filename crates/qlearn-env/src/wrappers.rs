//! Environment wrappers

use qlearn_core::{Environment, Result, Step};

/// Time limit wrapper
///
/// Marks the step that reaches `max_steps` as truncated, which ends the
/// episode for the learner even if the inner environment would keep going.
#[derive(Debug, Clone)]
pub struct TimeLimit<E> {
    /// Inner environment
    pub env: E,
    /// Maximum steps
    pub max_steps: usize,
    /// Current step count
    pub steps: usize,
}

impl<E> TimeLimit<E> {
    /// Create a new time limit wrapper
    pub fn new(env: E, max_steps: usize) -> Self {
        Self {
            env,
            max_steps,
            steps: 0,
        }
    }

    /// Unwrap the inner environment
    pub fn into_inner(self) -> E {
        self.env
    }
}

impl<E> Environment for TimeLimit<E>
where
    E: Environment,
{
    type State = E::State;
    type Action = E::Action;

    fn reset(&mut self) -> Result<Self::State> {
        self.steps = 0;
        self.env.reset()
    }

    fn step(&mut self, action: Self::Action) -> Result<Step<Self::State>> {
        self.steps += 1;
        let mut step = self.env.step(action)?;

        if self.steps >= self.max_steps && !step.done {
            tracing::trace!(steps = self.steps, "episode truncated by time limit");
            step.truncated = true;
        }

        Ok(step)
    }
}
