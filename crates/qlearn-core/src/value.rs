//! Action-value functions

use crate::{Action, State};

/// Action value function Q(s, a) over finite state and action domains
pub trait ActionValueFunction {
    /// State type
    type State: State;
    /// Action type
    type Action: Action;

    /// Current estimate for taking `action` in `state`
    fn q_value(&self, state: &Self::State, action: &Self::Action) -> crate::Result<f64>;

    /// Overwrite the estimate for a state-action pair
    fn set_q_value(
        &mut self,
        state: &Self::State,
        action: &Self::Action,
        value: f64,
    ) -> crate::Result<()>;

    /// The greedy action in `state` together with its value
    fn best_action_value(&self, state: &Self::State) -> crate::Result<(&Self::Action, f64)>;

    /// The largest estimate available in `state`
    fn max_q_value(&self, state: &Self::State) -> crate::Result<f64> {
        self.best_action_value(state).map(|(_, value)| value)
    }
}
