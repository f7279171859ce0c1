//! Tabular Q-learning with a linearly decaying epsilon-greedy policy
//!
//! The learner owns its environment, its action-value table and its random
//! generator. One training pass runs a fixed number of episodes; episode `i`
//! explores with probability `ε_i`, where the `ε_i` run evenly from 1.0 down to
//! 0.0, and every transition is folded into the table with the off-policy
//! update
//!
//! ```text
//! Q(s,a) ← Q(s,a) + α [r + γ Q(s', argmax_a' Q(s',a')) − Q(s,a)]
//! ```

use std::fmt;

use qlearn_core::{
    ActionValueFunction, Environment, EpisodeSummary, QLearningConfig, RLError, Result, Reward,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use crate::table::QTable;
use crate::utils::epsilon_schedule;

/// Q-learning agent (off-policy TD control)
///
/// # Example
///
/// ```
/// use qlearn_agent::QLearner;
/// use qlearn_core::{Environment, QLearningConfig, Result, Step};
///
/// /// One state, one action, every step ends the episode with reward 2.
/// struct Bandit;
///
/// impl Environment for Bandit {
///     type State = ();
///     type Action = ();
///
///     fn reset(&mut self) -> Result<()> {
///         Ok(())
///     }
///
///     fn step(&mut self, _action: ()) -> Result<Step<()>> {
///         Ok(Step::terminal((), 2.0))
///     }
/// }
///
/// let config = QLearningConfig::default().with_alpha(1.0).with_gamma(0.0).with_seed(1);
/// let mut learner = QLearner::new(vec![()], vec![()], Bandit, config).unwrap();
/// assert_eq!(learner.train().unwrap(), 2.0);
/// assert_eq!(learner.value(&(), &()).unwrap(), 2.0);
/// ```
pub struct QLearner<E: Environment> {
    table: QTable<E::State, E::Action>,
    environment: E,
    config: QLearningConfig,
    epsilon: f64,
    rng: StdRng,
}

fn build_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

impl<E: Environment> QLearner<E> {
    /// Create a new Q-learning agent
    ///
    /// # Arguments
    ///
    /// * `actions` - Action domain; its order fixes the greedy tie-break
    /// * `states` - State domain; every state the environment can report
    /// * `environment` - Environment driven during training
    /// * `config` - Discount factor, learning rate, episode count and seed
    ///
    /// # Errors
    ///
    /// [`RLError::Configuration`] when either domain is empty or contains a
    /// duplicate, or when the configuration fails validation.
    pub fn new(
        actions: Vec<E::Action>,
        states: Vec<E::State>,
        environment: E,
        config: QLearningConfig,
    ) -> Result<Self> {
        config.validate()?;
        let table = QTable::new(states, actions)?;
        debug!(
            states = table.n_states(),
            actions = table.n_actions(),
            gamma = config.gamma,
            alpha = config.alpha,
            episodes = config.episodes,
            "created Q-learner"
        );

        Ok(Self {
            table,
            environment,
            rng: build_rng(config.seed),
            config,
            epsilon: 1.0,
        })
    }

    /// Create a learner with the default configuration (γ = 0.9, α = 0.1,
    /// 100 episodes, unseeded)
    pub fn with_defaults(
        actions: Vec<E::Action>,
        states: Vec<E::State>,
        environment: E,
    ) -> Result<Self> {
        Self::new(actions, states, environment, QLearningConfig::default())
    }

    /// Reseed the exploration generator
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.config.seed = Some(seed);
        self
    }

    /// Replace the exploration generator
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Current estimate for a state-action pair
    pub fn value(&self, state: &E::State, action: &E::Action) -> Result<f64> {
        self.table.q_value(state, action)
    }

    /// Overwrite the estimate for a state-action pair
    pub fn set_value(&mut self, state: &E::State, action: &E::Action, value: f64) -> Result<()> {
        self.table.set_q_value(state, action, value)
    }

    /// Greedy action in `state`, earliest action winning ties
    pub fn best_action(&self, state: &E::State) -> Result<E::Action> {
        self.table.greedy_action(state).cloned()
    }

    /// One-step Q-learning update for the transition `(state, action, reward,
    /// next_state)`
    ///
    /// The target always bootstraps from the greedy action in `next_state`,
    /// whatever action the behaviour policy takes next.
    pub fn bellman_update(
        &mut self,
        state: &E::State,
        action: &E::Action,
        reward: f64,
        next_state: &E::State,
    ) -> Result<()> {
        let q = self.table.q_value(state, action)?;
        let next_action = self.table.greedy_action(next_state)?;
        let next_q = self.table.q_value(next_state, next_action)?;
        let target = reward + self.config.gamma * next_q;
        self.table
            .set_q_value(state, action, q + self.config.alpha * (target - q))
    }

    /// Play one episode with the current epsilon, learning from every step
    ///
    /// Runs until the environment reports the end of the episode and returns
    /// the total reward collected. There is no step cap here.
    pub fn run_episode(&mut self) -> Result<f64> {
        self.play_episode().map(|(reward, _)| reward)
    }

    /// Run a full training pass and return the reward of the last episode
    ///
    /// Each episode is reported through `tracing` at INFO level.
    pub fn train(&mut self) -> Result<f64> {
        self.train_with(|_| {})
    }

    /// Run a full training pass, handing every episode's summary to `observer`
    ///
    /// Returns the reward of the last episode. The first error aborts the
    /// remaining episodes.
    pub fn train_with<F>(&mut self, mut observer: F) -> Result<f64>
    where
        F: FnMut(&EpisodeSummary),
    {
        let schedule = epsilon_schedule(self.config.episodes);
        let width = self.config.episodes.to_string().len();
        let mut last_reward = 0.0;

        for (episode, epsilon) in (1..).zip(schedule) {
            self.epsilon = epsilon;
            let (total_reward, steps) = self.play_episode()?;

            info!(
                episode,
                epsilon,
                reward = total_reward,
                steps,
                "iteration {episode:>width$}, ε = {epsilon:.2}, r = {total_reward:7.2}"
            );
            metrics::increment_counter!("qlearn_episodes_total");
            metrics::gauge!("qlearn_epsilon", epsilon);
            metrics::histogram!("qlearn_episode_reward", total_reward);

            observer(&EpisodeSummary {
                episode,
                epsilon,
                total_reward,
                steps,
            });
            last_reward = total_reward;
        }

        Ok(last_reward)
    }

    fn play_episode(&mut self) -> Result<(f64, usize)> {
        let mut current = self.environment.reset()?;
        let mut total = Reward::default();
        let mut steps = 0;

        loop {
            let action = self.select_action(&current)?;
            let step = self.environment.step(action.clone())?;
            total += step.reward;
            steps += 1;
            trace!(?current, ?action, reward = step.reward.value(), next = ?step.state);

            self.bellman_update(&current, &action, step.reward.value(), &step.state)?;
            let last = step.is_last();
            current = step.state;
            if last {
                return Ok((total.value(), steps));
            }
        }
    }

    /// ε-greedy action selection
    fn select_action(&mut self, state: &E::State) -> Result<E::Action> {
        if self.rng.gen::<f64>() >= self.epsilon {
            // Exploit
            self.best_action(state)
        } else {
            // Explore
            let index = self.rng.gen_range(0..self.table.n_actions());
            self.table
                .action_at(index)
                .cloned()
                .ok_or_else(|| RLError::Configuration("action domain is empty".to_string()))
        }
    }

    /// Exploration rate in effect
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Set the exploration rate used by [`run_episode`](Self::run_episode)
    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon.clamp(0.0, 1.0);
    }

    /// The learner's configuration
    #[must_use]
    pub fn config(&self) -> &QLearningConfig {
        &self.config
    }

    /// The action-value table
    #[must_use]
    pub fn table(&self) -> &QTable<E::State, E::Action> {
        &self.table
    }

    /// The environment being trained on
    #[must_use]
    pub fn environment(&self) -> &E {
        &self.environment
    }

    /// Mutable access to the environment
    pub fn environment_mut(&mut self) -> &mut E {
        &mut self.environment
    }

    /// Consume the learner, returning its table and environment
    #[must_use]
    pub fn into_parts(self) -> (QTable<E::State, E::Action>, E) {
        (self.table, self.environment)
    }
}

impl<E> fmt::Display for QLearner<E>
where
    E: Environment,
    E::State: fmt::Display,
    E::Action: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.table, f)
    }
}

impl<E> fmt::Debug for QLearner<E>
where
    E: Environment,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QLearner")
            .field("config", &self.config)
            .field("epsilon", &self.epsilon)
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}
