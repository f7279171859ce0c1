//! Core traits and types for tabular reinforcement learning
//!
//! This crate holds the pieces shared by learners and environments: the
//! environment contract, the state/action bounds, rewards, the learner
//! configuration and the error taxonomy.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod agent;
pub mod environment;
pub mod error;
pub mod reward;
pub mod state;
pub mod value;

// Re-export core traits and types
pub use action::Action;
pub use agent::{EpisodeSummary, QLearningConfig};
pub use environment::{Environment, Step};
pub use error::{KeyKind, RLError, Result};
pub use reward::Reward;
pub use state::State;
pub use value::ActionValueFunction;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Action, ActionValueFunction, Environment, QLearningConfig, RLError, Result, Reward,
        State, Step,
    };
}
