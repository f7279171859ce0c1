//! Tabular Q-learning agent
//!
//! This crate provides the learner itself:
//! - [`QTable`]: a dense action-value table addressed by state and action
//! - [`QLearner`]: epsilon-greedy Q-learning driving any
//!   [`Environment`](qlearn_core::Environment)
//! - exploration schedules

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod q_learning;
pub mod table;
pub mod utils;

// Re-export agents
pub use q_learning::QLearner;
pub use table::QTable;

// Re-export utilities
pub use utils::{epsilon_schedule, linspace, LinearSchedule, Schedule};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{QLearner, QTable};
    pub use qlearn_core::prelude::*;
}
