//! Reference environments for tabular reinforcement learning
//!
//! This crate provides:
//! - [`GridWorld`]: a deterministic grid with -1 per step
//! - [`FrozenLake`]: the classic frozen lake, optionally slippery
//! - [`TimeLimit`]: a wrapper that truncates long episodes

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod frozen_lake;
pub mod grid_world;
pub mod wrappers;

// Re-export environments
pub use frozen_lake::{FrozenLake, FrozenLakeConfig};
pub use grid_world::{Cell, GridWorld, Move};
pub use wrappers::TimeLimit;

// Re-export core types
pub use qlearn_core::{Environment, Reward, Step};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Cell, FrozenLake, FrozenLakeConfig, GridWorld, TimeLimit};
    pub use qlearn_core::prelude::*;
}
