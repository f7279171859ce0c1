//! Example: Q-learning on the frozen lake
//!
//! Pass a JSON `FrozenLakeConfig` path as the first argument to change the map
//! or slipperiness.

use qlearn_agent::QLearner;
use qlearn_core::QLearningConfig;
use qlearn_env::{FrozenLake, FrozenLakeConfig, TimeLimit};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let lake_config = match std::env::args().nth(1) {
        Some(path) => FrozenLakeConfig::from_file(path)?,
        None => FrozenLakeConfig::default(),
    };
    let lake = FrozenLake::new(lake_config)?;
    let states = lake.states();

    // Greedy play can walk into a wall forever; cap episodes like gym does
    let env = TimeLimit::new(lake, 100);
    let config = QLearningConfig::default().with_episodes(10_000);
    let mut learner = QLearner::new(FrozenLake::actions(), states, env, config)?;

    let mut wins = 0;
    let final_reward = learner.train_with(|summary| {
        if summary.total_reward > 0.0 {
            wins += 1;
        }
    })?;

    println!("Episodes reaching the goal: {wins}");
    println!("Final episode reward: {final_reward:.2}");
    println!("{learner}");

    Ok(())
}
