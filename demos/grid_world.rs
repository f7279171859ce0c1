//! Example: Q-learning on the corridor grid world

use qlearn_agent::QLearner;
use qlearn_core::QLearningConfig;
use qlearn_env::GridWorld;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let env = GridWorld::corridor();
    let states = env.states();
    let shortest = env.shortest_path_len();
    let config = QLearningConfig::default().with_episodes(1000);

    let mut learner = QLearner::new(GridWorld::actions(), states, env, config)?;
    let final_reward = learner.train()?;

    println!("\nFinal episode reward: {final_reward:.2} (shortest path: {shortest:?} steps)");
    println!("{learner}");

    Ok(())
}
