use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qlearn_agent::QLearner;
use qlearn_core::QLearningConfig;
use qlearn_env::{Cell, GridWorld};

fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_world_training");
    for episodes in [100_usize, 1000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(episodes),
            &episodes,
            |b, &episodes| {
                b.iter(|| {
                    let env = GridWorld::corridor();
                    let states = env.states();
                    let config = QLearningConfig::default()
                        .with_episodes(episodes)
                        .with_seed(17);
                    let mut learner =
                        QLearner::new(GridWorld::actions(), states, env, config).unwrap();
                    black_box(learner.train().unwrap())
                });
            },
        );
    }
    group.finish();
}

fn bench_bellman_update(c: &mut Criterion) {
    let env = GridWorld::corridor();
    let states = env.states();
    let mut learner = QLearner::new(
        GridWorld::actions(),
        states,
        env,
        QLearningConfig::default().with_seed(17),
    )
    .unwrap();
    let (here, there) = (Cell::new(2, 2), Cell::new(2, 3));

    c.bench_function("bellman_update", |b| {
        b.iter(|| {
            learner
                .bellman_update(black_box(&here), &'→', -1.0, black_box(&there))
                .unwrap();
        });
    });
}

criterion_group!(benches, bench_training, bench_bellman_update);
criterion_main!(benches);
