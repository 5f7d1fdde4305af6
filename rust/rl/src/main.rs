use anyhow::Result;
use rand::prelude::*;
use std::path::Path;
use tabular_rl::{
    mc_control_exploring_starts, mc_prediction_every_visit, render, value_iteration, RunConfig,
};
use toytext::{blackjack::stick_at, Blackjack, GridWorld};
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => RunConfig::from_file(Path::new(&path))?,
        None => RunConfig::default(),
    };
    info!(config = ?config, "configured");

    let cfg = &config.prediction;
    let env = &mut Blackjack::new(cfg.seed);
    let rng = &mut StdRng::seed_from_u64(cfg.seed);
    let policy = stick_at(cfg.stick_threshold);
    let v = mc_prediction_every_visit(&policy, env, cfg.episodes, cfg.gamma, rng)?;
    for usable_ace in [true, false] {
        println!(
            "Every visit, {} episodes, usable ace: {usable_ace}\n{}\n",
            cfg.episodes,
            render::blackjack_values(&v, usable_ace)
        );
    }

    let cfg = &config.control;
    let env = &mut Blackjack::new(cfg.seed);
    let rng = &mut StdRng::seed_from_u64(cfg.seed);
    let (q, policy) = mc_control_exploring_starts(env, cfg.episodes, cfg.gamma, rng)?;
    for usable_ace in [true, false] {
        println!(
            "Exploring starts, {} episodes, usable ace: {usable_ace}\n{}\n",
            cfg.episodes,
            render::blackjack_policy(&policy, usable_ace)
        );
        println!(
            "V = max Q, usable ace: {usable_ace}\n{}\n",
            render::blackjack_values(&q.state_values(), usable_ace)
        );
    }

    let cfg = &config.value_iteration;
    let gw = GridWorld::new(cfg.rows, cfg.cols, 0);
    let (policy, v) = value_iteration(&gw, cfg.gamma, cfg.theta, cfg.max_iterations)?;
    println!(
        "Grid policy (0=up, 1=right, 2=down, 3=left):\n{}\n",
        render::grid_policy(policy.view(), gw.shape())
    );
    println!(
        "Grid value function:\n{}",
        render::grid_values(v.view(), gw.shape())
    );

    Ok(())
}
