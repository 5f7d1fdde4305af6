#![allow(dead_code)]

use rand::prelude::*;
use serde_json::Value;
use tabular_rl::*;
use toytext::*;

/// Two-state absorbing chain. From state 0 the episode either ends at once
/// (reward 0) or, with probability `p`, moves to state 1 (reward 1); state 1
/// always ends with reward 2. Analytically V(1) = 2, V(0) = p * (1 + gamma * 2).
pub struct Chain {
    pub p: f64,
    rng: StdRng,
    s: u8,
}

impl Chain {
    pub fn new(p: f64, seed: u64) -> Self {
        Self {
            p,
            rng: StdRng::seed_from_u64(seed),
            s: 0,
        }
    }
}

impl Environment for Chain {
    type State = u8;

    fn name(&self) -> String {
        "Chain".to_string()
    }

    fn n_a(&self) -> usize {
        1
    }

    fn reset(&mut self) -> u8 {
        self.s = 0;
        self.s
    }

    fn step(&mut self, _action: Discrete) -> std::result::Result<StepInfo<u8>, EnvError> {
        let (next, reward, done) = match self.s {
            0 if self.rng.gen_bool(self.p) => (1, 1., false),
            0 => (0, 0., true),
            _ => (1, 2., true),
        };
        self.s = next;
        Ok(StepInfo {
            observation: next,
            reward,
            truncated: false,
            terminated: done,
            info: Value::Null,
        })
    }
}

pub fn total<S>(ep: &[EpisodeEvent<S>]) -> Continous {
    ep.iter().map(|e| e.r).sum()
}
