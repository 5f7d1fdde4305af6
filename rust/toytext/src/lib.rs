extern crate rand;
extern crate serde;
extern crate serde_json;

pub mod blackjack;
pub mod common;
pub mod error;
pub mod grid_world;

pub use blackjack::{Blackjack, BlackjackState};
pub use common::defs::*;
pub use common::utils::*;
pub use error::EnvError;
pub use grid_world::GridWorld;

use serde_json::Value;
use std::collections::HashMap;

pub type Discrete = usize;
pub type Continous = f64;

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next_state: Discrete,
    pub probability: Continous,
    pub reward: Continous,
    pub done: bool,
}

/// Full model of a finite MDP, keyed by `(state, action)`.
pub type Transitions = HashMap<(Discrete, Discrete), Vec<Transition>>;

#[derive(Debug, Clone)]
pub struct StepInfo<S> {
    pub observation: S,
    pub reward: Continous,
    pub truncated: bool,
    pub terminated: bool,
    pub info: Value,
}

impl<S> StepInfo<S> {
    pub fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }
}
