//! Grid World from Sutton & Barto, Example 4.1.
//!
//! The agent moves on a `rows x cols` grid; the top-left and bottom-right
//! cells are terminal. Every move costs -1, moves off the grid leave the
//! agent where it is. Cells are numbered row-major:
//!
//! ```text
//! T  o  o  o
//! o  x  o  o
//! o  o  o  o
//! o  o  o  T
//! ```

use crate::*;
use rand::prelude::*;
use serde_json::json;
use std::rc::Rc;

pub const UP: Discrete = 0;
pub const RIGHT: Discrete = 1;
pub const DOWN: Discrete = 2;
pub const LEFT: Discrete = 3;

#[derive(Debug)]
pub struct GridWorld {
    shape: (usize, usize),
    transitions: Rc<Transitions>,
    rng: StdRng,
    s: Discrete,
    done: bool,
}

impl GridWorld {
    pub fn new(rows: usize, cols: usize, seed: u64) -> Self {
        assert!(rows * cols >= 2, "Grid needs room for two terminal cells.");

        let n_s = rows * cols;
        let mut transitions = Transitions::new();
        for s in 0..n_s {
            let (y, x) = (s / cols, s % cols);
            let terminal = s == 0 || s == n_s - 1;
            for a in [UP, RIGHT, DOWN, LEFT] {
                let t = if terminal {
                    Transition {
                        next_state: s,
                        probability: 1.,
                        reward: 0.,
                        done: true,
                    }
                } else {
                    let next_state = match a {
                        UP if y > 0 => s - cols,
                        RIGHT if x < cols - 1 => s + 1,
                        DOWN if y < rows - 1 => s + cols,
                        LEFT if x > 0 => s - 1,
                        _ => s,
                    };
                    Transition {
                        next_state,
                        probability: 1.,
                        reward: -1.,
                        done: next_state == 0 || next_state == n_s - 1,
                    }
                };
                transitions.insert((s, a), vec![t]);
            }
        }

        Self {
            shape: (rows, cols),
            transitions: Rc::new(transitions),
            rng: StdRng::seed_from_u64(seed),
            s: 0,
            done: true,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    pub fn is_terminal(&self, s: Discrete) -> bool {
        s == 0 || s == self.n_s() - 1
    }
}

impl Default for GridWorld {
    fn default() -> Self {
        Self::new(4, 4, 0)
    }
}

impl Mdp for GridWorld {
    fn n_s(&self) -> usize {
        self.shape.0 * self.shape.1
    }

    fn n_a(&self) -> usize {
        4
    }

    fn transitions(&self) -> Rc<Transitions> {
        Rc::clone(&self.transitions)
    }
}

impl Environment for GridWorld {
    type State = Discrete;

    fn name(&self) -> String {
        format!("GridWorld-{}x{}", self.shape.0, self.shape.1)
    }

    fn n_a(&self) -> usize {
        4
    }

    fn reset(&mut self) -> Discrete {
        self.s = self.rng.gen_range(0..Mdp::n_s(self));
        self.done = false;
        self.s
    }

    fn step(&mut self, action: Discrete) -> Result<StepInfo<Discrete>, EnvError> {
        if self.done {
            return Err(EnvError::EpisodeFinished);
        }
        let ts = self
            .transitions
            .get(&(self.s, action))
            .ok_or(EnvError::InvalidAction { action, n_a: 4 })?;
        let t = pick_next(&mut self.rng, ts).ok_or(EnvError::EmptyDistribution)?;

        self.s = t.next_state;
        self.done = t.done;
        Ok(StepInfo {
            observation: t.next_state,
            reward: t.reward,
            truncated: false,
            terminated: t.done,
            info: json!({ "prob": t.probability }),
        })
    }
}

impl ExploringStarts for GridWorld {
    fn states(&self) -> Vec<Discrete> {
        (0..Mdp::n_s(self)).collect()
    }

    fn set_state(&mut self, s: &Discrete) -> Result<(), EnvError> {
        if *s >= Mdp::n_s(self) {
            return Err(EnvError::InvalidState {
                state: s.to_string(),
                reason: format!("grid has {} cells", Mdp::n_s(self)),
            });
        }
        self.s = *s;
        self.done = false;
        Ok(())
    }
}
