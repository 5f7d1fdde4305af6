use super::*;
use crate::error::*;
use ndarray::{Array1, Array2, ArrayView1};
use tracing::{debug, info, warn};

/// Value iteration - Sutton & Barto 2018, 4.4.
///
/// Sweeps update `v` in place. The greedy policy breaks ties towards the
/// lowest action index.
#[derive(Clone)]
pub struct ValueIteration {
    gamma: Continous,
    n_s: usize,
    n_a: usize,
    transitions: Rc<Transitions>,
    v: Array1<Continous>,
    delta: Continous,
}

impl ValueIteration {
    pub fn new(mdp: &dyn Mdp, gamma: Continous) -> Self {
        Self {
            gamma,
            n_s: mdp.n_s(),
            n_a: mdp.n_a(),
            transitions: mdp.transitions(),
            v: Array1::zeros(mdp.n_s()),
            delta: Continous::INFINITY,
        }
    }

    pub fn v(&self) -> ArrayView1<Continous> {
        self.v.view()
    }

    /// Largest change of the last sweep.
    pub fn delta(&self) -> Continous {
        self.delta
    }

    /// Runs one sweep over all states and returns its delta.
    pub fn sweep(&mut self) -> Continous {
        let mut delta: Continous = 0.;
        for s in 0..self.n_s {
            let best = self.best_action_value(s);
            delta = delta.max((best - self.v[s]).abs());
            self.v[s] = best;
        }
        self.delta = delta;
        delta
    }

    /// One-hot greedy policy, shape `[n_s, n_a]`.
    pub fn policy(&self) -> Array2<Continous> {
        let mut policy = Array2::zeros((self.n_s, self.n_a));
        for s in 0..self.n_s {
            policy[[s, self.greedy_action(s)]] = 1.;
        }
        policy
    }

    fn action_values(&self, s: Discrete) -> Vec<Continous> {
        let v = self.v.as_slice().unwrap_or(&[]);
        action_values(&self.transitions, self.n_a, s, v, self.gamma)
    }

    /// States without any available action keep a value of 0.
    fn best_action_value(&self, s: Discrete) -> Continous {
        let qs = self.action_values(s);
        let best = qs[argmax(&qs)];
        if best.is_finite() {
            best
        } else {
            0.
        }
    }

    fn greedy_action(&self, s: Discrete) -> Discrete {
        argmax(&self.action_values(s))
    }
}

impl MdpSolver<bool> for ValueIteration {
    fn v_star(&self, s: Discrete) -> Continous {
        self.v.get(s).copied().unwrap_or_default()
    }

    fn q_star(&self, s: Discrete, a: Discrete) -> Option<Continous> {
        if s >= self.n_s || a >= self.n_a {
            return None;
        }
        Some(self.action_values(s)[a]).filter(|q| q.is_finite())
    }

    fn pi_star(&self, s: Discrete) -> Option<Discrete> {
        if s >= self.n_s {
            return None;
        }
        Some(self.greedy_action(s))
    }

    /// Sweeps until the delta drops below `theta` or `num_iterations` sweeps
    /// ran. Returns whether it converged and the number of sweeps.
    fn exec(&mut self, theta: Continous, num_iterations: Option<usize>) -> (bool, usize) {
        let mut iterations = 0;
        loop {
            if num_iterations.is_some_and(|n| iterations >= n) {
                return (false, iterations);
            }

            let delta = self.sweep();
            iterations += 1;
            debug!(iteration = iterations, delta, "value iteration sweep");

            if delta < theta {
                return (true, iterations);
            }
        }
    }
}

/// Solves `mdp` and returns the greedy policy `[n_s, n_a]` with the optimal
/// state values. `max_iterations` caps the sweeps.
pub fn value_iteration(
    mdp: &dyn Mdp,
    gamma: Continous,
    theta: Continous,
    max_iterations: usize,
) -> Result<(Array2<Continous>, Array1<Continous>)> {
    let mut vi = ValueIteration::new(mdp, gamma);
    let (converged, iterations) = vi.exec(theta, Some(max_iterations));
    if !converged {
        warn!(iterations, delta = vi.delta(), "value iteration did not converge");
        return Err(RlError::NotConverged {
            iterations,
            delta: vi.delta(),
        });
    }
    info!(iterations, states = mdp.n_s(), "value iteration converged");

    Ok((vi.policy(), vi.v))
}
