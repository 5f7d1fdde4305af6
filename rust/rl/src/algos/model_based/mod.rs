pub mod vi;

use std::rc::Rc;
use toytext::*;

pub trait MdpSolver<T> {
    fn v_star(&self, s: Discrete) -> Continous;

    fn q_star(&self, s: Discrete, a: Discrete) -> Option<Continous>;

    fn pi_star(&self, s: Discrete) -> Option<Discrete>;

    fn exec(&mut self, theta: Continous, num_iterations: Option<usize>) -> (T, usize);
}

/// Follows the greedy action of a solved MDP.
pub struct MdpSolverPolicy<T> {
    pub mdp_solver: Rc<dyn MdpSolver<T>>,
}

impl<T> Policy<Discrete> for MdpSolverPolicy<T> {
    fn policy(&self, s: &Discrete, _rng: &mut rand::rngs::StdRng) -> Discrete {
        self.mdp_solver.pi_star(*s).unwrap_or_default()
    }
}

/// One-step lookahead: `q(s, a) = sum p * (r + gamma * v[s'] * (1 - done))`.
/// Actions the model has no outcomes for are unavailable and get `-inf`.
pub fn action_values(
    transitions: &Transitions,
    n_a: usize,
    s: Discrete,
    v: &[Continous],
    gamma: Continous,
) -> Vec<Continous> {
    (0..n_a)
        .map(|a| match transitions.get(&(s, a)) {
            Some(ts) if !ts.is_empty() => ts
                .iter()
                .map(|t| {
                    let future = if t.done { 0. } else { gamma * v[t.next_state] };
                    t.probability * (t.reward + future)
                })
                .sum(),
            _ => Continous::NEG_INFINITY,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::*;

    #[test]
    fn test_action_values_ignore_future_of_terminal_outcomes() {
        let gw = GridWorld::default();
        let v = vec![7.; 16];
        let qs = action_values(&gw.transitions(), 4, 1, &v, 1.);
        // up bumps the wall, right/down move on, left enters the terminal corner
        assert_float_eq!(qs, vec![6., 6., 6., -1.], abs_all <= 1e-12);
    }

    #[test]
    fn test_unavailable_actions() {
        let ts = Transitions::from([(
            (0, 1),
            vec![Transition {
                next_state: 0,
                probability: 1.,
                reward: 2.,
                done: true,
            }],
        )]);
        let qs = action_values(&ts, 2, 0, &[0.], 0.9);
        assert_eq!(qs[0], f64::NEG_INFINITY);
        assert_float_eq!(qs[1], 2., abs <= 1e-12);
    }
}
