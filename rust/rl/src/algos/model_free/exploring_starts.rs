//! Monte Carlo control with exploring starts (Sutton & Barto 2018, 5.3).
//!
//! Every episode begins in a state drawn uniformly from the environment's
//! start states, so every state keeps being explored even though the policy
//! itself is greedy. Action values are first-visit averages; the policy of a
//! state becomes one-hot on `argmax Q(s, .)` as soon as any of its action
//! values changes. Ties go to the lowest action index.

use crate::episode::*;
use crate::error::*;
use crate::tables::*;
use rand::prelude::*;
use std::fmt::Debug;
use std::hash::Hash;
use toytext::{argmax, Continous, Discrete, ExploringStarts};
use tracing::{debug, info};

const PROGRESS_EVERY: usize = 100_000;

/// State of one control run: action values, the policy being improved and the
/// returns behind each action value.
pub struct McControl<S> {
    gamma: Continous,
    q: ActionValue<S>,
    policy: StochasticPolicy<S>,
    returns: Returns<(S, Discrete)>,
    only: Option<S>,
}

impl<S> McControl<S>
where
    S: Clone + Eq + Hash + Debug,
{
    pub fn new(states: impl IntoIterator<Item = S>, n_a: usize, gamma: Continous) -> Self {
        Self {
            gamma,
            q: ActionValue::new(n_a),
            policy: StochasticPolicy::uniform(states, n_a),
            returns: Returns::new(),
            only: None,
        }
    }

    /// Ignore returns of every state but `s0`.
    pub fn tracking_only(mut self, s0: S) -> Self {
        self.only = Some(s0);
        self
    }

    pub fn update(&mut self, ep: &[EpisodeEvent<S>]) {
        let mut g = 0.;
        for t in (0..ep.len()).rev() {
            let EpisodeEvent { s, a, r } = &ep[t];
            g = self.gamma * g + r;

            if self.only.as_ref().is_some_and(|s0| s0 != s) || !is_first_visit(ep, t) {
                continue;
            }

            let avg = self.returns.add((s.clone(), *a), g);
            self.q.set(s, *a, avg);
            let best = argmax(self.q.get_or_default(s));
            self.policy.make_greedy(s, best);
        }
    }

    pub fn q(&self) -> &ActionValue<S> {
        &self.q
    }

    pub fn policy(&self) -> &StochasticPolicy<S> {
        &self.policy
    }

    pub fn returns(&self) -> &Returns<(S, Discrete)> {
        &self.returns
    }

    pub fn into_parts(self) -> (ActionValue<S>, StochasticPolicy<S>) {
        (self.q, self.policy)
    }
}

/// First occurrence of the (state, action) pair at `t`.
fn is_first_visit<S: PartialEq>(ep: &[EpisodeEvent<S>], t: usize) -> bool {
    !ep[..t].iter().any(|x| x.s == ep[t].s && x.a == ep[t].a)
}

pub fn mc_control_exploring_starts<E>(
    env: &mut E,
    n_ep: usize,
    gamma: Continous,
    rng: &mut StdRng,
) -> Result<(ActionValue<E::State>, StochasticPolicy<E::State>)>
where
    E: ExploringStarts,
{
    let states = env.states();
    if states.is_empty() {
        return Err(RlError::EmptyStateSpace);
    }

    let mut control = McControl::new(states.iter().cloned(), env.n_a(), gamma);
    for i in 0..n_ep {
        let s0 = states.choose(rng).ok_or(RlError::EmptyStateSpace)?;
        let ep = generate_episode_from(control.policy(), env, s0, rng, DEFAULT_MAX_STEPS)?;
        control.update(&ep);

        if (i + 1) % PROGRESS_EVERY == 0 {
            debug!(episodes = i + 1, pairs = control.returns().len(), "control progress");
        }
    }
    info!(
        env = %env.name(),
        episodes = n_ep,
        pairs = control.returns().len(),
        "exploring starts control done"
    );

    Ok(control.into_parts())
}

/// Exploring starts pinned to a single start state `s0`: only the returns of
/// `(s0, *)` are tracked.
pub fn mc_control_exploring_starts_state<E>(
    env: &mut E,
    s0: &E::State,
    n_ep: usize,
    gamma: Continous,
    rng: &mut StdRng,
) -> Result<(ActionValue<E::State>, StochasticPolicy<E::State>)>
where
    E: ExploringStarts,
{
    let mut control =
        McControl::new(env.states(), env.n_a(), gamma).tracking_only(s0.clone());
    for _ in 0..n_ep {
        let ep = generate_episode_from(control.policy(), env, s0, rng, DEFAULT_MAX_STEPS)?;
        control.update(&ep);
    }
    info!(
        env = %env.name(),
        s0 = ?s0,
        episodes = n_ep,
        "single start control done"
    );

    Ok(control.into_parts())
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::*;

    fn ev(s: u8, a: Discrete, r: Continous) -> EpisodeEvent<u8> {
        EpisodeEvent { s, a, r }
    }

    #[test]
    fn test_first_visit_per_state_action() {
        let ep = vec![ev(0, 1, -1.), ev(0, 1, -1.), ev(0, 0, 0.), ev(1, 0, 1.)];
        let control = &mut McControl::new([0u8, 1], 2, 1.);
        control.update(&ep);

        assert_eq!(control.returns().count(&(0, 1)), 1);
        assert_float_eq!(control.returns().sum(&(0, 1)), -1., abs <= 1e-12);
        assert_eq!(control.returns().count(&(0, 0)), 1);
        assert_eq!(control.returns().count(&(1, 0)), 1);
    }

    #[test]
    fn test_policy_follows_argmax_immediately() {
        let control = &mut McControl::new([0u8, 1], 3, 1.);
        assert_eq!(control.policy().probabilities(&0), &[1. / 3.; 3]);

        control.update(&[ev(0, 2, 1.)]);
        assert_eq!(control.q().get_or_default(&0), &[0., 0., 1.]);
        assert_eq!(control.policy().probabilities(&0), &[0., 0., 1.]);

        control.update(&[ev(0, 2, -3.)]);
        // Q(0) = [0, 0, -1]: tie between 0 and 1, the lower index wins.
        assert_eq!(control.q().get_or_default(&0), &[0., 0., -1.]);
        assert_eq!(control.policy().probabilities(&0), &[1., 0., 0.]);

        assert_eq!(control.policy().probabilities(&1), &[1. / 3.; 3]);
        assert!(control.policy().is_valid());
    }

    #[test]
    fn test_tracking_only_ignores_other_states() {
        let control = &mut McControl::new([0u8, 1, 2], 2, 1.).tracking_only(0);
        control.update(&[ev(0, 1, 0.), ev(1, 0, 0.), ev(2, 1, 1.)]);

        assert_eq!(control.returns().len(), 1);
        assert_float_eq!(control.q().get_or_default(&0)[1], 1., abs <= 1e-12);
        assert!(control.q().get(&1).is_none());
        assert_eq!(control.policy().probabilities(&1), &[0.5, 0.5]);
    }
}
