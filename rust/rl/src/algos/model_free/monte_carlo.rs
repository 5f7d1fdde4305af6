use crate::episode::*;
use crate::error::*;
use crate::tables::*;
use rand::rngs::StdRng;
use std::hash::Hash;
use toytext::{Continous, Environment, Policy};
use tracing::info;

/// Decides whether the step at `t` contributes its return.
pub type VisitRule<S> = fn(&[EpisodeEvent<S>], usize) -> bool;

/// Ref: https://youtu.be/P0ZvxeQqv0A?si=RLKdOUTNEfKXE63C
pub fn mc_first_visit<S>(
    ep_gen: &mut dyn EpisodeGenerator<S>,
    gamma: Continous,
    n_ep: usize,
) -> Result<StateValue<S>>
where
    S: Clone + Eq + Hash,
{
    mc_core(ep_gen, gamma, n_ep, is_first_visit)
}

/// Ref: https://youtu.be/P0ZvxeQqv0A?si=RLKdOUTNEfKXE63C
pub fn mc_every_visit<S>(
    ep_gen: &mut dyn EpisodeGenerator<S>,
    gamma: Continous,
    n_ep: usize,
) -> Result<StateValue<S>>
where
    S: Clone + Eq + Hash,
{
    mc_core(ep_gen, gamma, n_ep, |_, _| true)
}

/// Every-visit prediction of `policy` by sampling `n_ep` episodes from `env`.
pub fn mc_prediction_every_visit<E, P>(
    policy: &P,
    env: &mut E,
    n_ep: usize,
    gamma: Continous,
    rng: &mut StdRng,
) -> Result<StateValue<E::State>>
where
    E: Environment,
    P: Policy<E::State> + ?Sized,
{
    let mut rollouts = PolicyRollouts::new(policy, env, rng);
    mc_every_visit(&mut rollouts, gamma, n_ep)
}

pub fn mc_core<S>(
    ep_gen: &mut dyn EpisodeGenerator<S>,
    gamma: Continous,
    n_ep: usize,
    visit_rule: VisitRule<S>,
) -> Result<StateValue<S>>
where
    S: Clone + Eq + Hash,
{
    let mut prediction = McPrediction::new(gamma, visit_rule);

    let eps = ep_gen.generate(n_ep)?;
    for ep in eps.iter().take(n_ep) {
        prediction.update(ep);
    }
    info!(
        episodes = n_ep,
        states = prediction.returns().len(),
        "Monte Carlo prediction done"
    );

    Ok(prediction.state_values())
}

/// Accumulated returns of one prediction run.
pub struct McPrediction<S> {
    gamma: Continous,
    visit_rule: VisitRule<S>,
    returns: Returns<S>,
}

impl<S: Clone + Eq + Hash> McPrediction<S> {
    pub fn new(gamma: Continous, visit_rule: VisitRule<S>) -> Self {
        Self {
            gamma,
            visit_rule,
            returns: Returns::new(),
        }
    }

    pub fn every_visit(gamma: Continous) -> Self {
        Self::new(gamma, |_, _| true)
    }

    pub fn first_visit(gamma: Continous) -> Self {
        Self::new(gamma, is_first_visit)
    }

    pub fn update(&mut self, ep: &[EpisodeEvent<S>]) {
        let mut g = 0.;
        for t in (0..ep.len()).rev() {
            g = self.gamma * g + ep[t].r;
            if (self.visit_rule)(ep, t) {
                self.returns.add(ep[t].s.clone(), g);
            }
        }
    }

    pub fn returns(&self) -> &Returns<S> {
        &self.returns
    }

    pub fn state_values(&self) -> StateValue<S> {
        self.returns
            .averages()
            .map(|(s, v)| (s.clone(), v))
            .collect()
    }
}

fn is_first_visit<S: PartialEq>(ep: &[EpisodeEvent<S>], t: usize) -> bool {
    if t == 0 {
        return true;
    }

    !ep.iter().take(t).any(|x| x.s == ep[t].s)
}
