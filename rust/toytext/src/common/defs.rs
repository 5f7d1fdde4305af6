use crate::*;
use rand::rngs::StdRng;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

/// An episodic environment with a finite, discrete action set.
/// Refer: https://gymnasium.farama.org/api/env/
pub trait Environment {
    type State: Clone + Eq + Hash + Debug;

    fn name(&self) -> String;

    /// Number of valid actions: actions are `0..n_a()`.
    fn n_a(&self) -> usize;

    fn reset(&mut self) -> Self::State;

    fn step(&mut self, action: Discrete) -> Result<StepInfo<Self::State>, EnvError>;
}

/// Environments that can be forced into an arbitrary semantic state, used for
/// exploring starts.
pub trait ExploringStarts: Environment {
    /// Every state an episode may be started from.
    fn states(&self) -> Vec<Self::State>;

    /// Rebuild the internal representation so that the current observation is `s`.
    /// Call after `reset`.
    fn set_state(&mut self, s: &Self::State) -> Result<(), EnvError>;
}

/// Markov Decision Process - Sutton & Barto 2018.
pub trait Mdp {
    fn n_s(&self) -> usize;

    fn n_a(&self) -> usize;

    fn transitions(&self) -> Rc<Transitions>;
}

pub trait Policy<S> {
    fn policy(&self, s: &S, rng: &mut StdRng) -> Discrete;
}

/// Wraps a plain function of the state as a [`Policy`].
pub struct Deterministic<F>(pub F);

impl<S, F> Policy<S> for Deterministic<F>
where
    F: Fn(&S) -> Discrete,
{
    fn policy(&self, s: &S, _rng: &mut StdRng) -> Discrete {
        (self.0)(s)
    }
}

/// Picks an action uniformly at random, whatever the state.
pub struct RandomPolicy {
    pub n_a: usize,
}

impl<S> Policy<S> for RandomPolicy {
    fn policy(&self, _s: &S, rng: &mut StdRng) -> Discrete {
        use rand::Rng;
        rng.gen_range(0..self.n_a)
    }
}
