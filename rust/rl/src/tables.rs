//! Tabular estimates keyed by state.
//!
//! Lookups of keys never written return a defined default instead of failing:
//! 0 for state values, a zero vector for action values and the uniform
//! distribution for policies.

use rand::rngs::StdRng;
use std::collections::HashMap;
use std::hash::Hash;
use toytext::{argmax, pick_index, Continous, Discrete, Policy};

#[derive(Debug, Clone, Default)]
pub struct StateValue<S> {
    v: HashMap<S, Continous>,
}

impl<S: Eq + Hash> StateValue<S> {
    pub fn new() -> Self {
        Self { v: HashMap::new() }
    }

    pub fn get(&self, s: &S) -> Option<Continous> {
        self.v.get(s).copied()
    }

    pub fn get_or_default(&self, s: &S) -> Continous {
        self.get(s).unwrap_or_default()
    }

    pub fn insert(&mut self, s: S, value: Continous) {
        self.v.insert(s, value);
    }

    pub fn len(&self) -> usize {
        self.v.len()
    }

    pub fn is_empty(&self) -> bool {
        self.v.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &Continous)> {
        self.v.iter()
    }
}

impl<S: Eq + Hash> FromIterator<(S, Continous)> for StateValue<S> {
    fn from_iter<I: IntoIterator<Item = (S, Continous)>>(iter: I) -> Self {
        Self {
            v: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActionValue<S> {
    zeros: Vec<Continous>,
    q: HashMap<S, Vec<Continous>>,
}

impl<S: Eq + Hash + Clone> ActionValue<S> {
    pub fn new(n_a: usize) -> Self {
        Self {
            zeros: vec![0.; n_a],
            q: HashMap::new(),
        }
    }

    pub fn n_a(&self) -> usize {
        self.zeros.len()
    }

    pub fn get(&self, s: &S) -> Option<&[Continous]> {
        self.q.get(s).map(Vec::as_slice)
    }

    pub fn get_or_default(&self, s: &S) -> &[Continous] {
        self.get(s).unwrap_or(&self.zeros)
    }

    pub fn set(&mut self, s: &S, a: Discrete, value: Continous) {
        let zeros = &self.zeros;
        self.q.entry(s.clone()).or_insert_with(|| zeros.clone())[a] = value;
    }

    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &[Continous])> {
        self.q.iter().map(|(s, qs)| (s, qs.as_slice()))
    }

    /// V(s) = max_a Q(s, a) for every state with an entry.
    pub fn state_values(&self) -> StateValue<S> {
        self.q
            .iter()
            .map(|(s, qs)| (s.clone(), qs[argmax(qs)]))
            .collect()
    }
}

/// A stochastic policy: a distribution over actions per state.
#[derive(Debug, Clone)]
pub struct StochasticPolicy<S> {
    uniform: Vec<Continous>,
    pi: HashMap<S, Vec<Continous>>,
}

impl<S: Eq + Hash + Clone> StochasticPolicy<S> {
    pub fn new(n_a: usize) -> Self {
        assert!(n_a > 0, "Policy needs at least one action.");

        Self {
            uniform: vec![1. / n_a as Continous; n_a],
            pi: HashMap::new(),
        }
    }

    /// Uniform over all actions for every state in `states`.
    pub fn uniform(states: impl IntoIterator<Item = S>, n_a: usize) -> Self {
        let mut policy = Self::new(n_a);
        let uniform = policy.uniform.clone();
        policy.pi = states.into_iter().map(|s| (s, uniform.clone())).collect();
        policy
    }

    pub fn n_a(&self) -> usize {
        self.uniform.len()
    }

    pub fn probabilities(&self, s: &S) -> &[Continous] {
        self.pi.get(s).map(Vec::as_slice).unwrap_or(&self.uniform)
    }

    /// Puts all probability mass on `a`.
    pub fn make_greedy(&mut self, s: &S, a: Discrete) {
        let mut one_hot = vec![0.; self.n_a()];
        one_hot[a] = 1.;
        self.pi.insert(s.clone(), one_hot);
    }

    /// Most probable action, lowest index on ties.
    pub fn greedy_action(&self, s: &S) -> Discrete {
        argmax(self.probabilities(s))
    }

    pub fn len(&self) -> usize {
        self.pi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pi.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &[Continous])> {
        self.pi.iter().map(|(s, ps)| (s, ps.as_slice()))
    }

    /// Every stored entry is non-negative and sums to 1.
    pub fn is_valid(&self) -> bool {
        self.pi.values().all(|ps| is_distribution(ps))
    }
}

impl<S: Eq + Hash + Clone> Policy<S> for StochasticPolicy<S> {
    fn policy(&self, s: &S, rng: &mut StdRng) -> Discrete {
        let ps = self.probabilities(s);
        pick_index(rng, ps).unwrap_or_else(|| argmax(ps))
    }
}

pub fn is_distribution(ps: &[Continous]) -> bool {
    ps.iter().all(|&p| p >= 0.) && (ps.iter().sum::<Continous>() - 1.).abs() < 1e-9
}

/// Running sums and counts of observed returns, per key.
#[derive(Debug, Clone, Default)]
pub struct Returns<K> {
    acc: HashMap<K, (Continous, usize)>,
}

impl<K: Eq + Hash> Returns<K> {
    pub fn new() -> Self {
        Self {
            acc: HashMap::new(),
        }
    }

    /// Records `g` for `key` and returns the new average.
    pub fn add(&mut self, key: K, g: Continous) -> Continous {
        let (sum, count) = self.acc.entry(key).or_insert((0., 0));
        *sum += g;
        *count += 1;
        *sum / *count as Continous
    }

    pub fn sum(&self, key: &K) -> Continous {
        self.acc.get(key).map(|(sum, _)| *sum).unwrap_or_default()
    }

    pub fn count(&self, key: &K) -> usize {
        self.acc.get(key).map(|(_, count)| *count).unwrap_or_default()
    }

    /// `None` until the key has been seen at least once.
    pub fn average(&self, key: &K) -> Option<Continous> {
        self.acc
            .get(key)
            .map(|(sum, count)| *sum / *count as Continous)
    }

    pub fn len(&self) -> usize {
        self.acc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.acc.is_empty()
    }

    pub fn averages(&self) -> impl Iterator<Item = (&K, Continous)> {
        self.acc
            .iter()
            .map(|(k, (sum, count))| (k, *sum / *count as Continous))
    }
}
