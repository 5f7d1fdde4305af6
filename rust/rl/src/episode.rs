use crate::error::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use toytext::*;

/// Ceiling on the length of a single episode. Far above the natural length of
/// any toy-text episode; reaching it means the policy never terminates.
pub const DEFAULT_MAX_STEPS: usize = 10_000;

/// One step of an episode: action `a` taken in `s`, followed by reward `r`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpisodeEvent<S> {
    pub s: S,
    pub a: Discrete,
    pub r: Continous,
}

pub type Episode<S> = Vec<EpisodeEvent<S>>;

pub trait EpisodeGenerator<S> {
    fn generate(&mut self, n: usize) -> Result<Vec<Episode<S>>>;
}

/// Plays one episode from a fresh `reset` until the environment signals the end.
pub fn generate_episode<E, P>(
    policy: &P,
    env: &mut E,
    rng: &mut StdRng,
    max_steps: usize,
) -> Result<Episode<E::State>>
where
    E: Environment,
    P: Policy<E::State> + ?Sized,
{
    let s = env.reset();
    rollout(policy, env, s, rng, max_steps)
}

/// Like [`generate_episode`] but with the environment forced into `s0` first.
pub fn generate_episode_from<E, P>(
    policy: &P,
    env: &mut E,
    s0: &E::State,
    rng: &mut StdRng,
    max_steps: usize,
) -> Result<Episode<E::State>>
where
    E: ExploringStarts,
    P: Policy<E::State> + ?Sized,
{
    env.reset();
    env.set_state(s0)?;
    rollout(policy, env, s0.clone(), rng, max_steps)
}

fn rollout<E, P>(
    policy: &P,
    env: &mut E,
    mut s: E::State,
    rng: &mut StdRng,
    max_steps: usize,
) -> Result<Episode<E::State>>
where
    E: Environment,
    P: Policy<E::State> + ?Sized,
{
    let mut ep = vec![];
    for _ in 0..max_steps {
        let a = policy.policy(&s, rng);
        let si = env.step(a)?;
        let done = si.is_done();
        ep.push(EpisodeEvent { s, a, r: si.reward });
        if done {
            return Ok(ep);
        }

        s = si.observation;
    }

    Err(RlError::EpisodeLimit { max_steps })
}

/// Episodes sampled by following a fixed policy in an environment.
pub struct PolicyRollouts<'a, E, P: ?Sized> {
    pub policy: &'a P,
    pub env: &'a mut E,
    pub rng: &'a mut StdRng,
    pub max_steps: usize,
}

impl<'a, E, P> PolicyRollouts<'a, E, P>
where
    E: Environment,
    P: Policy<E::State> + ?Sized,
{
    pub fn new(policy: &'a P, env: &'a mut E, rng: &'a mut StdRng) -> Self {
        Self {
            policy,
            env,
            rng,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl<'a, E, P> EpisodeGenerator<E::State> for PolicyRollouts<'a, E, P>
where
    E: Environment,
    P: Policy<E::State> + ?Sized,
{
    fn generate(&mut self, n: usize) -> Result<Vec<Episode<E::State>>> {
        (0..n)
            .map(|_| generate_episode(self.policy, self.env, self.rng, self.max_steps))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use toytext::blackjack::{stick_at, HIT, STICK};

    #[test]
    fn test_episode_from_forced_start() {
        let env = &mut Blackjack::new(1);
        let rng = &mut StdRng::seed_from_u64(1);
        let s0 = BlackjackState::new(20, 6, false);

        let ep = generate_episode_from(&stick_at(20), env, &s0, rng, 10).unwrap();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].s, s0);
        assert_eq!(ep[0].a, STICK);
    }

    #[test]
    fn test_malformed_start_is_an_error() {
        let env = &mut Blackjack::new(1);
        let rng = &mut StdRng::seed_from_u64(1);
        let s0 = BlackjackState::new(11, 6, true);

        let err = generate_episode_from(&stick_at(20), env, &s0, rng, 10).unwrap_err();
        assert!(matches!(err, RlError::Env(EnvError::InvalidState { .. })));
    }

    #[test]
    fn test_step_cap() {
        let env = &mut GridWorld::default();
        let rng = &mut StdRng::seed_from_u64(1);
        // Bumping into the top wall from the top-right corner never ends.
        let stuck = Deterministic(|_: &Discrete| grid_world::UP);

        let err = generate_episode_from(&stuck, env, &3, rng, 50).unwrap_err();
        assert!(matches!(err, RlError::EpisodeLimit { max_steps: 50 }));
    }

    #[test]
    fn test_rollouts_generate_n_episodes() {
        let env = &mut Blackjack::new(9);
        let rng = &mut StdRng::seed_from_u64(9);
        let always_hit = Deterministic(|_: &BlackjackState| HIT);
        let eps = PolicyRollouts::new(&always_hit, env, rng).generate(25).unwrap();

        assert_eq!(eps.len(), 25);
        for ep in eps {
            assert!(ep.iter().all(|e| e.a == HIT));
            assert_eq!(ep.last().unwrap().r, -1.);
        }
    }
}
