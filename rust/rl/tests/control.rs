extern crate rand;
extern crate tabular_rl;
extern crate toytext;

use assertor::*;
use rand::prelude::*;
use rstest::*;
use tabular_rl::*;
use toytext::blackjack::{HIT, STICK};
use toytext::*;

#[test]
fn blackjack_exploring_starts() {
    exploring_starts_with_seed(2718);
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(5)]
fn blackjack_exploring_starts_other_seeds(#[case] seed: u64) {
    exploring_starts_with_seed(seed);
}

fn exploring_starts_with_seed(seed: u64) {
    let env = &mut Blackjack::new(seed);
    let rng = &mut StdRng::seed_from_u64(seed);

    let (q, policy) = mc_control_exploring_starts(env, 100_000, 1., rng).unwrap();

    assert!(policy.is_valid());
    assert_eq!(q.len(), env.states().len());
    for d in 1..=10 {
        for p in [20, 21] {
            let s = BlackjackState::new(p, d, false);
            assert_eq!(policy.greedy_action(&s), STICK, "{s:?}");
            assert_eq!(policy.probabilities(&s), &[1., 0.]);
        }
    }
    for (_, qs) in q.iter() {
        for &x in qs {
            assert_that!(x).is_at_least(-1.);
            assert_that!(x).is_at_most(1.5);
        }
    }
    for (s, qs) in q.iter() {
        // A hard 21 busts on any card, a soft 21 falls back to a hard 12..=21.
        match (s.player_sum, s.usable_ace) {
            (21, false) if qs[HIT] != 0. => assert_eq!(qs[HIT], -1.),
            (21, true) => {
                assert_that!(qs[HIT]).is_at_least(-1.);
                assert_that!(qs[HIT]).is_at_most(1.);
            }
            _ => {}
        }
    }
}

#[test]
fn blackjack_single_start() {
    let env = &mut Blackjack::new(7);
    let rng = &mut StdRng::seed_from_u64(7);
    let s0 = BlackjackState::new(20, 10, false);

    let (q, policy) = mc_control_exploring_starts_state(env, &s0, 2_000, 1., rng).unwrap();

    assert_eq!(q.len(), 1);
    assert!(q.get(&s0).is_some());
    assert_eq!(policy.greedy_action(&s0), STICK);
    assert!(policy.is_valid());
}

#[test]
fn single_start_rejects_unreachable_state() {
    let env = &mut Blackjack::new(7);
    let rng = &mut StdRng::seed_from_u64(7);
    let s0 = BlackjackState::new(11, 5, true);

    let err = mc_control_exploring_starts_state(env, &s0, 10, 1., rng).unwrap_err();
    assert!(matches!(err, RlError::Env(EnvError::InvalidState { .. })));
}

#[test]
fn control_counts_first_visits_prediction_counts_all() {
    let ep = vec![
        EpisodeEvent { s: 1u8, a: 0, r: 0. },
        EpisodeEvent { s: 1, a: 0, r: 0. },
        EpisodeEvent { s: 2, a: 1, r: 1. },
    ];

    let control = &mut McControl::new([1u8, 2], 2, 1.);
    control.update(&ep);
    let prediction = &mut McPrediction::every_visit(1.);
    prediction.update(&ep);

    assert_eq!(control.returns().count(&(1, 0)), 1);
    assert_eq!(prediction.returns().count(&1), 2);
    assert_eq!(control.policy().greedy_action(&1), 0);
    assert_eq!(control.policy().greedy_action(&2), 1);
}

#[test]
fn uniform_blackjack_episodes_stay_short() {
    let env = &mut Blackjack::new(99);
    let rng = &mut StdRng::seed_from_u64(99);
    let policy = RandomPolicy { n_a: env.n_a() };

    for _ in 0..1_000 {
        let ep = generate_episode(&policy, env, rng, DEFAULT_MAX_STEPS).unwrap();
        assert_that!(ep.len()).is_at_least(1);
        assert_that!(ep.len()).is_at_most(21);
    }
}
