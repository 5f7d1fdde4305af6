//! Blackjack as in Sutton & Barto, Example 5.1.
//!
//! Cards are drawn from an infinite deck, face cards count 10 and an ace
//! counts 11 whenever that does not bust the hand (a "usable" ace). The
//! dealer shows one card and draws until reaching 17 once the player sticks.
//! Refer: https://gymnasium.farama.org/environments/toy_text/blackjack/

use crate::*;
use itertools::iproduct;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use tracing::trace;

pub const STICK: Discrete = 0;
pub const HIT: Discrete = 1;

const DECK: [u8; 13] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 10, 10];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlackjackState {
    pub player_sum: u8,
    pub dealer_showing: u8,
    pub usable_ace: bool,
}

impl BlackjackState {
    pub fn new(player_sum: u8, dealer_showing: u8, usable_ace: bool) -> Self {
        Self {
            player_sum,
            dealer_showing,
            usable_ace,
        }
    }
}

#[derive(Debug)]
pub struct Blackjack {
    rng: StdRng,
    natural: bool,
    player: Vec<u8>,
    dealer: Vec<u8>,
    done: bool,
}

impl Blackjack {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let player = draw_hand(&mut rng);
        let dealer = draw_hand(&mut rng);

        Self {
            rng,
            natural: false,
            player,
            dealer,
            done: false,
        }
    }

    /// Pay 1.5 instead of 1 when the player wins with a natural.
    pub fn with_natural(mut self, natural: bool) -> Self {
        self.natural = natural;
        self
    }

    pub fn player(&self) -> &[u8] {
        &self.player
    }

    pub fn dealer(&self) -> &[u8] {
        &self.dealer
    }

    pub fn observation(&self) -> BlackjackState {
        BlackjackState {
            player_sum: sum_hand(&self.player),
            dealer_showing: self.dealer[0],
            usable_ace: usable_ace(&self.player),
        }
    }

    fn draw_card(&mut self) -> u8 {
        draw_card(&mut self.rng)
    }
}

impl Environment for Blackjack {
    type State = BlackjackState;

    fn name(&self) -> String {
        "Blackjack-v1".to_string()
    }

    fn n_a(&self) -> usize {
        2
    }

    fn reset(&mut self) -> BlackjackState {
        self.dealer = draw_hand(&mut self.rng);
        self.player = draw_hand(&mut self.rng);
        self.done = false;
        self.observation()
    }

    fn step(&mut self, action: Discrete) -> Result<StepInfo<BlackjackState>, EnvError> {
        if self.done {
            return Err(EnvError::EpisodeFinished);
        }

        let (terminated, reward) = match action {
            HIT => {
                let card = self.draw_card();
                self.player.push(card);
                if is_bust(&self.player) {
                    (true, -1.)
                } else {
                    (false, 0.)
                }
            }
            STICK => {
                while sum_hand(&self.dealer) < 17 {
                    let card = self.draw_card();
                    self.dealer.push(card);
                }
                trace!(player = ?self.player, dealer = ?self.dealer, "showdown");

                let reward = match score(&self.player).cmp(&score(&self.dealer)) {
                    Ordering::Greater => 1.,
                    Ordering::Equal => 0.,
                    Ordering::Less => -1.,
                };
                if self.natural && is_natural(&self.player) && reward == 1. {
                    (true, 1.5)
                } else {
                    (true, reward)
                }
            }
            _ => return Err(EnvError::InvalidAction { action, n_a: 2 }),
        };

        self.done = terminated;
        Ok(StepInfo {
            observation: self.observation(),
            reward,
            truncated: false,
            terminated,
            info: Value::Null,
        })
    }
}

impl ExploringStarts for Blackjack {
    /// Player totals 10..=21 against every dealer card. A usable ace needs a
    /// total of at least 12, so (10, _, true) and (11, _, true) are left out.
    fn states(&self) -> Vec<BlackjackState> {
        iproduct!(10..=21u8, 1..=10u8, [true, false])
            .map(|(p, d, u)| BlackjackState::new(p, d, u))
            .filter(|s| !s.usable_ace || s.player_sum >= 12)
            .collect()
    }

    /// Deals the player a hand with the requested total and ace usability and
    /// redeals the dealer two cards, the first one showing the requested card.
    fn set_state(&mut self, s: &BlackjackState) -> Result<(), EnvError> {
        let invalid = |reason: &str| EnvError::InvalidState {
            state: format!("{s:?}"),
            reason: reason.to_string(),
        };

        if !(1..=10).contains(&s.dealer_showing) {
            return Err(invalid("dealer card must be in 1..=10"));
        }

        let player = match (s.usable_ace, s.player_sum) {
            (true, p @ 12..=21) => vec![1, p - 11],
            (true, _) => return Err(invalid("a usable ace needs a total in 12..=21")),
            (false, p @ 4..=11) => vec![2, p - 2],
            (false, p @ 12..=20) => vec![10, p - 10],
            (false, 21) => vec![10, 9, 2],
            (false, _) => return Err(invalid("player total must be in 4..=21")),
        };

        self.player = player;
        self.dealer = vec![s.dealer_showing, draw_card(&mut self.rng)];
        self.done = false;
        debug_assert_eq!(self.observation(), *s);

        Ok(())
    }
}

/// Sticks once the player total reaches `threshold`, hits otherwise.
pub fn stick_at(threshold: u8) -> Deterministic<impl Fn(&BlackjackState) -> Discrete> {
    Deterministic(move |s: &BlackjackState| {
        if s.player_sum >= threshold {
            STICK
        } else {
            HIT
        }
    })
}

fn draw_card(rng: &mut StdRng) -> u8 {
    DECK[rng.gen_range(0..DECK.len())]
}

fn draw_hand(rng: &mut StdRng) -> Vec<u8> {
    vec![draw_card(rng), draw_card(rng)]
}

pub fn usable_ace(hand: &[u8]) -> bool {
    hand.contains(&1) && raw_sum(hand) + 10 <= 21
}

pub fn sum_hand(hand: &[u8]) -> u8 {
    if usable_ace(hand) {
        raw_sum(hand) + 10
    } else {
        raw_sum(hand)
    }
}

pub fn is_bust(hand: &[u8]) -> bool {
    sum_hand(hand) > 21
}

pub fn score(hand: &[u8]) -> u8 {
    if is_bust(hand) {
        0
    } else {
        sum_hand(hand)
    }
}

pub fn is_natural(hand: &[u8]) -> bool {
    hand.len() == 2 && hand.contains(&1) && hand.contains(&10)
}

fn raw_sum(hand: &[u8]) -> u8 {
    hand.iter().sum()
}
