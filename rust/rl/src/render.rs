//! Plain-text views of value and policy tables.

use crate::tables::*;
use itertools::Itertools;
use ndarray::{ArrayView1, ArrayView2};
use toytext::{argmax, BlackjackState};

const ARROWS: [&str; 4] = ["↑", "→", "↓", "←"];

/// State values of a grid, one row per line, prefixed with the row index.
pub fn grid_values(v: ArrayView1<f64>, shape: (usize, usize)) -> String {
    let (rows, cols) = shape;
    (0..rows)
        .map(|y| {
            let cells = (0..cols).map(|x| format!("{:6.1}", v[y * cols + x])).join("");
            format!("{y} |{cells}")
        })
        .join("\n")
}

/// Greedy action of every grid cell as an arrow (0=up, 1=right, 2=down, 3=left).
pub fn grid_policy(policy: ArrayView2<f64>, shape: (usize, usize)) -> String {
    let (rows, cols) = shape;
    (0..rows)
        .map(|y| {
            let cells = (0..cols)
                .map(|x| {
                    let row = policy.row(y * cols + x).to_vec();
                    ARROWS.get(argmax(&row)).copied().unwrap_or("?")
                })
                .join(" ");
            format!("{y} | {cells}")
        })
        .join("\n")
}

/// Greedy Blackjack action, S(tick) or H(it), for player totals 11..=21
/// (rows, highest first) against the dealer's card (columns).
pub fn blackjack_policy(policy: &StochasticPolicy<BlackjackState>, usable_ace: bool) -> String {
    blackjack_table(11..=21, usable_ace, |s| {
        let action = match policy.greedy_action(&s) {
            0 => "S",
            _ => "H",
        };
        action.to_string()
    })
}

/// State values for player totals 12..=21 against the dealer's card.
pub fn blackjack_values(v: &StateValue<BlackjackState>, usable_ace: bool) -> String {
    blackjack_table(12..=21, usable_ace, |s| format!("{:.2}", v.get_or_default(&s)))
}

fn blackjack_table(
    player: std::ops::RangeInclusive<u8>,
    usable_ace: bool,
    cell: impl Fn(BlackjackState) -> String,
) -> String {
    let header = (1..=10u8)
        .map(|d| if d == 1 { "A".to_string() } else { d.to_string() })
        .map(|d| format!("{d:>6}"))
        .join("");
    let rows = player.rev().map(|p| {
        let cells = (1..=10u8)
            .map(|d| format!("{:>6}", cell(BlackjackState::new(p, d, usable_ace))))
            .join("");
        format!("{p:>3} |{cells}")
    });

    std::iter::once(format!("sum |{header}")).chain(rows).join("\n")
}
