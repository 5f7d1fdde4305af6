use crate::*;
use rand::distributions::WeightedIndex;
use rand::prelude::*;

pub trait Weighted {
    fn p(&self) -> Continous;
}

impl Weighted for Transition {
    fn p(&self) -> Continous {
        self.probability
    }
}

impl Weighted for Continous {
    fn p(&self) -> Continous {
        *self
    }
}

/// Samples one item with probability proportional to its weight.
/// `None` when the weights are empty, negative or all zero.
pub fn pick_next<'a, T>(rng: &mut StdRng, ts: &'a [T]) -> Option<&'a T>
where
    T: Weighted,
{
    pick_index(rng, ts).and_then(|i| ts.get(i))
}

pub fn pick_index<T>(rng: &mut StdRng, ts: &[T]) -> Option<usize>
where
    T: Weighted,
{
    let dist = WeightedIndex::new(ts.iter().map(|item| item.p())).ok()?;
    Some(dist.sample(rng))
}

/// Index of the largest value, the lowest index winning ties.
pub fn argmax(xs: &[Continous]) -> Discrete {
    let mut best = 0;
    for (i, &x) in xs.iter().enumerate().skip(1) {
        if x > xs[best] {
            best = i;
        }
    }
    best
}
