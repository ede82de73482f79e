/*!
# Tie Breaking

[`Graph::follow_with`](super::Graph::follow_with) may find several edges leaving a vertex with the
same value. A [`TieBreak`] decides which of them is followed.
*/

use rand::{Rng, seq::IteratorRandom};

/// Policy that picks one of several equally valid candidates
pub trait TieBreak {
    /// Picks one item of `candidates` or `None` if there is none.
    /// `candidates` is yielded in edge insertion order.
    fn pick<T, I>(&mut self, candidates: I) -> Option<T>
    where
        I: Iterator<Item = T>;
}

/// Always picks the first candidate, making lookups deterministic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FirstMatch;

impl TieBreak for FirstMatch {
    fn pick<T, I>(&mut self, mut candidates: I) -> Option<T>
    where
        I: Iterator<Item = T>,
    {
        candidates.next()
    }
}

/// Picks a candidate uniformly at random
#[derive(Debug, Clone)]
pub struct RandomMatch<R> {
    rng: R,
}

impl<R: Rng> RandomMatch<R> {
    /// Creates a policy drawing from `rng`
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Returns the underlying random number generator
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> TieBreak for RandomMatch<R> {
    fn pick<T, I>(&mut self, candidates: I) -> Option<T>
    where
        I: Iterator<Item = T>,
    {
        candidates.choose(&mut self.rng)
    }
}
