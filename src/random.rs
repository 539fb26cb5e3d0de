//! Injectable randomness.
//!
//! The row planner and the shuffles only ever need "a number in `[0, 1)`", so
//! they take a [`Chance`] instead of a concrete generator. Every [`rand::Rng`]
//! is a `Chance`; tests use [`ScriptedChance`] to force each branch.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// A source of uniform draws in `[0, 1)`.
pub trait Chance {
    fn roll(&mut self) -> f64;

    /// True with probability `p`.
    fn hits(&mut self, p: f64) -> bool {
        self.roll() < p
    }

    /// Uniform index in `0..=upper`.
    ///
    /// Built on [`Chance::roll`] rather than `Rng::random_range` so that a
    /// [`ScriptedChance`] can pick exact indices.
    fn index_through(&mut self, upper: usize) -> usize {
        let idx = (self.roll() * (upper as f64 + 1.0)) as usize;
        idx.min(upper)
    }
}

impl<R: Rng + ?Sized> Chance for R {
    fn roll(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Seeded generator when `seed` is given, otherwise one seeded from the OS.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// An empty script always rolls `0.0`, which makes every `hits(p)` with
/// `p > 0` succeed.
#[derive(Debug, Clone)]
pub struct ScriptedChance {
    draws: Vec<f64>,
    next: usize,
}

impl ScriptedChance {
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        Self {
            draws: draws.into(),
            next: 0,
        }
    }

    /// Every probabilistic branch is taken.
    pub fn always() -> Self {
        Self::new(vec![0.0])
    }

    /// No probabilistic branch is taken.
    pub fn never() -> Self {
        Self::new(vec![0.999_999])
    }
}

impl Chance for ScriptedChance {
    fn roll(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let value = self.draws[self.next % self.draws.len()];
        self.next += 1;
        value
    }
}
