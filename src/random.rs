//! Random variate sources.
//!
//! Every stochastic decision in a run (risk tolerance, bet sizing,
//! chooser and call selection, the coin itself) pulls a uniform `f64`
//! in `[0, 1)` from a [`RandomVariate`]. Injecting the source keeps runs
//! reproducible from a seed and lets tests script exact outcomes.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A source of uniform floats in `[0, 1)`.
pub trait RandomVariate: Send {
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in `[low, high]` using `floor(u * span) + low`.
    fn next_int(&mut self, low: u32, high: u32) -> u32 {
        debug_assert!(low <= high);
        let span = f64::from(high - low + 1);
        let offset = (self.next_unit() * span).floor() as u32;
        // Guards against a scripted source returning exactly 1.0.
        low + offset.min(high - low)
    }

    /// `true` when the draw lands strictly above one half.
    fn next_above_half(&mut self) -> bool {
        self.next_unit() > 0.5
    }
}

// ---------------------------------------------------------------------------
// Seeded generator
// ---------------------------------------------------------------------------

/// ChaCha8-backed generator. The seed is kept so a run can be replayed.
pub struct SeededRandom {
    rng: ChaCha8Rng,
    seed: u64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Use `seed` if given, otherwise pick one from OS entropy.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        Self::new(seed.unwrap_or_else(rand::random))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomVariate for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

// ---------------------------------------------------------------------------
// Scripted sequence
// ---------------------------------------------------------------------------

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Used to force specific chooser/call/flip outcomes.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "scripted sequence must not be empty");
        Self { values, cursor: 0 }
    }

    /// How many draws have been consumed so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomVariate for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
