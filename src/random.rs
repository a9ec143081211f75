use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform-deviate supplier injected into the engine. `uniform` draws from
/// `[low, high)`; `uniform01` drives routing decisions.
pub trait RandomSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64;
    fn uniform01(&mut self) -> f64;
}

pub struct StdRandomSource {
    rng: StdRng,
}

impl StdRandomSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl RandomSource for StdRandomSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        // A degenerate window is a deterministic duration; gen_range panics
        // on empty ranges, so short-circuit without consuming a draw.
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..high)
    }

    fn uniform01(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of `[0,1)` deviates, cycling when exhausted. Stands
/// in for `StdRandomSource` when a run must be scripted exactly.
pub struct SequenceSource {
    values: Vec<f64>,
    next: usize,
}

impl SequenceSource {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, next: 0 }
    }

    fn next_value(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}

impl RandomSource for SequenceSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        low + self.next_value() * (high - low)
    }

    fn uniform01(&mut self) -> f64 {
        self.next_value()
    }
}
