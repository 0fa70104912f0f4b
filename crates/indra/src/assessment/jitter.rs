use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies the variability term added to feasibility scores.
pub trait JitterSource: Send {
    /// Returns a value in `0..=max`.
    fn sample(&mut self, max: u8) -> u8;
}

/// Disables jitter entirely.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn sample(&mut self, _max: u8) -> u8 {
        0
    }
}

/// Always contributes the same amount, capped at `max`.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub u8);

impl JitterSource for FixedJitter {
    fn sample(&mut self, max: u8) -> u8 {
        self.0.min(max)
    }
}

/// Reproducible jitter sequence derived from a seed.
#[derive(Debug, Clone)]
pub struct SeededJitter(StdRng);

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl JitterSource for SeededJitter {
    fn sample(&mut self, max: u8) -> u8 {
        self.0.gen_range(0..=max)
    }
}

/// Non-reproducible jitter backed by the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadJitter;

impl JitterSource for ThreadJitter {
    fn sample(&mut self, max: u8) -> u8 {
        rand::thread_rng().gen_range(0..=max)
    }
}

/// Picks the seeded source when a seed is configured.
pub fn from_seed(seed: Option<u64>) -> Box<dyn JitterSource> {
    match seed {
        Some(seed) => Box::new(SeededJitter::new(seed)),
        None => Box::new(ThreadJitter),
    }
}
