//! Bounded random variance injected into outcome probabilities.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Source of uniform noise in `[-amplitude, amplitude]`.
pub trait VarianceSource: Send + Sync {
    fn sample(&self, amplitude: f64) -> f64;
}

/// Thread-local RNG. Used in production when no seed is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngVariance;

impl VarianceSource for ThreadRngVariance {
    fn sample(&self, amplitude: f64) -> f64 {
        if amplitude <= 0.0 {
            return 0.0;
        }
        rand::thread_rng().gen_range(-amplitude..=amplitude)
    }
}

/// Reproducible RNG.
#[derive(Debug)]
pub struct SeededVariance {
    rng: Mutex<StdRng>,
}

impl SeededVariance {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl VarianceSource for SeededVariance {
    fn sample(&self, amplitude: f64) -> f64 {
        if amplitude <= 0.0 {
            return 0.0;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(-amplitude..=amplitude)
    }
}

/// Always zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoVariance;

impl VarianceSource for NoVariance {
    fn sample(&self, _amplitude: f64) -> f64 {
        0.0
    }
}
