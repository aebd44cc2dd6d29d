//! White noise generator implementation.

use std::fmt;

use rand::distributions::Uniform;
use rand::rngs::StdRng;

use super::NoiseSource;
use crate::core::{Signal, short};
use crate::error::Result;
use crate::sampling::TimeGrid;

/// A white noise generator.
///
/// White noise has equal power across all frequencies. Each sample is
/// a random value uniformly distributed between `-A` and `A`.
#[derive(Debug, Clone)]
pub struct WhiteNoise {
    amplitude: f64,
    uniform: Uniform<f64>,
    source: NoiseSource,
}

impl WhiteNoise {
    /// Creates a white noise generator drawing from the thread-local RNG.
    ///
    /// A negative amplitude is taken by magnitude.
    ///
    /// # Examples
    ///
    /// ```
    /// use harmonia::{Signal, WhiteNoise};
    ///
    /// let noise = WhiteNoise::new(0.1);
    /// let sample = noise.evaluate(0.0);
    /// assert!((-0.1..=0.1).contains(&sample));
    /// ```
    pub fn new(amplitude: f64) -> Self {
        Self::with_source(amplitude, NoiseSource::Thread)
    }

    /// Creates a white noise generator with a custom RNG.
    ///
    /// # Examples
    ///
    /// ```
    /// use harmonia::{Signal, WhiteNoise};
    /// use rand::SeedableRng;
    ///
    /// let rng = rand::rngs::StdRng::seed_from_u64(42);
    /// let a = WhiteNoise::with_rng(1.0, rng.clone());
    /// let b = WhiteNoise::with_rng(1.0, rng);
    /// assert_eq!(a.evaluate(0.0), b.evaluate(5.0));
    /// ```
    pub fn with_rng(amplitude: f64, rng: StdRng) -> Self {
        Self::with_source(amplitude, NoiseSource::from_rng(rng))
    }

    /// Creates a white noise generator seeded with `seed`.
    pub fn seeded(amplitude: f64, seed: u64) -> Self {
        Self::with_source(amplitude, NoiseSource::seeded(seed))
    }

    fn with_source(amplitude: f64, source: NoiseSource) -> Self {
        Self {
            amplitude: amplitude.abs(),
            uniform: Uniform::new_inclusive(-1.0, 1.0),
            source,
        }
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }
}

impl Signal for WhiteNoise {
    fn evaluate(&self, _t: f64) -> f64 {
        self.amplitude * self.source.draw(&self.uniform)
    }

    fn period(&self) -> Result<f64> {
        Ok(0.0)
    }

    fn sample_over(&self, grid: &TimeGrid) -> Vec<f64> {
        let mut values = self.source.draw_many(&self.uniform, grid.n_frames());
        for v in &mut values {
            *v *= self.amplitude;
        }
        values
    }
}

impl fmt::Display for WhiteNoise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} * U(-1, 1)", short(self.amplitude))
    }
}

crate::combinators::signal_ops!(WhiteNoise);
