//! Gaussian noise generator implementation.

use std::fmt;

use rand::rngs::StdRng;
use rand_distr::Normal;

use super::NoiseSource;
use crate::core::{Signal, short};
use crate::error::{Result, SignalError};
use crate::sampling::TimeGrid;

/// Normally distributed noise scaled by an amplitude: `A·N(μ, σ)`.
///
/// # Examples
///
/// ```
/// use harmonia::{GaussianNoise, Signal};
///
/// let hiss = GaussianNoise::seeded(0.1, 0.0, 1.0, 42)?;
/// assert_eq!(hiss.period()?, 0.0);
/// assert_eq!(hiss.to_string(), "0.1 * N(0, 1)");
/// # Ok::<(), harmonia::SignalError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GaussianNoise {
    amplitude: f64,
    normal: Normal<f64>,
    source: NoiseSource,
}

impl GaussianNoise {
    /// Creates Gaussian noise drawing from the thread-local RNG.
    ///
    /// A negative standard deviation is taken by magnitude. A NaN one fails.
    pub fn new(amplitude: f64, mean: f64, std_dev: f64) -> Result<Self> {
        Self::with_source(amplitude, mean, std_dev, NoiseSource::Thread)
    }

    /// Creates Gaussian noise drawing from a caller-provided RNG.
    ///
    /// # Arguments
    ///
    /// * `amplitude` - Scale applied to every draw
    /// * `mean` - Mean of the underlying normal distribution
    /// * `std_dev` - Standard deviation, taken by magnitude
    /// * `rng` - Random number generator to use
    ///
    /// # Examples
    ///
    /// ```
    /// use harmonia::{GaussianNoise, Signal};
    /// use rand::SeedableRng;
    ///
    /// let rng = rand::rngs::StdRng::seed_from_u64(7);
    /// let a = GaussianNoise::with_rng(1.0, 0.0, 1.0, rng.clone())?;
    /// let b = GaussianNoise::with_rng(1.0, 0.0, 1.0, rng)?;
    /// assert_eq!(a.evaluate(0.0), b.evaluate(1.0));
    /// # Ok::<(), harmonia::SignalError>(())
    /// ```
    pub fn with_rng(amplitude: f64, mean: f64, std_dev: f64, rng: StdRng) -> Result<Self> {
        Self::with_source(amplitude, mean, std_dev, NoiseSource::from_rng(rng))
    }

    /// Creates Gaussian noise from a generator seeded with `seed`.
    pub fn seeded(amplitude: f64, mean: f64, std_dev: f64, seed: u64) -> Result<Self> {
        Self::with_source(amplitude, mean, std_dev, NoiseSource::seeded(seed))
    }

    fn with_source(amplitude: f64, mean: f64, std_dev: f64, source: NoiseSource) -> Result<Self> {
        let normal = Normal::new(mean, std_dev.abs())
            .map_err(|e| SignalError::construction("GaussianNoise", e.to_string()))?;
        Ok(Self {
            amplitude,
            normal,
            source,
        })
    }

    /// Mean of the underlying distribution, before scaling by the amplitude.
    pub fn mean(&self) -> f64 {
        self.normal.mean()
    }

    pub fn std_dev(&self) -> f64 {
        self.normal.std_dev()
    }
}

impl Signal for GaussianNoise {
    fn evaluate(&self, _t: f64) -> f64 {
        self.amplitude * self.source.draw(&self.normal)
    }

    fn period(&self) -> Result<f64> {
        Ok(0.0)
    }

    fn sample_over(&self, grid: &TimeGrid) -> Vec<f64> {
        let mut values = self.source.draw_many(&self.normal, grid.n_frames());
        for v in &mut values {
            *v *= self.amplitude;
        }
        values
    }
}

impl fmt::Display for GaussianNoise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} * N({}, {})",
            short(self.amplitude),
            short(self.mean()),
            short(self.std_dev())
        )
    }
}

crate::combinators::signal_ops!(GaussianNoise);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::TimeGridConfig;

    #[test]
    fn test_statistics() {
        let grid = TimeGridConfig::new()
            .with_t_min(0.0)
            .with_n_frames(20_000)
            .with_frame_rate(1000.0)
            .resolve()
            .unwrap();
        let noise = GaussianNoise::seeded(2.0, 0.5, 0.25, 1).unwrap();
        let values = noise.sample_over(&grid);
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        // A·N(0.5, 0.25) has mean 1.0 and standard deviation 0.5
        assert!((mean - 1.0).abs() < 0.02, "mean was {mean}");
        assert!((variance.sqrt() - 0.5).abs() < 0.02, "std dev was {}", variance.sqrt());
    }

    #[test]
    fn test_negative_std_dev_is_normalized() {
        let noise = GaussianNoise::new(1.0, 0.0, -3.0).unwrap();
        assert_eq!(noise.std_dev(), 3.0);
    }

    #[test]
    fn test_nan_std_dev_fails() {
        assert!(matches!(
            GaussianNoise::new(1.0, 0.0, f64::NAN),
            Err(SignalError::Construction { signal: "GaussianNoise", .. })
        ));
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = GaussianNoise::seeded(1.0, 0.0, 1.0, 5).unwrap();
        let b = GaussianNoise::seeded(1.0, 0.0, 1.0, 5).unwrap();
        for i in 0..32 {
            assert_eq!(a.evaluate(i as f64), b.evaluate(i as f64));
        }
    }
}
