//! Noise signals.
//!
//! Noise is the one kind of signal that is not a pure function of time:
//! every evaluation draws a fresh value from a random source. Both
//! generators default to the thread-local RNG and accept a seeded
//! `StdRng` for reproducible output.

mod gaussian;
mod white;

pub use gaussian::GaussianNoise;
pub use white::WhiteNoise;

use std::fmt;
use std::sync::{Mutex, MutexGuard};

use rand::SeedableRng;
use rand::distributions::Distribution;
use rand::rngs::StdRng;

/// Where a noise signal draws its randomness from.
#[derive(Default)]
pub enum NoiseSource {
    /// The thread-local generator, seeded from the OS.
    #[default]
    Thread,
    /// A caller-provided generator shared behind a lock.
    Seeded(Mutex<StdRng>),
}

impl NoiseSource {
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: StdRng) -> Self {
        NoiseSource::Seeded(Mutex::new(rng))
    }

    /// Draws one value from `distribution`.
    pub fn draw<D: Distribution<f64>>(&self, distribution: &D) -> f64 {
        match self {
            NoiseSource::Thread => distribution.sample(&mut rand::thread_rng()),
            NoiseSource::Seeded(rng) => distribution.sample(&mut *lock(rng)),
        }
    }

    /// Draws `n` values from `distribution`, taking the lock once.
    pub fn draw_many<D: Distribution<f64>>(&self, distribution: &D, n: usize) -> Vec<f64> {
        match self {
            NoiseSource::Thread => distribution
                .sample_iter(rand::thread_rng())
                .take(n)
                .collect(),
            NoiseSource::Seeded(rng) => {
                let mut rng = lock(rng);
                (0..n).map(|_| distribution.sample(&mut *rng)).collect()
            }
        }
    }
}

/// A poisoned lock still holds a usable generator.
fn lock(rng: &Mutex<StdRng>) -> MutexGuard<'_, StdRng> {
    rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Clone for NoiseSource {
    /// A cloned seeded source continues from the same generator state.
    fn clone(&self) -> Self {
        match self {
            NoiseSource::Thread => NoiseSource::Thread,
            NoiseSource::Seeded(rng) => NoiseSource::from_rng(lock(rng).clone()),
        }
    }
}

impl fmt::Debug for NoiseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoiseSource::Thread => f.write_str("NoiseSource::Thread"),
            NoiseSource::Seeded(_) => f.write_str("NoiseSource::Seeded"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::distributions::Uniform;

    #[test]
    fn test_seeded_sources_repeat() {
        let uniform = Uniform::new_inclusive(-1.0, 1.0);
        let a = NoiseSource::seeded(7);
        let b = NoiseSource::seeded(7);
        assert_eq!(a.draw_many(&uniform, 16), b.draw_many(&uniform, 16));
    }

    #[test]
    fn test_draw_and_draw_many_agree() {
        let uniform = Uniform::new_inclusive(-1.0, 1.0);
        let one_by_one = NoiseSource::seeded(3);
        let bulk = NoiseSource::seeded(3);
        let singles: Vec<f64> = (0..8).map(|_| one_by_one.draw(&uniform)).collect();
        assert_eq!(singles, bulk.draw_many(&uniform, 8));
    }

    #[test]
    fn test_clone_continues_state() {
        let uniform = Uniform::new_inclusive(-1.0, 1.0);
        let source = NoiseSource::seeded(11);
        source.draw(&uniform);
        let copy = source.clone();
        assert_eq!(source.draw(&uniform), copy.draw(&uniform));
    }

    #[test]
    fn test_thread_source_varies() {
        let uniform = Uniform::new_inclusive(-1.0, 1.0);
        let values = NoiseSource::Thread.draw_many(&uniform, 100);
        assert_eq!(values.len(), 100);
        assert!(values.iter().any(|&v| v != values[0]));
    }
}
