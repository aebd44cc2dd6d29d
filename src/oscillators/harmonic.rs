//! Harmonic series: sums of sines at integer multiples of a base frequency.

use std::fmt;

use super::{Oscillator, Sine, check_frequency};
use crate::combinators::Sum;
use crate::core::{Signal, SignalRef, short};
use crate::error::{Result, SignalError};
use crate::sampling::TimeGrid;

/// A sum of sines at `k·base_frequency` for `k = 1..=N`.
///
/// The amplitude and phase of harmonic `k` come from optional generator
/// functions of `k`, defaulting to amplitude 1 and phase 0. The harmonics
/// are built once at construction. The period is that of the fundamental.
///
/// # Examples
///
/// ```
/// use harmonia::{HarmonicSeries, Signal};
///
/// let series = HarmonicSeries::with_generators(220.0, 30, |n| (-f64::from(n) / 2.0).exp(), |_| 0.0)?;
/// assert_eq!(series.harmonics().children().len(), 30);
/// assert!((series.period()? - 1.0 / 220.0).abs() < 1e-15);
/// assert_eq!(series.to_string(), "HS(220, 30)");
/// # Ok::<(), harmonia::SignalError>(())
/// ```
#[derive(Clone)]
pub struct HarmonicSeries {
    fundamental: Sine,
    count: u32,
    harmonics: Sum,
}

impl HarmonicSeries {
    /// Creates a series of `count` unit-amplitude harmonics.
    pub fn new(base_frequency: f64, count: u32) -> Result<Self> {
        Self::with_generators(base_frequency, count, |_| 1.0, |_| 0.0)
    }

    /// Creates a series whose harmonic `k` has amplitude `amplitude(k)` and
    /// phase `phase(k)`.
    ///
    /// Fails if the base frequency is zero or `count` is zero.
    pub fn with_generators(
        base_frequency: f64,
        count: u32,
        amplitude: impl Fn(u32) -> f64,
        phase: impl Fn(u32) -> f64,
    ) -> Result<Self> {
        let base_frequency = check_frequency("HarmonicSeries", base_frequency)?;
        if count == 0 {
            return Err(SignalError::construction(
                "HarmonicSeries",
                "number of harmonics must be at least 1",
            ));
        }
        let sines = (1..=count)
            .map(|k| {
                Sine::new(base_frequency * f64::from(k)).map(|sine| {
                    sine.with_amplitude(amplitude(k)).with_phase(phase(k))
                })
            })
            .collect::<Result<Vec<Sine>>>()?;
        let fundamental = sines[0];
        let harmonics = Sum::new(sines.into_iter().map(SignalRef::new));
        Ok(Self {
            fundamental,
            count,
            harmonics,
        })
    }

    /// The first harmonic.
    pub fn fundamental(&self) -> &Sine {
        &self.fundamental
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn harmonics(&self) -> &Sum {
        &self.harmonics
    }
}

impl Signal for HarmonicSeries {
    fn evaluate(&self, t: f64) -> f64 {
        self.harmonics.evaluate(t)
    }

    fn period(&self) -> Result<f64> {
        self.fundamental.period()
    }

    fn sample_over(&self, grid: &TimeGrid) -> Vec<f64> {
        self.harmonics.sample_over(grid)
    }
}

impl fmt::Display for HarmonicSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HS({}, {})", short(self.fundamental.frequency()), self.count)
    }
}

crate::combinators::signal_ops!(HarmonicSeries);
