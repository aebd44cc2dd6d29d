//! Amplitude envelopes.
//!
//! An envelope scales an inner signal by a time-varying amplitude, such as a
//! fade-in ramp or an exponential decay.

use std::fmt;

use crate::core::{Param, Signal, SignalRef};
use crate::error::Result;
use crate::sampling::TimeGrid;

/// Scales a signal by an amplitude function: `envelope(t)·inner(t)`.
///
/// Wrapping a signal in an envelope is assumed to break its periodicity, so
/// the period is always 0.
///
/// # Examples
///
/// ```
/// use harmonia::{Envelope, FunctionSignal, Signal, Sine};
///
/// let decay = FunctionSignal::named("exp(-3t)", |t| (-3.0 * t).exp());
/// let pluck = Envelope::new(Sine::new(440.0)?, decay);
/// assert_eq!(pluck.period()?, 0.0);
/// assert_eq!(pluck.to_string(), "(exp(-3t)) * (sin(2π*440*t))");
/// # Ok::<(), harmonia::SignalError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Envelope {
    inner: SignalRef,
    amplitude: Param,
}

impl Envelope {
    pub fn new(inner: impl Into<SignalRef>, amplitude: impl Into<Param>) -> Self {
        Self {
            inner: inner.into(),
            amplitude: amplitude.into(),
        }
    }

    pub fn inner(&self) -> &SignalRef {
        &self.inner
    }

    pub fn amplitude(&self) -> &Param {
        &self.amplitude
    }
}

impl Signal for Envelope {
    fn evaluate(&self, t: f64) -> f64 {
        self.amplitude.at(t) * self.inner.evaluate(t)
    }

    fn period(&self) -> Result<f64> {
        Ok(0.0)
    }

    fn sample_over(&self, grid: &TimeGrid) -> Vec<f64> {
        let mut values = self.inner.sample_over(grid);
        match &self.amplitude {
            Param::Fixed(gain) => values.iter_mut().for_each(|v| *v *= gain),
            varying => {
                for (v, gain) in values.iter_mut().zip(varying.over(grid)) {
                    *v *= gain;
                }
            }
        }
        values
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} * ({})", self.amplitude, self.inner)
    }
}

crate::combinators::signal_ops!(Envelope);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Constant, FunctionSignal};
    use crate::oscillators::Sine;
    use crate::sampling::TimeGridConfig;

    #[test]
    fn test_scales_inner_signal() {
        let ramp = FunctionSignal::new(|t| t);
        let env = Envelope::new(Constant(0.5), ramp);
        assert_eq!(env.evaluate(0.0), 0.0);
        assert_eq!(env.evaluate(2.0), 1.0);
    }

    #[test]
    fn test_fixed_gain() {
        let env = Envelope::new(Constant(0.5), 3.0);
        assert_eq!(env.evaluate(7.0), 1.5);
        assert_eq!(env.to_string(), "3 * (0.5)");
    }

    #[test]
    fn test_period_is_zero_even_for_periodic_inner() {
        let env = Envelope::new(Sine::new(2.0).unwrap(), 1.0);
        assert_eq!(env.period().unwrap(), 0.0);
    }

    #[test]
    fn test_bulk_matches_pointwise() {
        let grid = TimeGridConfig::new()
            .with_t_min(0.0)
            .with_n_frames(500)
            .with_frame_rate(1000.0)
            .resolve()
            .unwrap();
        let env = Envelope::new(
            Sine::new(30.0).unwrap(),
            FunctionSignal::new(|t| (-4.0 * t).exp()),
        );
        for (t, v) in grid.iter().zip(env.sample_over(&grid)) {
            assert!((env.evaluate(t) - v).abs() < 1e-9);
        }
    }

    #[test]
    fn test_shared_inner() {
        let tone: SignalRef = Sine::new(5.0).unwrap().into();
        let env = Envelope::new(tone.clone(), 0.5);
        assert!(env.inner().ptr_eq(&tone));
    }
}
