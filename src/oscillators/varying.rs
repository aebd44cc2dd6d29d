//! Cosine with time-varying parameters.

use std::f64::consts::TAU;
use std::fmt;

use crate::core::{Param, Signal};
use crate::error::{Result, SignalError};
use crate::sampling::TimeGrid;

/// A cosine whose frequency, amplitude and phase may each be a signal.
///
/// Evaluates `A(t)·cos(2π·f(t)·t + φ(t))`. Since any parameter may vary, the
/// period is undefined.
///
/// # Examples
///
/// ```
/// use harmonia::{FunctionSignal, Signal, VaryingCosine};
///
/// // A chirp whose frequency rises linearly with time
/// let chirp = VaryingCosine::new(FunctionSignal::new(|t| 100.0 + 50.0 * t))?
///     .with_amplitude(0.5);
/// assert_eq!(chirp.evaluate(0.0), 0.5);
/// assert!(chirp.period().is_err());
/// # Ok::<(), harmonia::SignalError>(())
/// ```
#[derive(Debug, Clone)]
pub struct VaryingCosine {
    frequency: Param,
    amplitude: Param,
    phase: Param,
}

impl VaryingCosine {
    /// Creates a unit-amplitude cosine with the given frequency.
    ///
    /// A fixed frequency of zero is rejected.
    pub fn new(frequency: impl Into<Param>) -> Result<Self> {
        let frequency = frequency.into();
        if let Param::Fixed(value) = frequency {
            super::check_frequency("VaryingCosine", value)?;
        }
        Ok(Self {
            frequency,
            amplitude: Param::Fixed(1.0),
            phase: Param::Fixed(0.0),
        })
    }

    pub fn with_amplitude(mut self, amplitude: impl Into<Param>) -> Self {
        self.amplitude = amplitude.into();
        self
    }

    pub fn with_phase(mut self, phase: impl Into<Param>) -> Self {
        self.phase = phase.into();
        self
    }

    pub fn frequency(&self) -> &Param {
        &self.frequency
    }

    pub fn amplitude(&self) -> &Param {
        &self.amplitude
    }

    pub fn phase(&self) -> &Param {
        &self.phase
    }
}

impl Signal for VaryingCosine {
    fn evaluate(&self, t: f64) -> f64 {
        self.amplitude.at(t) * (TAU * self.frequency.at(t) * t + self.phase.at(t)).cos()
    }

    fn period(&self) -> Result<f64> {
        Err(SignalError::PeriodUndefined(self.to_string()))
    }

    fn sample_over(&self, grid: &TimeGrid) -> Vec<f64> {
        let frequency = self.frequency.over(grid);
        let amplitude = self.amplitude.over(grid);
        let phase = self.phase.over(grid);
        grid.iter()
            .enumerate()
            .map(|(i, t)| amplitude[i] * (TAU * frequency[i] * t + phase[i]).cos())
            .collect()
    }
}

impl fmt::Display for VaryingCosine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}*cos(2π*{}*t + {})", self.amplitude, self.frequency, self.phase)
    }
}

crate::combinators::signal_ops!(VaryingCosine);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Constant, FunctionSignal};
    use crate::oscillators::{Cosine, Sine};
    use crate::sampling::TimeGridConfig;

    #[test]
    fn test_fixed_parameters_match_cosine() {
        let varying = VaryingCosine::new(5.0).unwrap().with_amplitude(0.3).with_phase(0.2);
        let fixed = Cosine::new(5.0).unwrap().with_amplitude(0.3).with_phase(0.2);
        for t in [0.0, 0.05, 0.31, 2.0] {
            assert!((varying.evaluate(t) - fixed.evaluate(t)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_fixed_frequency_fails() {
        assert!(matches!(
            VaryingCosine::new(0.0),
            Err(SignalError::Construction { .. })
        ));
        // A signal-driven frequency may pass through zero
        assert!(VaryingCosine::new(FunctionSignal::new(|t| t)).is_ok());
    }

    #[test]
    fn test_signal_driven_amplitude() {
        let tremolo = Sine::new(2.0).unwrap().with_amplitude(0.5);
        let varying = VaryingCosine::new(10.0).unwrap().with_amplitude(tremolo);
        let t = 0.125;
        let expected = tremolo.evaluate(t) * (TAU * 10.0 * t).cos();
        assert!((varying.evaluate(t) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_bulk_matches_pointwise() {
        let grid = TimeGridConfig::new()
            .with_t_min(0.5)
            .with_n_frames(256)
            .with_frame_rate(1000.0)
            .resolve()
            .unwrap();
        let varying = VaryingCosine::new(FunctionSignal::new(|t| 20.0 + t))
            .unwrap()
            .with_phase(Constant(0.1));
        for (t, v) in grid.iter().zip(varying.sample_over(&grid)) {
            assert!((varying.evaluate(t) - v).abs() < 1e-12);
        }
    }

    #[test]
    fn test_display() {
        let varying = VaryingCosine::new(2.0).unwrap();
        assert_eq!(varying.to_string(), "1*cos(2π*2*t + 0)");
    }
}
