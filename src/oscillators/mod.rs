//! Periodic waveform signals.
//!
//! This module contains the sinusoids, the sawtooth, clicks and click
//! trains, and harmonic series.

mod click;
mod harmonic;
mod sawtooth;
mod sine;
mod varying;

pub use click::{Click, ClickTrain};
pub use harmonic::HarmonicSeries;
pub use sawtooth::Sawtooth;
pub use sine::{Cosine, Sine};
pub use varying::VaryingCosine;

use std::fmt;

use crate::core::short;
use crate::error::{Result, SignalError};

/// Common interface for fixed-frequency oscillators.
pub trait Oscillator {
    /// Frequency in Hz.
    fn frequency(&self) -> f64;

    /// Peak amplitude.
    fn amplitude(&self) -> f64;

    /// Phase offset in radians.
    fn phase(&self) -> f64;

    /// Returns the period in seconds, `1 / frequency`.
    fn cycle(&self) -> f64 {
        1.0 / self.frequency()
    }
}

/// Rejects frequencies that have no period.
pub(crate) fn check_frequency(signal: &'static str, frequency: f64) -> Result<f64> {
    if frequency == 0.0 {
        return Err(SignalError::construction(signal, "frequency must be non-zero"));
    }
    if !frequency.is_finite() {
        return Err(SignalError::construction(
            signal,
            format!("frequency must be finite, got {frequency}"),
        ));
    }
    Ok(frequency)
}

/// Writes `A*name(2π*f*t + φ)`, leaving out unit amplitude, unit frequency
/// and zero phase.
pub(crate) fn write_trig(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    frequency: f64,
    amplitude: f64,
    phase: f64,
) -> fmt::Result {
    let amplitude = short(amplitude);
    if amplitude != "1" {
        write!(f, "{amplitude}*")?;
    }
    write!(f, "{name}(2π")?;
    let frequency = short(frequency);
    if frequency != "1" {
        write!(f, "*{frequency}")?;
    }
    f.write_str("*t")?;
    match short(phase).as_str() {
        "0" => {}
        negative if negative.starts_with('-') => write!(f, " - {}", &negative[1..])?,
        positive => write!(f, " + {positive}")?,
    }
    f.write_str(")")
}
