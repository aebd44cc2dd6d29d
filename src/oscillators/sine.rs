//! Sine and cosine waves.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt;

use super::{Oscillator, check_frequency, write_trig};
use crate::core::Signal;
use crate::error::Result;
use crate::sampling::TimeGrid;

/// Frames between direct re-evaluations in the rotation recurrence.
const RESYNC_INTERVAL: usize = 4096;

/// Parameters shared by the sine and cosine.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tone {
    frequency: f64,
    amplitude: f64,
    phase: f64,
}

impl Tone {
    fn new(signal: &'static str, frequency: f64) -> Result<Self> {
        Ok(Self {
            frequency: check_frequency(signal, frequency)?,
            amplitude: 1.0,
            phase: 0.0,
        })
    }

    fn angle(&self, t: f64) -> f64 {
        TAU * self.frequency * t + self.phase
    }

    /// Samples `A·sin(angle(t) + shift)` over the grid.
    ///
    /// The first frame is computed directly; later frames advance
    /// `(sin θ, cos θ)` by a fixed rotation of `2π·f / frame_rate`.
    fn sample_sin(&self, grid: &TimeGrid, shift: f64) -> Vec<f64> {
        let (sin_step, cos_step) = (TAU * self.frequency / grid.frame_rate()).sin_cos();
        let mut values = Vec::with_capacity(grid.n_frames());
        let (mut s, mut c) = (0.0, 0.0);
        for i in 0..grid.n_frames() {
            if i % RESYNC_INTERVAL == 0 {
                (s, c) = (self.angle(grid.instant(i)) + shift).sin_cos();
            } else {
                (s, c) = (s * cos_step + c * sin_step, c * cos_step - s * sin_step);
            }
            values.push(self.amplitude * s);
        }
        values
    }
}

/// A sine wave `A·sin(2π·f·t + φ)`.
///
/// # Examples
///
/// ```
/// use harmonia::{Signal, Sine};
///
/// let sine = Sine::new(440.0)?.with_amplitude(0.5);
/// assert_eq!(sine.evaluate(0.0), 0.0);
/// assert_eq!(sine.to_string(), "0.5*sin(2π*440*t)");
/// assert!(Sine::new(0.0).is_err());
/// # Ok::<(), harmonia::SignalError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sine {
    tone: Tone,
}

impl Sine {
    /// Creates a unit-amplitude sine at `frequency` Hz.
    ///
    /// Fails if `frequency` is zero or not finite.
    pub fn new(frequency: f64) -> Result<Self> {
        Ok(Self {
            tone: Tone::new("Sine", frequency)?,
        })
    }

    /// Sets the peak amplitude.
    ///
    /// # Arguments
    ///
    /// * `amplitude` - Peak value; a negative amplitude inverts the wave
    ///
    /// # Examples
    ///
    /// ```
    /// use harmonia::{Signal, Sine};
    ///
    /// let quiet = Sine::new(1.0)?.with_amplitude(0.25);
    /// assert!((quiet.evaluate(0.25) - 0.25).abs() < 1e-12);
    /// # Ok::<(), harmonia::SignalError>(())
    /// ```
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.tone.amplitude = amplitude;
        self
    }

    /// Sets the phase offset in radians.
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.tone.phase = phase;
        self
    }
}

impl Oscillator for Sine {
    fn frequency(&self) -> f64 {
        self.tone.frequency
    }

    fn amplitude(&self) -> f64 {
        self.tone.amplitude
    }

    fn phase(&self) -> f64 {
        self.tone.phase
    }
}

impl Signal for Sine {
    fn evaluate(&self, t: f64) -> f64 {
        self.tone.amplitude * self.tone.angle(t).sin()
    }

    fn period(&self) -> Result<f64> {
        Ok(self.cycle())
    }

    fn sample_over(&self, grid: &TimeGrid) -> Vec<f64> {
        self.tone.sample_sin(grid, 0.0)
    }
}

impl fmt::Display for Sine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_trig(f, "sin", self.tone.frequency, self.tone.amplitude, self.tone.phase)
    }
}

/// A cosine wave `A·cos(2π·f·t + φ)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cosine {
    tone: Tone,
}

impl Cosine {
    /// Creates a unit-amplitude cosine at `frequency` Hz.
    ///
    /// Fails if `frequency` is zero or not finite.
    pub fn new(frequency: f64) -> Result<Self> {
        Ok(Self {
            tone: Tone::new("Cosine", frequency)?,
        })
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.tone.amplitude = amplitude;
        self
    }

    /// Sets the phase offset in radians.
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.tone.phase = phase;
        self
    }
}

impl Oscillator for Cosine {
    fn frequency(&self) -> f64 {
        self.tone.frequency
    }

    fn amplitude(&self) -> f64 {
        self.tone.amplitude
    }

    fn phase(&self) -> f64 {
        self.tone.phase
    }
}

impl Signal for Cosine {
    fn evaluate(&self, t: f64) -> f64 {
        self.tone.amplitude * self.tone.angle(t).cos()
    }

    fn period(&self) -> Result<f64> {
        Ok(self.cycle())
    }

    fn sample_over(&self, grid: &TimeGrid) -> Vec<f64> {
        // cos θ = sin(θ + π/2)
        self.tone.sample_sin(grid, FRAC_PI_2)
    }
}

impl fmt::Display for Cosine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_trig(f, "cos", self.tone.frequency, self.tone.amplitude, self.tone.phase)
    }
}

crate::combinators::signal_ops!(Sine, Cosine);
