//! Sawtooth wave implementation.

use std::fmt;

use super::{Oscillator, check_frequency};
use crate::core::{Signal, short};
use crate::error::Result;

/// A sawtooth wave.
///
/// The waveform rises linearly from 0 to `A` over each period, then drops
/// sharply back to 0: `A·frac((t − offset)·f)`. A reversed sawtooth falls
/// from `A` to 0 instead: `A·(1 − frac((t − offset)·f))`.
///
/// Unlike the sinusoids, the offset is a time shift in seconds.
///
/// # Examples
///
/// ```
/// use harmonia::{Sawtooth, Signal};
///
/// let saw = Sawtooth::new(2.0)?;
/// assert_eq!(saw.evaluate(0.125), 0.25);
/// assert_eq!(saw.reversed().evaluate(0.125), 0.75);
/// # Ok::<(), harmonia::SignalError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sawtooth {
    frequency: f64,
    amplitude: f64,
    offset: f64,
    reverse: bool,
}

impl Sawtooth {
    /// Creates a unit-amplitude rising sawtooth.
    ///
    /// # Arguments
    ///
    /// * `frequency` - Ramps per second in Hz
    ///
    /// # Returns
    ///
    /// A construction error if `frequency` is zero or not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use harmonia::{Sawtooth, Signal};
    ///
    /// let saw = Sawtooth::new(4.0)?;
    /// assert_eq!(saw.period()?, 0.25);
    /// assert!(Sawtooth::new(0.0).is_err());
    /// # Ok::<(), harmonia::SignalError>(())
    /// ```
    pub fn new(frequency: f64) -> Result<Self> {
        Ok(Self {
            frequency: check_frequency("Sawtooth", frequency)?,
            amplitude: 1.0,
            offset: 0.0,
            reverse: false,
        })
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Shifts the wave later in time by `offset` seconds.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Flips the ramp direction.
    pub fn reversed(mut self) -> Self {
        self.reverse = !self.reverse;
        self
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }
}

impl Oscillator for Sawtooth {
    fn frequency(&self) -> f64 {
        self.frequency
    }

    fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// The offset expressed as an angle of the cycle.
    fn phase(&self) -> f64 {
        -std::f64::consts::TAU * self.frequency * self.offset
    }
}

impl Signal for Sawtooth {
    fn evaluate(&self, t: f64) -> f64 {
        let ramp = ((t - self.offset) * self.frequency).rem_euclid(1.0);
        if self.reverse {
            self.amplitude * (1.0 - ramp)
        } else {
            self.amplitude * ramp
        }
    }

    fn period(&self) -> Result<f64> {
        Ok(self.cycle())
    }
}

impl fmt::Display for Sawtooth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amplitude = short(self.amplitude);
        if amplitude != "1" {
            write!(f, "{amplitude}*")?;
        }
        if self.reverse {
            f.write_str("(1 - ")?;
        }
        f.write_str("frac(")?;
        match short(self.offset).as_str() {
            "0" => f.write_str("t")?,
            offset => write!(f, "(t - {offset})")?,
        }
        write!(f, "*{})", short(self.frequency))?;
        if self.reverse {
            f.write_str(")")?;
        }
        Ok(())
    }
}

crate::combinators::signal_ops!(Sawtooth);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_frequency_fails() {
        assert!(Sawtooth::new(0.0).is_err());
    }

    #[test]
    fn test_waveform_shape() {
        let saw = Sawtooth::new(1.0).unwrap().with_amplitude(2.0);
        assert_eq!(saw.evaluate(0.0), 0.0);
        assert_eq!(saw.evaluate(0.5), 1.0);
        assert!((saw.evaluate(0.999) - 1.998).abs() < 1e-9);
        assert_eq!(saw.evaluate(1.0), 0.0);
    }

    #[test]
    fn test_negative_time_wraps() {
        let saw = Sawtooth::new(1.0).unwrap();
        assert!((saw.evaluate(-0.25) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_reversed() {
        let saw = Sawtooth::new(4.0).unwrap().reversed();
        assert_eq!(saw.evaluate(0.0), 1.0);
        assert!((saw.evaluate(0.0625) - 0.75).abs() < 1e-12);
        assert_eq!(saw.reversed(), Sawtooth::new(4.0).unwrap());
    }

    #[test]
    fn test_offset() {
        let saw = Sawtooth::new(1.0).unwrap().with_offset(0.25);
        assert_eq!(saw.evaluate(0.25), 0.0);
        assert!((saw.evaluate(0.5) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_period() {
        assert_eq!(Sawtooth::new(5.0).unwrap().period().unwrap(), 0.2);
    }

    #[test]
    fn test_sample_range() {
        let saw = Sawtooth::new(440.0).unwrap();
        for i in 0..10_000 {
            let v = saw.evaluate(i as f64 / 44100.0);
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Sawtooth::new(2.0).unwrap().to_string(), "frac(t*2)");
        assert_eq!(
            Sawtooth::new(2.0)
                .unwrap()
                .with_amplitude(0.5)
                .with_offset(0.1)
                .reversed()
                .to_string(),
            "0.5*(1 - frac((t - 0.1)*2))"
        );
    }
}
