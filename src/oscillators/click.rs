//! Single clicks and periodic click trains.

use std::f64::consts::TAU;
use std::fmt;

use super::{Oscillator, check_frequency};
use crate::core::{Signal, short};
use crate::error::{Result, SignalError};

/// Positions this close to a click edge count as on the edge.
const EDGE_TOLERANCE: f64 = 1e-9;

/// A rectangular pulse: `A` for `t` in `[start, start + duration)`, else 0.
///
/// # Examples
///
/// ```
/// use harmonia::{Click, Signal};
///
/// let click = Click::new(0.1, 0.8, 1.0)?;
/// assert_eq!(click.evaluate(1.05), 0.8);
/// assert_eq!(click.evaluate(1.1), 0.0);
/// # Ok::<(), harmonia::SignalError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Click {
    duration: f64,
    amplitude: f64,
    start: f64,
}

impl Click {
    /// Creates a click starting at `start` seconds.
    ///
    /// Fails unless `duration` is positive and finite.
    pub fn new(duration: f64, amplitude: f64, start: f64) -> Result<Self> {
        if !(duration > 0.0 && duration.is_finite()) {
            return Err(SignalError::construction(
                "Click",
                format!("duration must be positive, got {duration}"),
            ));
        }
        Ok(Self {
            duration,
            amplitude,
            start,
        })
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn start(&self) -> f64 {
        self.start
    }
}

impl Signal for Click {
    fn evaluate(&self, t: f64) -> f64 {
        if self.start <= t && t < self.start + self.duration {
            self.amplitude
        } else {
            0.0
        }
    }

    fn period(&self) -> Result<f64> {
        Ok(0.0)
    }
}

impl fmt::Display for Click {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}*({} <= t < {})",
            short(self.amplitude),
            short(self.start),
            short(self.start + self.duration)
        )
    }
}

/// A click repeated every `1 / frequency` seconds.
///
/// Each period starts with a click of `duration` seconds. The phase, in
/// radians of a one-second cycle, delays the train by `phase / 2π` seconds
/// whatever the frequency.
///
/// # Examples
///
/// ```
/// use harmonia::{ClickTrain, Signal};
///
/// let train = ClickTrain::new(2.0, 0.1, 1.0, 0.0)?;
/// assert_eq!(train.evaluate(0.05), 1.0);
/// assert_eq!(train.evaluate(0.6), 0.0);
/// # Ok::<(), harmonia::SignalError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickTrain {
    frequency: f64,
    duration: f64,
    amplitude: f64,
    phase: f64,
}

impl ClickTrain {
    /// Fails if the frequency is not positive, the amplitude is zero, or
    /// the click does not fit strictly inside one period.
    pub fn new(frequency: f64, duration: f64, amplitude: f64, phase: f64) -> Result<Self> {
        let frequency = check_frequency("ClickTrain", frequency)?;
        if frequency < 0.0 {
            return Err(SignalError::construction(
                "ClickTrain",
                format!("frequency must be positive, got {frequency}"),
            ));
        }
        if amplitude == 0.0 {
            return Err(SignalError::construction("ClickTrain", "amplitude must be non-zero"));
        }
        let period = 1.0 / frequency;
        if !(duration > 0.0 && duration < period) {
            return Err(SignalError::construction(
                "ClickTrain",
                format!("duration must be in (0, {period}), got {duration}"),
            ));
        }
        Ok(Self {
            frequency,
            duration,
            amplitude,
            phase,
        })
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Delay of the train in seconds.
    fn shift(&self) -> f64 {
        self.phase / TAU
    }

    /// Position of `t` within its period, in seconds.
    fn position(&self, t: f64) -> f64 {
        let period = self.cycle();
        let position = (t - self.shift()).rem_euclid(period);
        if period - position < EDGE_TOLERANCE {
            0.0
        } else if (position - self.duration).abs() < EDGE_TOLERANCE {
            self.duration
        } else {
            position
        }
    }
}

impl Oscillator for ClickTrain {
    fn frequency(&self) -> f64 {
        self.frequency
    }

    fn amplitude(&self) -> f64 {
        self.amplitude
    }

    fn phase(&self) -> f64 {
        self.phase
    }
}

impl Signal for ClickTrain {
    fn evaluate(&self, t: f64) -> f64 {
        if self.position(t) < self.duration {
            self.amplitude
        } else {
            0.0
        }
    }

    fn period(&self) -> Result<f64> {
        Ok(self.cycle())
    }
}

impl fmt::Display for ClickTrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amplitude = short(self.amplitude);
        if amplitude != "1" {
            write!(f, "{amplitude}*")?;
        }
        let time = match short(self.shift()).as_str() {
            "0" => "t".to_string(),
            negative if negative.starts_with('-') => format!("(t + {})", &negative[1..]),
            positive => format!("(t - {positive})"),
        };
        write!(
            f,
            "(0 <= {time} % {} < {})",
            short(self.cycle()),
            short(self.duration)
        )
    }
}

crate::combinators::signal_ops!(Click, ClickTrain);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_window() {
        let click = Click::new(0.5, 2.0, 1.0).unwrap();
        assert_eq!(click.evaluate(0.999), 0.0);
        assert_eq!(click.evaluate(1.0), 2.0);
        assert_eq!(click.evaluate(1.25), 2.0);
        assert_eq!(click.evaluate(1.5), 0.0);
        assert_eq!(click.period().unwrap(), 0.0);
    }

    #[test]
    fn test_click_rejects_non_positive_duration() {
        assert!(matches!(
            Click::new(0.0, 1.0, 0.0),
            Err(SignalError::Construction { signal: "Click", .. })
        ));
        assert!(Click::new(-0.1, 1.0, 0.0).is_err());
    }

    #[test]
    fn test_click_train_values() {
        let train = ClickTrain::new(2.0, 0.1, 1.0, 0.0).unwrap();
        assert_eq!(train.evaluate(0.05), 1.0);
        assert_eq!(train.evaluate(0.6), 0.0);
        assert_eq!(train.evaluate(0.5), 1.0);
        assert_eq!(train.evaluate(0.3), 0.0);
        assert_eq!(train.evaluate(-0.45), 1.0);
        assert_eq!(train.period().unwrap(), 0.5);
    }

    #[test]
    fn test_click_train_edges_over_many_periods() {
        let train = ClickTrain::new(10.0, 0.02, 1.0, 0.0).unwrap();
        for k in 0..100 {
            let start = k as f64 * 0.1;
            assert_eq!(train.evaluate(start), 1.0, "start of period {k}");
            assert_eq!(train.evaluate(start + 0.02), 0.0, "end of click {k}");
        }
    }

    #[test]
    fn test_click_train_phase_shift() {
        // 0.2 of a turn delays the clicks by 0.2 s
        let train = ClickTrain::new(2.0, 0.1, 1.0, TAU * 0.2).unwrap();
        assert_eq!(train.evaluate(0.05), 0.0);
        assert_eq!(train.evaluate(0.25), 1.0);
        assert_eq!(train.evaluate(0.75), 1.0);

        // Half a turn is a whole period at 2 Hz
        let half_turn = ClickTrain::new(2.0, 0.1, 1.0, std::f64::consts::PI).unwrap();
        assert_eq!(half_turn.evaluate(0.3), 0.0);
        assert_eq!(half_turn.evaluate(0.05), 1.0);
    }

    #[test]
    fn test_click_train_rejections() {
        assert!(ClickTrain::new(0.0, 0.1, 1.0, 0.0).is_err());
        assert!(ClickTrain::new(-2.0, 0.1, 1.0, 0.0).is_err());
        assert!(ClickTrain::new(2.0, 0.1, 0.0, 0.0).is_err());
        assert!(ClickTrain::new(2.0, 0.5, 1.0, 0.0).is_err());
        assert!(ClickTrain::new(2.0, 0.7, 1.0, 0.0).is_err());
        assert!(ClickTrain::new(2.0, 0.0, 1.0, 0.0).is_err());
    }

    #[test]
    fn test_display() {
        let train = ClickTrain::new(2.0, 0.1, 0.5, 0.0).unwrap();
        assert_eq!(train.to_string(), "0.5*(0 <= t % 0.5 < 0.1)");
        let delayed = ClickTrain::new(2.0, 0.1, 1.0, TAU / 4.0).unwrap();
        assert_eq!(delayed.to_string(), "(0 <= (t - 0.25) % 0.5 < 0.1)");
        let click = Click::new(0.25, 1.0, 2.0).unwrap();
        assert_eq!(click.to_string(), "1*(2 <= t < 2.25)");
    }
}
