use std::fmt;

use crate::core::{Signal, SignalRef, short};
use crate::sampling::TimeGrid;

/// Amplitude modulation: `carrier(t)·(1 + depth·carried(t))`.
///
/// # Examples
///
/// ```
/// use harmonia::{AmplitudeModulation, Signal, Sine};
///
/// let tremolo = AmplitudeModulation::new(Sine::new(440.0)?, Sine::new(5.0)?, 0.5);
/// let t = 0.05;
/// let expected = Sine::new(440.0)?.evaluate(t) * (1.0 + 0.5 * Sine::new(5.0)?.evaluate(t));
/// assert!((tremolo.evaluate(t) - expected).abs() < 1e-12);
/// # Ok::<(), harmonia::SignalError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AmplitudeModulation {
    carrier: SignalRef,
    carried: SignalRef,
    depth: f64,
}

impl AmplitudeModulation {
    /// Modulates the amplitude of `carrier` by `carried`.
    ///
    /// # Arguments
    ///
    /// * `carrier` - The signal being modulated
    /// * `carried` - The modulating signal, typically in `[-1, 1]`
    /// * `depth` - Scale of the modulation; 0 leaves the carrier unchanged
    pub fn new(carrier: impl Into<SignalRef>, carried: impl Into<SignalRef>, depth: f64) -> Self {
        Self {
            carrier: carrier.into(),
            carried: carried.into(),
            depth,
        }
    }

    pub fn carrier(&self) -> &SignalRef {
        &self.carrier
    }

    pub fn carried(&self) -> &SignalRef {
        &self.carried
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }
}

impl Signal for AmplitudeModulation {
    fn evaluate(&self, t: f64) -> f64 {
        self.carrier.evaluate(t) * (1.0 + self.depth * self.carried.evaluate(t))
    }

    fn sample_over(&self, grid: &TimeGrid) -> Vec<f64> {
        let carried = self.carried.sample_over(grid);
        let mut values = self.carrier.sample_over(grid);
        for (v, m) in values.iter_mut().zip(carried) {
            *v *= 1.0 + self.depth * m;
        }
        values
    }
}

impl fmt::Display for AmplitudeModulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}) * (1 + {}*({}))",
            self.carrier,
            short(self.depth),
            self.carried
        )
    }
}

crate::combinators::signal_ops!(AmplitudeModulation);
