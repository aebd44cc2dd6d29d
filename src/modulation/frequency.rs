use std::f64::consts::TAU;
use std::fmt;

use crate::core::{Signal, SignalRef, short};
use crate::oscillators::{Oscillator, Sine};

/// Frequency modulation of a sine carrier.
///
/// Evaluates `A·sin(2π·(f_c + depth·carried(t))·t + φ)`, where `A`, `f_c` and
/// `φ` are the carrier's own amplitude, frequency and phase.
///
/// # Examples
///
/// ```
/// use harmonia::{FrequencyModulation, Signal, Sine};
///
/// let vibrato = FrequencyModulation::new(Sine::new(440.0)?, Sine::new(6.0)?, 3.0);
/// assert_eq!(vibrato.evaluate(0.0), 0.0);
/// # Ok::<(), harmonia::SignalError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FrequencyModulation {
    carrier: Sine,
    carried: SignalRef,
    depth: f64,
}

impl FrequencyModulation {
    /// Adds `depth·carried(t)` to the instantaneous phase of `carrier`.
    pub fn new(carrier: Sine, carried: impl Into<SignalRef>, depth: f64) -> Self {
        Self {
            carrier,
            carried: carried.into(),
            depth,
        }
    }

    pub fn carrier(&self) -> &Sine {
        &self.carrier
    }

    pub fn carried(&self) -> &SignalRef {
        &self.carried
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }
}

impl Signal for FrequencyModulation {
    fn evaluate(&self, t: f64) -> f64 {
        let frequency = self.carrier.frequency() + self.depth * self.carried.evaluate(t);
        self.carrier.amplitude() * (TAU * frequency * t + self.carrier.phase()).sin()
    }
}

impl fmt::Display for FrequencyModulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}*sin(2π*({} + {}*({}))*t + {})",
            short(self.carrier.amplitude()),
            short(self.carrier.frequency()),
            short(self.depth),
            self.carried,
            short(self.carrier.phase())
        )
    }
}

crate::combinators::signal_ops!(FrequencyModulation);
