//! Signal combinators for composing signals algebraically.
//!
//! This module provides the two structural combinators, `Sum` and
//! `Product`, the `+` and `*` operators that build them, and the `SignalExt`
//! extension trait with envelope, modulation and sampling shortcuts.
//!
//! Composites flatten children of their own kind, so `(a + b) + c` stores
//! `[a, b, c]`. Child order only affects how the expression is displayed.

use std::fmt;
use std::ops::{Add, Mul};
use std::path::Path;

use crate::core::rational::lcm_of_reals;
use crate::core::{CompositeKind, Param, Signal, SignalRef};
use crate::envelopes::Envelope;
use crate::error::{Result, SignalError};
use crate::io::{PlotOptions, PlotRenderer, Player, WaveSpec};
use crate::modulation::AmplitudeModulation;
use crate::noise::WhiteNoise;
use crate::oscillators::Sine;
use crate::sampling::{SampleBuffer, TimeGrid, TimeGridConfig};

/// Adds signals together (mixing).
///
/// An empty sum evaluates to 0.
///
/// # Examples
///
/// ```
/// use harmonia::{Signal, Sine, Sum};
///
/// let chord = Sine::new(440.0).unwrap() + Sine::new(660.0).unwrap();
/// assert_eq!(chord.children().len(), 2);
///
/// let t = 0.123;
/// let expected = Sine::new(440.0).unwrap().evaluate(t) + Sine::new(660.0).unwrap().evaluate(t);
/// assert!((chord.evaluate(t) - expected).abs() < 1e-12);
/// ```
#[derive(Clone, Default)]
pub struct Sum {
    children: Vec<SignalRef>,
}

impl Sum {
    pub fn new(children: impl IntoIterator<Item = SignalRef>) -> Self {
        Self {
            children: flatten(CompositeKind::Sum, children),
        }
    }

    pub fn children(&self) -> &[SignalRef] {
        &self.children
    }
}

impl Signal for Sum {
    fn evaluate(&self, t: f64) -> f64 {
        self.children.iter().map(|child| child.evaluate(t)).sum()
    }

    fn period(&self) -> Result<f64> {
        composite_period(self, &self.children)
    }

    fn sample_over(&self, grid: &TimeGrid) -> Vec<f64> {
        let mut acc = vec![0.0; grid.n_frames()];
        for child in &self.children {
            for (a, v) in acc.iter_mut().zip(child.sample_over(grid)) {
                *a += v;
            }
        }
        acc
    }

    fn composite(&self) -> Option<(CompositeKind, &[SignalRef])> {
        Some((CompositeKind::Sum, &self.children))
    }
}

impl fmt::Display for Sum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.children.is_empty() {
            return f.write_str("0");
        }
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{child}")?;
        }
        Ok(())
    }
}

/// Multiplies signals together (ring modulation, gating).
///
/// An empty product evaluates to 1, the multiplicative identity.
///
/// # Examples
///
/// ```
/// use harmonia::{Constant, Product, Signal, SignalRef};
///
/// let p = Product::new([SignalRef::from(Constant(2.0)), Constant(3.0).into()]);
/// assert_eq!(p.evaluate(0.0), 6.0);
/// assert_eq!(Product::default().evaluate(0.0), 1.0);
/// ```
#[derive(Clone, Default)]
pub struct Product {
    children: Vec<SignalRef>,
}

impl Product {
    pub fn new(children: impl IntoIterator<Item = SignalRef>) -> Self {
        Self {
            children: flatten(CompositeKind::Product, children),
        }
    }

    pub fn children(&self) -> &[SignalRef] {
        &self.children
    }
}

impl Signal for Product {
    fn evaluate(&self, t: f64) -> f64 {
        self.children.iter().map(|child| child.evaluate(t)).product()
    }

    fn period(&self) -> Result<f64> {
        composite_period(self, &self.children)
    }

    fn sample_over(&self, grid: &TimeGrid) -> Vec<f64> {
        let mut acc = vec![1.0; grid.n_frames()];
        for child in &self.children {
            for (a, v) in acc.iter_mut().zip(child.sample_over(grid)) {
                *a *= v;
            }
        }
        acc
    }

    fn composite(&self) -> Option<(CompositeKind, &[SignalRef])> {
        Some((CompositeKind::Product, &self.children))
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.children.is_empty() {
            return f.write_str("1");
        }
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                f.write_str(" * ")?;
            }
            match child.composite() {
                Some((CompositeKind::Sum, _)) => write!(f, "({child})")?,
                _ => write!(f, "{child}")?,
            }
        }
        Ok(())
    }
}

/// Splices in the children of nested composites of the same kind.
fn flatten(kind: CompositeKind, children: impl IntoIterator<Item = SignalRef>) -> Vec<SignalRef> {
    let mut flat = Vec::new();
    for child in children {
        let nested = match child.composite() {
            Some((child_kind, grandchildren)) if child_kind == kind => Some(grandchildren.to_vec()),
            _ => None,
        };
        match nested {
            Some(grandchildren) => flat.extend(grandchildren),
            None => flat.push(child),
        }
    }
    flat
}

/// LCM of the children's periods; 0 if any child is aperiodic.
fn composite_period(node: &dyn Signal, children: &[SignalRef]) -> Result<f64> {
    let undefined = || SignalError::PeriodUndefined(node.to_string());
    if children.is_empty() {
        return Err(undefined());
    }
    let periods = children
        .iter()
        .map(|child| child.period())
        .collect::<Result<Vec<f64>>>()
        .map_err(|_| undefined())?;
    if periods.contains(&0.0) {
        return Ok(0.0);
    }
    lcm_of_reals(&periods).ok_or_else(undefined)
}

impl From<&SignalRef> for SignalRef {
    fn from(signal: &SignalRef) -> Self {
        signal.clone()
    }
}

impl<R: Into<SignalRef>> Add<R> for SignalRef {
    type Output = Sum;

    fn add(self, rhs: R) -> Sum {
        Sum::new([self, rhs.into()])
    }
}

impl<R: Into<SignalRef>> Mul<R> for SignalRef {
    type Output = Product;

    fn mul(self, rhs: R) -> Product {
        Product::new([self, rhs.into()])
    }
}

impl<R: Into<SignalRef>> Add<R> for &SignalRef {
    type Output = Sum;

    fn add(self, rhs: R) -> Sum {
        Sum::new([self.clone(), rhs.into()])
    }
}

impl<R: Into<SignalRef>> Mul<R> for &SignalRef {
    type Output = Product;

    fn mul(self, rhs: R) -> Product {
        Product::new([self.clone(), rhs.into()])
    }
}

/// Implements `+` and `*` for concrete signal types.
macro_rules! signal_ops {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<R: Into<$crate::core::SignalRef>> ::std::ops::Add<R> for $ty {
                type Output = $crate::combinators::Sum;

                fn add(self, rhs: R) -> Self::Output {
                    $crate::combinators::Sum::new([$crate::core::SignalRef::new(self), rhs.into()])
                }
            }

            impl<R: Into<$crate::core::SignalRef>> ::std::ops::Mul<R> for $ty {
                type Output = $crate::combinators::Product;

                fn mul(self, rhs: R) -> Self::Output {
                    $crate::combinators::Product::new([$crate::core::SignalRef::new(self), rhs.into()])
                }
            }
        )*
    };
}
pub(crate) use signal_ops;

signal_ops!(Sum, Product, crate::core::Constant);

/// Extension trait providing combinator and sampling shortcuts on signals.
///
/// This trait is automatically implemented for every `Signal`, including
/// `dyn Signal` behind a `SignalRef`.
///
/// # Examples
///
/// ```
/// use harmonia::{SignalExt, Sine, TimeGridConfig};
///
/// let noisy = Sine::new(440.0).unwrap().add_white_noise(0.05);
/// let buffer = noisy.sample(&TimeGridConfig::seconds(0.01)).unwrap();
/// assert_eq!(buffer.len(), 441);
/// ```
pub trait SignalExt: Signal {
    /// Wraps this signal in a shared handle.
    fn shared(self) -> SignalRef
    where
        Self: Sized + 'static,
    {
        SignalRef::new(self)
    }

    /// Adds a sine of the given frequency, amplitude and phase.
    fn add_sine(self, frequency: f64, amplitude: f64, phase: f64) -> Result<Sum>
    where
        Self: Sized + 'static,
    {
        let sine = Sine::new(frequency)?
            .with_amplitude(amplitude)
            .with_phase(phase);
        Ok(Sum::new([SignalRef::new(self), sine.into()]))
    }

    /// Adds uniform white noise in `[-amplitude, amplitude]`.
    fn add_white_noise(self, amplitude: f64) -> Sum
    where
        Self: Sized + 'static,
    {
        Sum::new([SignalRef::new(self), WhiteNoise::new(amplitude).into()])
    }

    /// Scales this signal by a time-varying amplitude.
    fn enveloped(self, amplitude: impl Into<Param>) -> Envelope
    where
        Self: Sized + 'static,
    {
        Envelope::new(self, amplitude)
    }

    /// Amplitude-modulates this carrier by `carried` with depth `depth`.
    fn modulated_by(self, carried: impl Into<SignalRef>, depth: f64) -> AmplitudeModulation
    where
        Self: Sized + 'static,
    {
        AmplitudeModulation::new(self, carried, depth)
    }

    /// Samples this signal over the grid described by `config`.
    fn sample(&self, config: &TimeGridConfig) -> Result<SampleBuffer> {
        SampleBuffer::from_signal(config.resolve()?, self)
    }

    /// Samples this signal and writes it as a WAV file.
    fn write_wav(&self, path: impl AsRef<Path>, config: &TimeGridConfig, spec: &WaveSpec) -> Result<()> {
        self.sample(config)?.write_wav(path, spec)
    }

    /// Samples this signal and plays it.
    fn play(&self, config: &TimeGridConfig, player: &impl Player, spec: &WaveSpec, blocking: bool) -> Result<()> {
        self.sample(config)?.play(player, spec, blocking)
    }

    /// Samples this signal and plots it.
    fn plot(&self, config: &TimeGridConfig, renderer: &impl PlotRenderer, options: &PlotOptions) -> Result<()> {
        self.sample(config)?.plot(renderer, options)
    }
}

// Blanket implementation for all Signal types
impl<T: Signal + ?Sized> SignalExt for T {}
