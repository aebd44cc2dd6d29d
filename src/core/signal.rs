//! Core signal trait and parameter types.
//!
//! This module provides the fundamental `Signal` trait that represents any
//! continuous-time signal as a pure function of time, the `SignalRef` handle
//! used to share sub-expressions between composites, and the `Param` type
//! for parameters that can be either fixed or time-varying.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::error::{Result, SignalError};
use crate::sampling::TimeGrid;

/// The operator a composite signal folds its children with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeKind {
    Sum,
    Product,
}

/// Common interface for every signal.
///
/// A signal is a pure function from time (seconds) to amplitude. It carries
/// no time-varying state between calls, so the same signal may be shared by
/// many composites and evaluated in any order. Noise sources are the one
/// exception: they draw from a random source on every call.
///
/// The trait provides three operations:
/// - Point evaluation via `evaluate()`
/// - Bulk evaluation over a time grid via `sample_over()`
/// - The fundamental period via `period()`
///
/// # Examples
///
/// ```
/// use harmonia::{Signal, Sine};
///
/// let sine = Sine::new(1.0).unwrap();
/// assert!((sine.evaluate(0.25) - 1.0).abs() < 1e-12);
/// assert_eq!(sine.period().unwrap(), 1.0);
/// ```
pub trait Signal: fmt::Display + Send + Sync {
    /// Returns the amplitude of the signal at time `t` (in seconds).
    fn evaluate(&self, t: f64) -> f64;

    /// Returns the fundamental period in seconds.
    ///
    /// A period of 0 means the signal is effectively aperiodic (noise,
    /// enveloped signals). Signals with no computable period return
    /// `SignalError::PeriodUndefined`, which is the default.
    fn period(&self) -> Result<f64> {
        Err(SignalError::PeriodUndefined(self.to_string()))
    }

    /// Evaluates the signal at every instant of `grid`.
    ///
    /// Default implementation calls `evaluate()` for each instant.
    /// Implementors may override this for more efficient bulk evaluation,
    /// but the result must always have exactly `grid.n_frames()` values.
    fn sample_over(&self, grid: &TimeGrid) -> Vec<f64> {
        grid.iter().map(|t| self.evaluate(t)).collect()
    }

    /// Exposes the children of a composite node.
    ///
    /// Leaves return `None`. Sum and product use this to flatten nested
    /// nodes of their own kind.
    fn composite(&self) -> Option<(CompositeKind, &[SignalRef])> {
        None
    }
}

/// A shared, immutable reference to a signal.
///
/// Cloning a `SignalRef` is cheap and shares the underlying signal, so one
/// sub-expression can appear in several composites.
///
/// # Examples
///
/// ```
/// use harmonia::{Signal, SignalRef, Sine, WhiteNoise};
///
/// let tone: SignalRef = Sine::new(440.0).unwrap().into();
/// let noisy = &tone + &SignalRef::from(WhiteNoise::new(0.05));
/// let gated = &tone * &SignalRef::from(Sine::new(2.0).unwrap());
/// assert_eq!(noisy.children().len(), 2);
/// assert_eq!(gated.children().len(), 2);
/// ```
#[derive(Clone)]
pub struct SignalRef(Arc<dyn Signal>);

impl SignalRef {
    /// Wraps a signal into a shared handle.
    pub fn new(signal: impl Signal + 'static) -> Self {
        SignalRef(Arc::new(signal))
    }

    /// Returns true if both handles point at the same signal.
    pub fn ptr_eq(&self, other: &SignalRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SignalRef {
    type Target = dyn Signal;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl<S: Signal + 'static> From<S> for SignalRef {
    fn from(signal: S) -> Self {
        SignalRef::new(signal)
    }
}

impl fmt::Display for SignalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Debug for SignalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SignalRef({})", self.0)
    }
}

/// A parameter that can be either a fixed value or driven by a signal.
///
/// This type is used for parameters that can be controlled either
/// statically (with a fixed value) or as a function of time (by another
/// signal, such as an envelope curve or a slow sine).
///
/// # Examples
///
/// ```
/// use harmonia::{FunctionSignal, Param};
///
/// // Fixed parameter
/// let fixed: Param = 0.5.into();
/// assert_eq!(fixed.at(10.0), 0.5);
///
/// // Time-varying parameter
/// let ramp: Param = FunctionSignal::new(|t| 2.0 * t).into();
/// assert_eq!(ramp.at(3.0), 6.0);
/// ```
#[derive(Clone)]
pub enum Param {
    /// A fixed, constant value
    Fixed(f64),
    /// A value read from a signal at the evaluation time
    Varying(SignalRef),
}

impl Param {
    /// Gets the value of the parameter at time `t`.
    pub fn at(&self, t: f64) -> f64 {
        match self {
            Param::Fixed(v) => *v,
            Param::Varying(s) => s.evaluate(t),
        }
    }

    /// Gets the values of the parameter over a whole grid.
    pub fn over(&self, grid: &TimeGrid) -> Vec<f64> {
        match self {
            Param::Fixed(v) => vec![*v; grid.n_frames()],
            Param::Varying(s) => s.sample_over(grid),
        }
    }

    /// Returns true if this parameter is fixed.
    pub fn is_fixed(&self) -> bool {
        matches!(self, Param::Fixed(_))
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Fixed(value)
    }
}

impl From<SignalRef> for Param {
    fn from(signal: SignalRef) -> Self {
        Param::Varying(signal)
    }
}

impl<S: Signal + 'static> From<S> for Param {
    fn from(signal: S) -> Self {
        Param::Varying(SignalRef::new(signal))
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Fixed(v) => f.write_str(&short(*v)),
            Param::Varying(s) => write!(f, "({s})"),
        }
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Fixed(v) => write!(f, "Param::Fixed({v})"),
            Param::Varying(s) => write!(f, "Param::Varying({s})"),
        }
    }
}

/// A signal that always returns the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant(pub f64);

impl Signal for Constant {
    fn evaluate(&self, _t: f64) -> f64 {
        self.0
    }

    fn sample_over(&self, grid: &TimeGrid) -> Vec<f64> {
        vec![self.0; grid.n_frames()]
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&short(self.0))
    }
}

/// Wraps an arbitrary function of time as a signal.
///
/// # Examples
///
/// ```
/// use harmonia::{FunctionSignal, Signal};
///
/// let decay = FunctionSignal::named("exp(-t)", |t| (-t).exp());
/// assert_eq!(decay.evaluate(0.0), 1.0);
/// assert_eq!(decay.to_string(), "exp(-t)");
/// ```
pub struct FunctionSignal<F>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    func: F,
    label: Option<String>,
}

impl<F> FunctionSignal<F>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func, label: None }
    }

    /// Creates a function signal that displays as `label`.
    pub fn named(label: impl Into<String>, func: F) -> Self {
        Self {
            func,
            label: Some(label.into()),
        }
    }
}

impl<F> Signal for FunctionSignal<F>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn evaluate(&self, t: f64) -> f64 {
        (self.func)(t)
    }
}

impl<F> fmt::Display for FunctionSignal<F>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label.as_deref().unwrap_or("f(t)"))
    }
}

/// Formats a number rounded to three decimals, without trailing zeros.
pub(crate) fn short(value: f64) -> String {
    let text = format!("{:.3}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}
