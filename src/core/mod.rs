//! Core signal types and traits.
//!
//! This module provides the fundamental abstractions used throughout the
//! library, including:
//! - `Signal` trait for every time function
//! - `SignalRef` for shared, immutable sub-expressions
//! - `Param` type for fixed or time-varying parameters
//! - `Constant` and `FunctionSignal` for ad hoc signals
//! - `rational` helpers for composite period computation

pub mod rational;
mod signal;

pub(crate) use signal::short;
pub use signal::{CompositeKind, Constant, FunctionSignal, Param, Signal, SignalRef};
