//! Harmonia - composable signal synthesis for Rust
//!
//! Signals are continuous functions of time. They combine algebraically
//! into expression trees (sums, products, envelopes, modulation) and are
//! rendered into sample buffers over a discrete time grid for WAV export,
//! playback and plotting.
//!
//! # Examples
//!
//! ```
//! use harmonia::{HarmonicSeries, Signal, SignalExt, TimeGridConfig, WhiteNoise};
//!
//! let series = HarmonicSeries::with_generators(220.0, 30, |n| (-f64::from(n) / 2.0).exp(), |_| 0.0)?;
//! let noisy = series + WhiteNoise::new(0.075);
//!
//! let buffer = noisy.sample(&TimeGridConfig::seconds(0.1))?;
//! assert_eq!(buffer.len(), 4410);
//! assert_eq!(noisy.period()?, 0.0);
//! # Ok::<(), harmonia::SignalError>(())
//! ```

pub mod combinators;
pub mod core;
pub mod envelopes;
pub mod error;
pub mod io;
pub mod modulation;
pub mod noise;
pub mod oscillators;
pub mod sampling;

// Re-export commonly used types at the crate root
pub use combinators::{Product, SignalExt, Sum};
pub use crate::core::{CompositeKind, Constant, FunctionSignal, Param, Signal, SignalRef};
pub use envelopes::Envelope;
pub use error::{Result, SignalError};
#[cfg(feature = "playback")]
pub use io::CpalPlayer;
pub use io::{PlotOptions, PlotRenderer, Player, TextPlot, WaveSpec};
pub use modulation::{AmplitudeModulation, FrequencyModulation};
pub use noise::{GaussianNoise, NoiseSource, WhiteNoise};
pub use oscillators::{
    Click, ClickTrain, Cosine, HarmonicSeries, Oscillator, Sawtooth, Sine, VaryingCosine,
};
pub use sampling::{SampleBuffer, SampleWidth, TimeGrid, TimeGridConfig};
