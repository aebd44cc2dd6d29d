//! Amplitude and frequency modulation.
//!
//! Both modulators combine a carrier with a carried (modulating) signal and a
//! depth factor. Their periods are undefined.

mod amplitude;
mod frequency;

pub use amplitude::AmplitudeModulation;
pub use frequency::FrequencyModulation;
