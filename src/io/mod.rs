//! Output collaborators: WAV files, playback and plotting.
//!
//! The signal core hands fully quantized samples to these and receives
//! nothing back.

#[cfg(feature = "playback")]
mod device;
mod playback;
mod plot;
pub mod wav;

#[cfg(feature = "playback")]
pub use device::CpalPlayer;
pub use playback::{Player, TempWave};
pub use plot::{PlotOptions, PlotRenderer, TextPlot};
pub use wav::WaveSpec;
