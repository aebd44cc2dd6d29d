//! Discrete time grids, sample buffers and PCM quantization.

mod buffer;
mod grid;
mod pcm;

pub use buffer::SampleBuffer;
pub use grid::{DEFAULT_FRAME_RATE, Instants, MAX_FRAMES, TimeGrid, TimeGridConfig};
pub use pcm::SampleWidth;
