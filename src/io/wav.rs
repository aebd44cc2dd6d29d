//! Uncompressed PCM WAV output.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use crate::error::{Result, SignalError};
use crate::sampling::SampleWidth;

/// Every rendered file carries the same sample on two channels.
pub const CHANNELS: u16 = 2;

/// Parameters of a WAV rendering.
///
/// # Examples
///
/// ```
/// use harmonia::{SampleWidth, WaveSpec};
///
/// let spec = WaveSpec::default()
///     .with_sample_width(SampleWidth::Int24)
///     .normalized_to(0.5);
/// assert_eq!(spec.normalize_to, Some(0.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaveSpec {
    pub sample_width: SampleWidth,
    /// Peak amplitude to normalize to before quantization, if any.
    pub normalize_to: Option<f64>,
    /// Frames held in the write buffer before it is flushed.
    pub buffer_frames: usize,
}

impl Default for WaveSpec {
    fn default() -> Self {
        Self {
            sample_width: SampleWidth::Int16,
            normalize_to: None,
            buffer_frames: 2048,
        }
    }
}

impl WaveSpec {
    pub fn with_sample_width(mut self, sample_width: SampleWidth) -> Self {
        self.sample_width = sample_width;
        self
    }

    pub fn normalized_to(mut self, peak: f64) -> Self {
        self.normalize_to = Some(peak);
        self
    }

    pub fn with_buffer_frames(mut self, buffer_frames: usize) -> Self {
        self.buffer_frames = buffer_frames;
        self
    }

    fn frame_bytes(&self) -> usize {
        usize::from(self.sample_width.bytes()) * usize::from(CHANNELS)
    }
}

/// Creates (or truncates) `path` and writes the samples to it.
pub fn write_file(path: &Path, frame_rate: f64, spec: &WaveSpec, samples: &[i32]) -> Result<()> {
    let capacity = spec.buffer_frames.max(1) * spec.frame_bytes();
    let file = BufWriter::with_capacity(capacity, File::create(path)?);
    write(file, frame_rate, spec, samples)?;
    log::debug!(
        "wrote {} frames ({}) to {}",
        samples.len(),
        spec.sample_width,
        path.display()
    );
    Ok(())
}

/// Writes already-quantized samples as a WAV stream.
pub fn write<W: Write + Seek>(writer: W, frame_rate: f64, spec: &WaveSpec, samples: &[i32]) -> Result<()> {
    let header = hound::WavSpec {
        channels: CHANNELS,
        sample_rate: sample_rate_for(frame_rate)?,
        bits_per_sample: spec.sample_width.bits(),
        sample_format: hound::SampleFormat::Int,
    };
    let mut wav = hound::WavWriter::new(writer, header)?;
    for &sample in samples {
        for _ in 0..CHANNELS {
            wav.write_sample(sample)?;
        }
    }
    wav.finalize()?;
    Ok(())
}

/// The container stores an integral rate in Hz.
fn sample_rate_for(frame_rate: f64) -> Result<u32> {
    let rounded = frame_rate.round();
    if !(1.0..=u32::MAX as f64).contains(&rounded) {
        return Err(SignalError::Configuration(format!(
            "frame rate {frame_rate} cannot be stored in a WAV header"
        )));
    }
    if rounded != frame_rate {
        log::warn!("frame rate {frame_rate} Hz rounded to {rounded} Hz for WAV output");
    }
    Ok(rounded as u32)
}
