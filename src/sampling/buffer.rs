//! Materialized samples of a signal over a time grid.

use std::io::{Seek, Write};
use std::path::Path;

use crate::core::Signal;
use crate::error::{Result, SignalError};
use crate::io::{PlotOptions, PlotRenderer, Player, TempWave, WaveSpec, wav};
use crate::sampling::{SampleWidth, TimeGrid};

/// The values of a signal at every instant of a `TimeGrid`.
///
/// A buffer always holds exactly `grid.n_frames()` values and is immutable
/// once built; normalization returns a new buffer.
///
/// # Examples
///
/// ```
/// use harmonia::{SampleBuffer, Sine, TimeGridConfig};
///
/// let grid = TimeGridConfig::new()
///     .with_t_min(0.0)
///     .with_duration(0.001)
///     .with_frame_rate(8000.0)
///     .resolve()
///     .unwrap();
/// let sine = Sine::new(440.0).unwrap().with_amplitude(0.5);
/// let buffer = SampleBuffer::from_signal(grid, &sine).unwrap();
/// assert_eq!(buffer.len(), 8);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    grid: TimeGrid,
    values: Vec<f64>,
}

impl SampleBuffer {
    /// Wraps precomputed values; their count must match the grid.
    pub fn new(grid: TimeGrid, values: Vec<f64>) -> Result<Self> {
        if values.len() != grid.n_frames() {
            return Err(SignalError::Configuration(format!(
                "{} values do not fit a grid of {} frames",
                values.len(),
                grid.n_frames()
            )));
        }
        Ok(Self { grid, values })
    }

    /// Samples `signal` over every instant of `grid`.
    pub fn from_signal(grid: TimeGrid, signal: &(impl Signal + ?Sized)) -> Result<Self> {
        log::debug!("sampling `{signal}` over {grid}");
        Self::new(grid, signal.sample_over(&grid))
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest absolute value, 0 for an empty buffer.
    pub fn peak(&self) -> f64 {
        self.values.iter().fold(0.0_f64, |peak, v| peak.max(v.abs()))
    }

    /// Rescales the values so that the peak absolute value equals `target`.
    ///
    /// Relative proportions and signs are preserved. Fails with
    /// `DegenerateBuffer` when every value is zero, and with `Configuration`
    /// when any value is NaN or infinite.
    pub fn normalized(&self, target: f64) -> Result<Self> {
        if !target.is_finite() {
            return Err(SignalError::Configuration(format!(
                "normalization target {target} is not finite"
            )));
        }
        if let Some(bad) = self.values.iter().find(|v| !v.is_finite()) {
            return Err(SignalError::Configuration(format!(
                "cannot normalize a buffer holding {bad}"
            )));
        }
        let peak = self.peak();
        if peak == 0.0 {
            return Err(SignalError::DegenerateBuffer);
        }
        // Dividing first keeps the peak itself at exactly `target`
        Ok(Self {
            grid: self.grid,
            values: self.values.iter().map(|v| v / peak * target).collect(),
        })
    }

    /// Converts each value to a clipped integer sample of `width`.
    pub fn quantized(&self, width: SampleWidth) -> Vec<i32> {
        self.values.iter().map(|&v| width.quantize(v)).collect()
    }

    /// `(time, value)` pairs for plotting.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.grid.iter().zip(self.values.iter().copied())
    }

    /// Writes the buffer as an uncompressed PCM WAV file.
    pub fn write_wav(&self, path: impl AsRef<Path>, spec: &WaveSpec) -> Result<()> {
        let samples = self.pcm_for(spec)?;
        wav::write_file(path.as_ref(), self.grid.frame_rate(), spec, &samples)
    }

    /// Writes the buffer as WAV data into any seekable writer.
    pub fn write_wav_to<W: Write + Seek>(&self, writer: W, spec: &WaveSpec) -> Result<()> {
        let samples = self.pcm_for(spec)?;
        wav::write(writer, self.grid.frame_rate(), spec, &samples)
    }

    /// Renders to a temporary WAV file and hands it to `player`.
    ///
    /// The temporary file is removed afterwards on every path; a failed
    /// removal is logged, not returned.
    pub fn play(&self, player: &impl Player, spec: &WaveSpec, blocking: bool) -> Result<()> {
        let temp = TempWave::create()?;
        self.write_wav(temp.path(), spec)?;
        player.play_file(temp.path(), blocking)
    }

    /// Sends the `(time, value)` pairs to a plot renderer.
    pub fn plot(&self, renderer: &impl PlotRenderer, options: &PlotOptions) -> Result<()> {
        let points: Vec<(f64, f64)> = self.points().collect();
        renderer.render(&points, options)
    }

    fn pcm_for(&self, spec: &WaveSpec) -> Result<Vec<i32>> {
        match spec.normalize_to {
            Some(target) => Ok(self.normalized(target)?.quantized(spec.sample_width)),
            None => Ok(self.quantized(spec.sample_width)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Constant, FunctionSignal};
    use crate::sampling::TimeGridConfig;

    fn grid(n_frames: usize) -> TimeGrid {
        TimeGridConfig::new()
            .with_t_min(0.0)
            .with_n_frames(n_frames)
            .with_frame_rate(n_frames.max(1) as f64)
            .resolve()
            .unwrap()
    }

    #[test]
    fn test_length_matches_grid() {
        for n in [0, 1, 7, 100] {
            let buffer = SampleBuffer::from_signal(grid(n), &Constant(1.0)).unwrap();
            assert_eq!(buffer.len(), grid(n).n_frames());
        }
    }

    #[test]
    fn test_new_rejects_mismatch() {
        assert!(SampleBuffer::new(grid(3), vec![0.0; 2]).is_err());
    }

    #[test]
    fn test_peak() {
        let buffer = SampleBuffer::new(grid(3), vec![0.25, -0.75, 0.5]).unwrap();
        assert_eq!(buffer.peak(), 0.75);
    }

    #[test]
    fn test_normalize_preserves_proportions() {
        let buffer = SampleBuffer::new(grid(3), vec![0.25, -0.5, 0.125]).unwrap();
        let normalized = buffer.normalized(1.0).unwrap();
        assert_eq!(normalized.values(), &[0.5, -1.0, 0.25]);
        assert_eq!(normalized.grid(), buffer.grid());
    }

    #[test]
    fn test_normalize_idempotent() {
        let signal = FunctionSignal::new(|t| (t * 7.0).sin() * 3.0);
        let buffer = SampleBuffer::from_signal(grid(64), &signal).unwrap();
        let once = buffer.normalized(0.8).unwrap();
        let twice = once.normalized(0.8).unwrap();
        for (a, b) in once.values().iter().zip(twice.values()) {
            assert!((a - b).abs() < 1e-12);
        }
        assert!((once.peak() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_all_zero_fails() {
        let buffer = SampleBuffer::from_signal(grid(5), &Constant(0.0)).unwrap();
        assert!(matches!(
            buffer.normalized(1.0),
            Err(SignalError::DegenerateBuffer)
        ));
    }

    #[test]
    fn test_normalize_non_finite_fails() {
        for bad in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let buffer = SampleBuffer::new(grid(2), vec![bad, 1.0]).unwrap();
            assert!(matches!(
                buffer.normalized(1.0),
                Err(SignalError::Configuration(_))
            ));
        }
    }

    #[test]
    fn test_quantized() {
        let buffer = SampleBuffer::new(grid(4), vec![1.0, -1.0, 2.0, 0.0]).unwrap();
        assert_eq!(
            buffer.quantized(SampleWidth::Int16),
            vec![32767, -32768, 32767, 0]
        );
    }

    #[test]
    fn test_points() {
        let buffer = SampleBuffer::new(grid(2), vec![3.0, 4.0]).unwrap();
        let points: Vec<_> = buffer.points().collect();
        assert_eq!(points, vec![(0.0, 3.0), (0.5, 4.0)]);
    }
}
