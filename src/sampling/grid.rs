//! Discrete time axis derived from partial parameters.
//!
//! A `TimeGrid` is the half-open interval `[t_min, t_max)` sampled at
//! `frame_rate`, giving `n_frames` instants `t_min + i / frame_rate`.
//! It is built from a `TimeGridConfig` in which any sufficient subset of the
//! five quantities is supplied:
//!
//! | bounds / duration      | plus                     |
//! |------------------------|--------------------------|
//! | `t_min`, `t_max`       | `n_frames` or `frame_rate` |
//! | `t_min`, `duration`    | `n_frames` or `frame_rate` |
//! | `t_max`, `duration`    | `n_frames` or `frame_rate` |
//! | `duration`             | `n_frames` and `frame_rate` |
//! | `t_min` or `t_max`     | `n_frames` and `frame_rate` |
//!
//! A frame count derived from `duration * frame_rate` is truncated, not
//! rounded, so a product such as `2.9999999999999996` yields 2 frames.

use std::fmt;

use crate::error::{Result, SignalError};

/// Frame rate used by the sampling shortcuts when none is given.
pub const DEFAULT_FRAME_RATE: f64 = 44100.0;

/// WAV frame counts are 32-bit.
pub const MAX_FRAMES: usize = u32::MAX as usize;

const TOLERANCE: f64 = 1e-9;

/// Partial description of a time grid.
///
/// # Examples
///
/// ```
/// use harmonia::TimeGridConfig;
///
/// let grid = TimeGridConfig::new()
///     .with_t_min(0.0)
///     .with_t_max(1.0)
///     .with_frame_rate(100.0)
///     .resolve()
///     .unwrap();
/// assert_eq!(grid.n_frames(), 100);
/// assert_eq!(grid.duration(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeGridConfig {
    pub t_min: Option<f64>,
    pub t_max: Option<f64>,
    pub duration: Option<f64>,
    pub n_frames: Option<usize>,
    pub frame_rate: Option<f64>,
}

impl TimeGridConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts at 0 and samples at `DEFAULT_FRAME_RATE` for `duration` seconds.
    pub fn seconds(duration: f64) -> Self {
        Self::new()
            .with_t_min(0.0)
            .with_duration(duration)
            .with_frame_rate(DEFAULT_FRAME_RATE)
    }

    pub fn with_t_min(mut self, t_min: f64) -> Self {
        self.t_min = Some(t_min);
        self
    }

    pub fn with_t_max(mut self, t_max: f64) -> Self {
        self.t_max = Some(t_max);
        self
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_n_frames(mut self, n_frames: usize) -> Self {
        self.n_frames = Some(n_frames);
        self
    }

    pub fn with_frame_rate(mut self, frame_rate: f64) -> Self {
        self.frame_rate = Some(frame_rate);
        self
    }

    /// Derives every missing quantity and validates the result.
    pub fn resolve(&self) -> Result<TimeGrid> {
        TimeGrid::from_config(self)
    }

    fn fail(&self, reason: &str) -> SignalError {
        SignalError::Configuration(format!("{reason} in {self}"))
    }
}

impl fmt::Display for TimeGridConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn field<T: fmt::Display>(f: &mut fmt::Formatter<'_>, name: &str, value: Option<T>) -> fmt::Result {
            match value {
                Some(v) => write!(f, "{name}={v}"),
                None => write!(f, "{name}=?"),
            }
        }
        f.write_str("{")?;
        field(f, "t_min", self.t_min)?;
        f.write_str(", ")?;
        field(f, "t_max", self.t_max)?;
        f.write_str(", ")?;
        field(f, "duration", self.duration)?;
        f.write_str(", ")?;
        field(f, "n_frames", self.n_frames)?;
        f.write_str(", ")?;
        field(f, "frame_rate", self.frame_rate)?;
        f.write_str("}")
    }
}

/// A fully resolved, evenly spaced set of time instants.
///
/// All five fields are fixed once built. `duration == t_max - t_min`, and
/// `n_frames` is the truncation of `duration * frame_rate` unless it was
/// supplied directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    t_min: f64,
    t_max: f64,
    duration: f64,
    n_frames: usize,
    frame_rate: f64,
}

impl TimeGrid {
    fn from_config(config: &TimeGridConfig) -> Result<Self> {
        for (name, value) in [
            ("t_min", config.t_min),
            ("t_max", config.t_max),
            ("duration", config.duration),
            ("frame_rate", config.frame_rate),
        ] {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(config.fail(&format!("{name} is not finite")));
                }
            }
        }
        if config.frame_rate.is_some_and(|r| r <= 0.0) {
            return Err(config.fail("frame_rate must be positive"));
        }
        if config.duration.is_some_and(|d| d < 0.0) {
            return Err(config.fail("duration must not be negative"));
        }
        if let Some(n) = config.n_frames {
            if n > MAX_FRAMES {
                return Err(config.fail("n_frames exceeds the supported maximum"));
            }
        }

        let (t_min, t_max, duration) = match (config.t_min, config.t_max, config.duration) {
            (Some(t_min), Some(t_max), duration) => {
                let derived = t_max - t_min;
                if duration.is_some_and(|d| !approx_eq(d, derived)) {
                    return Err(config.fail("duration disagrees with t_max - t_min"));
                }
                (t_min, t_max, derived)
            }
            (Some(t_min), None, Some(duration)) => (t_min, t_min + duration, duration),
            (None, Some(t_max), Some(duration)) => (t_max - duration, t_max, duration),
            (t_min, t_max, duration) => {
                let (Some(n_frames), Some(frame_rate)) = (config.n_frames, config.frame_rate) else {
                    return Err(config.fail("underspecified time grid"));
                };
                let derived = n_frames as f64 / frame_rate;
                match (t_min, t_max, duration) {
                    (Some(t_min), None, None) => (t_min, t_min + derived, derived),
                    (None, Some(t_max), None) => (t_max - derived, t_max, derived),
                    // Duration alone fixes no bound; the axis starts at 0.
                    (None, None, Some(duration)) if approx_eq(duration, derived) => {
                        (0.0, duration, duration)
                    }
                    (None, None, Some(_)) => {
                        return Err(config.fail("duration disagrees with n_frames / frame_rate"));
                    }
                    _ => return Err(config.fail("underspecified time grid")),
                }
            }
        };

        if duration < 0.0 {
            return Err(config.fail("t_max precedes t_min"));
        }

        let (n_frames, frame_rate) = match (config.n_frames, config.frame_rate) {
            (Some(n_frames), Some(frame_rate)) => {
                let expected = n_frames as f64 / frame_rate;
                if !approx_eq(expected, duration) && frames_for(duration, frame_rate, config)? != n_frames {
                    return Err(config.fail("n_frames disagrees with duration * frame_rate"));
                }
                (n_frames, frame_rate)
            }
            (Some(n_frames), None) => {
                if duration == 0.0 {
                    return Err(config.fail("frame_rate cannot be derived from a zero duration"));
                }
                (n_frames, n_frames as f64 / duration)
            }
            (None, Some(frame_rate)) => (frames_for(duration, frame_rate, config)?, frame_rate),
            (None, None) => {
                return Err(config.fail("either n_frames or frame_rate is required"));
            }
        };
        if !(frame_rate > 0.0 && frame_rate.is_finite()) {
            return Err(config.fail("derived frame_rate is not positive and finite"));
        }

        let grid = TimeGrid {
            t_min,
            t_max,
            duration,
            n_frames,
            frame_rate,
        };
        log::debug!("resolved {grid} from {config}");
        Ok(grid)
    }

    pub fn t_min(&self) -> f64 {
        self.t_min
    }

    pub fn t_max(&self) -> f64 {
        self.t_max
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn n_frames(&self) -> usize {
        self.n_frames
    }

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    /// Time between two consecutive instants.
    pub fn frame_width(&self) -> f64 {
        1.0 / self.frame_rate
    }

    /// The `index`-th instant, `t_min + index / frame_rate`.
    pub fn instant(&self, index: usize) -> f64 {
        self.t_min + index as f64 / self.frame_rate
    }

    /// Iterates over the instants. Each call starts from the beginning.
    pub fn iter(&self) -> Instants {
        Instants {
            grid: *self,
            front: 0,
            back: self.n_frames,
        }
    }

    pub fn len(&self) -> usize {
        self.n_frames
    }

    pub fn is_empty(&self) -> bool {
        self.n_frames == 0
    }
}

impl fmt::Display for TimeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}) x {} frames @ {} Hz",
            self.t_min, self.t_max, self.n_frames, self.frame_rate
        )
    }
}

impl<'a> IntoIterator for &'a TimeGrid {
    type Item = f64;
    type IntoIter = Instants;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the instants of a `TimeGrid`.
#[derive(Debug, Clone)]
pub struct Instants {
    grid: TimeGrid,
    front: usize,
    back: usize,
}

impl Iterator for Instants {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.front >= self.back {
            return None;
        }
        let t = self.grid.instant(self.front);
        self.front += 1;
        Some(t)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Instants {
    fn next_back(&mut self) -> Option<f64> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.grid.instant(self.back))
    }
}

impl ExactSizeIterator for Instants {}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// Truncated `duration * frame_rate`, checked before any allocation.
fn frames_for(duration: f64, frame_rate: f64, config: &TimeGridConfig) -> Result<usize> {
    let raw = duration * frame_rate;
    if !raw.is_finite() || raw < 0.0 {
        return Err(config.fail("frame count is not a finite non-negative number"));
    }
    if raw > MAX_FRAMES as f64 {
        return Err(config.fail("frame count exceeds the supported maximum"));
    }
    Ok(raw.trunc() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-12, "{a} != {b}");
    }

    #[test]
    fn test_bounds_and_frame_rate() {
        let grid = TimeGridConfig::new()
            .with_t_min(0.0)
            .with_t_max(1.0)
            .with_frame_rate(100.0)
            .resolve()
            .unwrap();
        assert_eq!(grid.n_frames(), 100);
        assert_eq!(grid.duration(), 1.0);

        let instants: Vec<f64> = grid.iter().collect();
        assert_eq!(instants.len(), 100);
        assert_eq!(instants[0], 0.0);
        assert_close(instants[1], 0.01);
        assert_close(instants[99], 0.99);
    }

    #[test]
    fn test_bounds_and_n_frames() {
        let grid = TimeGridConfig::new()
            .with_t_min(1.0)
            .with_t_max(3.0)
            .with_n_frames(8)
            .resolve()
            .unwrap();
        assert_eq!(grid.frame_rate(), 4.0);
        assert_eq!(grid.duration(), 2.0);
    }

    #[test]
    fn test_t_min_and_duration() {
        let grid = TimeGridConfig::new()
            .with_t_min(0.5)
            .with_duration(0.5)
            .with_frame_rate(10.0)
            .resolve()
            .unwrap();
        assert_eq!(grid.t_max(), 1.0);
        assert_eq!(grid.n_frames(), 5);
    }

    #[test]
    fn test_t_max_and_duration() {
        let grid = TimeGridConfig::new()
            .with_t_max(2.0)
            .with_duration(1.0)
            .with_n_frames(50)
            .resolve()
            .unwrap();
        assert_eq!(grid.t_min(), 1.0);
        assert_eq!(grid.frame_rate(), 50.0);
    }

    #[test]
    fn test_n_frames_frame_rate_and_one_bound() {
        let from_min = TimeGridConfig::new()
            .with_t_min(1.0)
            .with_n_frames(20)
            .with_frame_rate(10.0)
            .resolve()
            .unwrap();
        assert_eq!(from_min.duration(), 2.0);
        assert_eq!(from_min.t_max(), 3.0);

        let from_max = TimeGridConfig::new()
            .with_t_max(1.0)
            .with_n_frames(20)
            .with_frame_rate(10.0)
            .resolve()
            .unwrap();
        assert_eq!(from_max.t_min(), -1.0);
    }

    #[test]
    fn test_duration_n_frames_frame_rate() {
        let grid = TimeGridConfig::new()
            .with_duration(2.0)
            .with_n_frames(20)
            .with_frame_rate(10.0)
            .resolve()
            .unwrap();
        assert_eq!(grid.t_min(), 0.0);
        assert_eq!(grid.t_max(), 2.0);
    }

    #[test]
    fn test_underspecified() {
        let cases = [
            TimeGridConfig::new(),
            TimeGridConfig::new().with_t_min(0.0).with_t_max(1.0),
            TimeGridConfig::new().with_duration(1.0),
            TimeGridConfig::new().with_n_frames(10).with_frame_rate(10.0),
            TimeGridConfig::new().with_t_min(0.0).with_frame_rate(10.0),
        ];
        for config in cases {
            assert!(
                matches!(config.resolve(), Err(SignalError::Configuration(_))),
                "{config} should not resolve"
            );
        }
    }

    #[test]
    fn test_error_names_combination() {
        let err = TimeGridConfig::new().with_t_min(0.0).resolve().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("t_min=0"));
        assert!(message.contains("frame_rate=?"));
    }

    #[test]
    fn test_inconsistent_overspecification() {
        let config = TimeGridConfig::new()
            .with_t_min(0.0)
            .with_t_max(1.0)
            .with_duration(2.0)
            .with_frame_rate(10.0);
        assert!(config.resolve().is_err());

        let config = TimeGridConfig::new()
            .with_t_min(0.0)
            .with_t_max(1.0)
            .with_n_frames(30)
            .with_frame_rate(10.0);
        assert!(config.resolve().is_err());
    }

    #[test]
    fn test_consistent_overspecification() {
        let grid = TimeGridConfig::new()
            .with_t_min(0.0)
            .with_t_max(1.0)
            .with_duration(1.0)
            .with_n_frames(10)
            .with_frame_rate(10.0)
            .resolve()
            .unwrap();
        assert_eq!(grid.n_frames(), 10);
    }

    #[test]
    fn test_invalid_values() {
        let negative_rate = TimeGridConfig::new()
            .with_t_min(0.0)
            .with_duration(1.0)
            .with_frame_rate(-10.0);
        assert!(negative_rate.resolve().is_err());

        let reversed = TimeGridConfig::new()
            .with_t_min(1.0)
            .with_t_max(0.0)
            .with_frame_rate(10.0);
        assert!(reversed.resolve().is_err());

        let infinite = TimeGridConfig::new()
            .with_t_min(0.0)
            .with_duration(f64::INFINITY)
            .with_frame_rate(10.0);
        assert!(infinite.resolve().is_err());

        let huge = TimeGridConfig::new()
            .with_t_min(0.0)
            .with_duration(1e12)
            .with_frame_rate(44100.0);
        assert!(huge.resolve().is_err());
    }

    #[test]
    fn test_zero_frames_over_bounds_fails() {
        let config = TimeGridConfig::new()
            .with_t_min(0.0)
            .with_t_max(1.0)
            .with_n_frames(0);
        assert!(matches!(config.resolve(), Err(SignalError::Configuration(_))));

        let tiny = TimeGridConfig::new()
            .with_t_min(0.0)
            .with_duration(f64::MIN_POSITIVE)
            .with_n_frames(10);
        assert!(tiny.resolve().is_err());
    }

    #[test]
    fn test_truncation() {
        let grid = TimeGridConfig::new()
            .with_t_min(0.0)
            .with_duration(0.0155)
            .with_frame_rate(1000.0)
            .resolve()
            .unwrap();
        assert_eq!(grid.n_frames(), 15);
    }

    #[test]
    fn test_empty_grid() {
        let grid = TimeGridConfig::new()
            .with_t_min(0.0)
            .with_duration(0.0)
            .with_frame_rate(10.0)
            .resolve()
            .unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.iter().count(), 0);
    }

    #[test]
    fn test_iteration_restarts() {
        let grid = TimeGridConfig::new()
            .with_t_min(0.0)
            .with_n_frames(3)
            .with_frame_rate(2.0)
            .resolve()
            .unwrap();
        let first: Vec<f64> = grid.iter().collect();
        let second: Vec<f64> = (&grid).into_iter().collect();
        assert_eq!(first, vec![0.0, 0.5, 1.0]);
        assert_eq!(first, second);
        assert_eq!(grid.iter().len(), 3);
        assert_eq!(grid.iter().rev().next(), Some(1.0));
    }

    #[test]
    fn test_seconds_shortcut() {
        let grid = TimeGridConfig::seconds(0.5).resolve().unwrap();
        assert_eq!(grid.frame_rate(), DEFAULT_FRAME_RATE);
        assert_eq!(grid.n_frames(), 22050);
    }
}
