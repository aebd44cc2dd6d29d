//! Fixed-point PCM quantization.

use std::fmt;

use crate::error::{Result, SignalError};

/// Width of one integer PCM sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SampleWidth {
    Int8,
    #[default]
    Int16,
    Int24,
    Int32,
}

impl SampleWidth {
    /// Looks up the width for a byte count (1 to 4).
    pub fn from_bytes(bytes: u16) -> Result<Self> {
        match bytes {
            1 => Ok(SampleWidth::Int8),
            2 => Ok(SampleWidth::Int16),
            3 => Ok(SampleWidth::Int24),
            4 => Ok(SampleWidth::Int32),
            other => Err(SignalError::Configuration(format!(
                "unsupported sample width of {other} bytes"
            ))),
        }
    }

    pub fn bytes(self) -> u16 {
        match self {
            SampleWidth::Int8 => 1,
            SampleWidth::Int16 => 2,
            SampleWidth::Int24 => 3,
            SampleWidth::Int32 => 4,
        }
    }

    pub fn bits(self) -> u16 {
        self.bytes() * 8
    }

    /// Largest representable sample, `2^(bits-1) - 1`.
    pub fn max_value(self) -> i32 {
        match self {
            SampleWidth::Int8 => i8::MAX as i32,
            SampleWidth::Int16 => i16::MAX as i32,
            SampleWidth::Int24 => (1 << 23) - 1,
            SampleWidth::Int32 => i32::MAX,
        }
    }

    /// Smallest representable sample, `-2^(bits-1)`.
    pub fn min_value(self) -> i32 {
        match self {
            SampleWidth::Int8 => i8::MIN as i32,
            SampleWidth::Int16 => i16::MIN as i32,
            SampleWidth::Int24 => -(1 << 23),
            SampleWidth::Int32 => i32::MIN,
        }
    }

    /// Maps a real amplitude in `[-1, 1]` onto the integer range.
    ///
    /// Positive values scale by `max_value`, negative ones by the magnitude
    /// of `min_value`, so `1.0` and `-1.0` land exactly on the bounds.
    /// Anything outside is clipped rather than wrapped. NaN maps to 0.
    pub fn quantize(self, value: f64) -> i32 {
        let max = self.max_value() as f64;
        let min = self.min_value() as f64;
        let scaled = if value >= 0.0 { value * max } else { -value * min };
        if scaled.is_nan() {
            return 0;
        }
        scaled.clamp(min, max).trunc() as i32
    }
}

impl fmt::Display for SampleWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}
