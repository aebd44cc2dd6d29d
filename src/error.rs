//! Error taxonomy for signal construction, sampling and rendering.

use thiserror::Error;

/// Errors produced by harmonia.
///
/// Construction-time problems (`Construction`) are raised when a signal is
/// built, never when it is evaluated. `Configuration` covers time grid and
/// rendering parameters. I/O failures are surfaced once, without retries.
#[derive(Debug, Error)]
pub enum SignalError {
    /// Malformed, underspecified or inconsistent grid/render parameters.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Invalid parameters passed to a signal constructor.
    #[error("cannot construct {signal}: {reason}")]
    Construction {
        signal: &'static str,
        reason: String,
    },

    /// A period was requested for a signal that has no computable period.
    #[error("period is undefined for `{0}`")]
    PeriodUndefined(String),

    /// Normalization was requested on a buffer whose peak amplitude is 0.
    #[error("cannot normalize a buffer whose peak amplitude is zero")]
    DegenerateBuffer,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Wav(#[from] hound::Error),

    /// The playback device could not be opened or failed while playing.
    #[error("playback failed: {0}")]
    Playback(String),
}

impl SignalError {
    pub(crate) fn construction(signal: &'static str, reason: impl Into<String>) -> Self {
        SignalError::Construction {
            signal,
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T, E = SignalError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_message() {
        let err = SignalError::construction("Sine", "frequency shall not be 0");
        assert_eq!(
            err.to_string(),
            "cannot construct Sine: frequency shall not be 0"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SignalError = io.into();
        assert!(matches!(err, SignalError::Io(_)));
    }
}
