//! Playback of rendered WAV files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Something that can play a WAV file from disk.
///
/// Implementations must have finished reading `path` when `play_file`
/// returns: the caller deletes the file right afterwards. With
/// `blocking == true` the call also waits until the audio has finished;
/// otherwise playback continues in the background.
pub trait Player {
    fn play_file(&self, path: &Path, blocking: bool) -> Result<()>;
}

/// A uniquely named temporary WAV file, removed when dropped.
///
/// Removal is best effort: a failure is logged and otherwise ignored so that
/// it never masks the result of the playback that used the file.
#[derive(Debug)]
pub struct TempWave {
    path: PathBuf,
}

impl TempWave {
    /// Reserves a fresh, empty `.wav` file in the system temp directory.
    pub fn create() -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix("harmonia-")
            .suffix(".wav")
            .tempfile()?;
        let path = file.into_temp_path().keep().map_err(|e| e.error)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempWave {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            log::warn!(
                "temporary file {} was not deleted: {err}",
                self.path.display()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SignalError;
    use crate::io::WaveSpec;
    use crate::sampling::{SampleBuffer, TimeGridConfig};
    use std::cell::RefCell;

    /// Records what it was asked to play instead of playing it.
    #[derive(Default)]
    struct RecordingPlayer {
        calls: RefCell<Vec<(PathBuf, bool, usize)>>,
        fail: bool,
    }

    impl Player for RecordingPlayer {
        fn play_file(&self, path: &Path, blocking: bool) -> Result<()> {
            let reader = hound::WavReader::open(path)?;
            self.calls
                .borrow_mut()
                .push((path.to_path_buf(), blocking, reader.duration() as usize));
            if self.fail {
                return Err(SignalError::Playback("device unplugged".into()));
            }
            Ok(())
        }
    }

    fn buffer() -> SampleBuffer {
        let grid = TimeGridConfig::new()
            .with_t_min(0.0)
            .with_n_frames(16)
            .with_frame_rate(8000.0)
            .resolve()
            .unwrap();
        SampleBuffer::new(grid, vec![0.5; 16]).unwrap()
    }

    #[test]
    fn test_temp_wave_is_unique_and_removed() {
        let first = TempWave::create().unwrap();
        let second = TempWave::create().unwrap();
        assert_ne!(first.path(), second.path());
        assert!(first.path().exists());

        let path = first.path().to_path_buf();
        drop(first);
        assert!(!path.exists());
    }

    #[test]
    fn test_drop_tolerates_missing_file() {
        let temp = TempWave::create().unwrap();
        fs::remove_file(temp.path()).unwrap();
        drop(temp);
    }

    #[test]
    fn test_play_hands_over_rendered_file() {
        let player = RecordingPlayer::default();
        buffer().play(&player, &WaveSpec::default(), false).unwrap();

        let calls = player.calls.borrow();
        assert_eq!(calls.len(), 1);
        let (path, blocking, frames) = &calls[0];
        assert!(!blocking);
        assert_eq!(*frames, 16);
        assert!(path.extension().is_some_and(|ext| ext == "wav"));
        assert!(!path.exists());
    }

    #[test]
    fn test_play_cleans_up_after_failure() {
        let player = RecordingPlayer {
            fail: true,
            ..Default::default()
        };
        let result = buffer().play(&player, &WaveSpec::default(), true);
        assert!(matches!(result, Err(SignalError::Playback(_))));

        let calls = player.calls.borrow();
        assert!(!calls[0].0.exists());
    }
}
