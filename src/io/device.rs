//! Audio device playback through cpal.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, StreamConfig};

use crate::error::{Result, SignalError};
use crate::io::Player;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Plays WAV files on the default output device.
///
/// # Examples
///
/// ```no_run
/// use harmonia::{CpalPlayer, SignalExt, Sine, TimeGridConfig, WaveSpec};
///
/// let buffer = Sine::new(440.0)?.sample(&TimeGridConfig::seconds(1.0))?;
/// buffer.play(&CpalPlayer, &WaveSpec::default().normalized_to(0.3), true)?;
/// # Ok::<(), harmonia::SignalError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct CpalPlayer;

impl Player for CpalPlayer {
    fn play_file(&self, path: &Path, blocking: bool) -> Result<()> {
        let clip = Clip::load(path)?;
        let (ready_tx, ready_rx) = mpsc::channel();

        // Some backends' streams are not Send, so the stream lives and dies
        // on its own thread.
        let handle = thread::spawn(move || {
            let finished = Arc::new(AtomicBool::new(false));
            let stream = match open_stream(clip, finished.clone()) {
                Ok(stream) => stream,
                Err(err) => {
                    let _ = ready_tx.send(Err(err));
                    return;
                }
            };
            let _ = ready_tx.send(Ok(()));
            while !finished.load(Ordering::Acquire) {
                thread::sleep(POLL_INTERVAL);
            }
            drop(stream);
        });

        ready_rx
            .recv()
            .map_err(|_| SignalError::Playback("playback thread exited early".into()))??;

        if blocking {
            handle
                .join()
                .map_err(|_| SignalError::Playback("playback thread panicked".into()))?;
        }
        Ok(())
    }
}

/// A decoded WAV file held in memory.
struct Clip {
    samples: Vec<f32>,
    channels: usize,
    frame_rate: u32,
}

impl Clip {
    fn load(path: &Path) -> Result<Self> {
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();
        let samples = match spec.sample_format {
            hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
            hound::SampleFormat::Int => {
                let scale = (1u64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<Result<Vec<_>, _>>()?
            }
        };
        Ok(Self {
            samples,
            channels: usize::from(spec.channels.max(1)),
            frame_rate: spec.sample_rate,
        })
    }

    fn frames(&self) -> usize {
        self.samples.len() / self.channels
    }
}

fn open_stream(clip: Clip, finished: Arc<AtomicBool>) -> Result<cpal::Stream> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| SignalError::Playback("no output device available".into()))?;
    let config = device
        .default_output_config()
        .map_err(|e| SignalError::Playback(e.to_string()))?;

    let stream = match config.sample_format() {
        SampleFormat::F32 => build_stream::<f32>(&device, &config.into(), clip, finished)?,
        SampleFormat::I16 => build_stream::<i16>(&device, &config.into(), clip, finished)?,
        SampleFormat::U16 => build_stream::<u16>(&device, &config.into(), clip, finished)?,
        sample_format => {
            return Err(SignalError::Playback(format!(
                "unsupported sample format: {sample_format}"
            )));
        }
    };
    stream
        .play()
        .map_err(|e| SignalError::Playback(e.to_string()))?;
    Ok(stream)
}

/// Streams the clip, resampling by nearest frame to the device rate.
fn build_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    clip: Clip,
    finished: Arc<AtomicBool>,
) -> Result<cpal::Stream>
where
    T: Sample + FromSample<f32> + cpal::SizedSample,
{
    let out_channels = usize::from(config.channels);
    let step = f64::from(clip.frame_rate) / f64::from(config.sample_rate.0);
    let total = clip.frames();
    let mut position = 0.0_f64;

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                for frame in data.chunks_mut(out_channels) {
                    let index = position as usize;
                    if index >= total {
                        frame.fill(T::EQUILIBRIUM);
                        finished.store(true, Ordering::Release);
                        continue;
                    }
                    for (channel, out) in frame.iter_mut().enumerate() {
                        let source = index * clip.channels + channel.min(clip.channels - 1);
                        *out = T::from_sample(clip.samples[source]);
                    }
                    position += step;
                }
            },
            |err| log::error!("audio stream error: {err}"),
            None,
        )
        .map_err(|e| SignalError::Playback(e.to_string()))
}
