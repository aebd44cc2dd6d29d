//! Harmonic series with white noise, plotted, sampled and saved.
//!
//! Builds a 220 Hz series of 30 harmonics with exponentially decaying
//! amplitudes, plots one period of it, then writes three seconds of the
//! series plus white noise to `harmonic_noise.wav`, normalized to 0.1.
//!
//! Run with `RUST_LOG=debug` to see what the library is doing.

use anyhow::Result;
use harmonia::{
    HarmonicSeries, PlotOptions, Signal, SignalExt, TextPlot, TimeGridConfig, WaveSpec, WhiteNoise,
};

fn main() -> Result<()> {
    env_logger::init();

    let series = HarmonicSeries::with_generators(220.0, 30, |n| (-f64::from(n) / 2.0).exp(), |_| 0.0)?;
    let period = series.period()?;
    println!("{series} has a period of {period:.6} s");

    series.plot(
        &TimeGridConfig::seconds(period),
        &TextPlot,
        &PlotOptions::titled("One period of the harmonic series").with_labels("time (s)", "amplitude"),
    )?;

    let noisy = series.add_white_noise(0.075);
    let buffer = noisy.sample(&TimeGridConfig::seconds(3.0))?;
    buffer.write_wav("harmonic_noise.wav", &WaveSpec::default().normalized_to(0.1))?;
    println!("wrote {} frames to harmonic_noise.wav", buffer.len());

    Ok(())
}
