//! A metronome-like click train mixed with a decaying low tone.

use anyhow::Result;
use harmonia::{
    ClickTrain, Envelope, FunctionSignal, PlotOptions, SampleWidth, SignalExt, Sine, TextPlot,
    TimeGridConfig, WaveSpec,
};

fn main() -> Result<()> {
    env_logger::init();

    // Two 10ms clicks per second
    let clicks = ClickTrain::new(2.0, 0.01, 0.8, 0.0)?;
    let thump = Envelope::new(
        Sine::new(60.0)?,
        FunctionSignal::named("exp(-t)", |t| (-t).exp()),
    );
    let mix = clicks + thump;
    println!("{mix}");

    mix.plot(
        &TimeGridConfig::seconds(1.0).with_frame_rate(2000.0),
        &TextPlot,
        &PlotOptions::titled("Click train").with_labels("time (s)", "amplitude"),
    )?;

    let spec = WaveSpec::default()
        .with_sample_width(SampleWidth::Int24)
        .normalized_to(0.5);
    mix.write_wav("click_train.wav", &TimeGridConfig::seconds(4.0), &spec)?;
    println!("wrote click_train.wav");

    Ok(())
}
