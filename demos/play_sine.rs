use anyhow::Result;
use harmonia::{CpalPlayer, SignalExt, Sine, TimeGridConfig, WaveSpec};

fn main() -> Result<()> {
    env_logger::init();

    // A4 with its octave, for 3 seconds
    let tone = Sine::new(440.0)?.add_sine(880.0, 0.3, 0.0)?;
    println!("playing {tone}");

    tone.play(
        &TimeGridConfig::seconds(3.0),
        &CpalPlayer,
        &WaveSpec::default().normalized_to(0.3),
        true,
    )?;
    Ok(())
}
