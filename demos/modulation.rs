//! Amplitude and frequency modulation of a 440 Hz carrier.
//!
//! Writes `tremolo.wav` (amplitude modulation by a 5 Hz sine),
//! `vibrato.wav` (frequency modulation by a 6 Hz sine) and `chirp.wav`
//! (a cosine whose frequency rises over time).

use anyhow::Result;
use harmonia::{
    FrequencyModulation, FunctionSignal, SignalExt, Sine, TimeGridConfig, VaryingCosine, WaveSpec,
};

fn main() -> Result<()> {
    env_logger::init();

    let config = TimeGridConfig::seconds(3.0);
    let spec = WaveSpec::default().normalized_to(0.3);

    let tremolo = Sine::new(440.0)?.modulated_by(Sine::new(5.0)?, 0.5);
    println!("tremolo: {tremolo}");
    tremolo.write_wav("tremolo.wav", &config, &spec)?;

    let vibrato = FrequencyModulation::new(Sine::new(440.0)?, Sine::new(6.0)?, 4.0);
    println!("vibrato: {vibrato}");
    vibrato.write_wav("vibrato.wav", &config, &spec)?;

    let chirp = VaryingCosine::new(FunctionSignal::named("220 + 110t", |t| 220.0 + 110.0 * t))?;
    println!("chirp: {chirp}");
    chirp.write_wav("chirp.wav", &config, &spec)?;

    Ok(())
}
