//! Noise mixing binary
//!
//! Loads any decodable input as stereo, mixes noise into it at the requested
//! SNR and writes a 32-bit float WAV.

use std::path::Path;

use anyhow::Result;
use audio_degrader::{create_degradation, Degradation, DegradedAudioFile, FileDecoder};

fn program_name(args: &[String]) -> &str {
    args.first()
        .map(String::as_str)
        .unwrap_or("audio-degrader-mix")
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <input> <output.wav> [noise] [snr]", program);
    if let Ok(degradation) = create_degradation("mix") {
        eprintln!();
        eprintln!("{}: {}", degradation.name(), degradation.description());
        for param in degradation.parameters_info() {
            eprintln!(
                "  {:<8} {} (default: {})",
                param.name, param.description, param.default
            );
        }
    }
}

fn main() -> Result<()> {
    // Initialize env_logger to output to stderr (reads RUST_LOG env var)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 || args.len() > 5 {
        print_usage(program_name(&args));
        std::process::exit(1);
    }

    let input = Path::new(&args[1]);
    let output = Path::new(&args[2]);

    let mut degradation = create_degradation("mix")?;
    degradation.set_parameters_from_list(&args[3..])?;

    log::info!("Loading input: {}", input.display());
    let mut audio = DegradedAudioFile::load(input, &FileDecoder, None)?;

    for (name, value) in degradation.parameters().iter() {
        log::info!("{} {}={}", degradation.name(), name, value);
    }
    degradation.apply(&mut audio)?;

    audio.write_wav(output)?;
    Ok(())
}
