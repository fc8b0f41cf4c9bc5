//! Concert command implementation

use anyhow::Result;
use chirpmaker_core::{create_rng, Chirpmaker, RecordingDriver};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use super::playback::{self, PlaybackOptions};
use super::{load_registry, resolve_seed, CLI_PIN};

/// Run the concert command
///
/// # Arguments
/// * `count` - Number of voices; defaults to the registry size
/// * `pause_ms` - Pause after the last voice
/// * `seed` - RNG seed; a time-based seed is printed when absent
/// * `profiles` - Optional JSON registry replacing the built-in profiles
/// * `options` - Trace and WAV output options
pub fn run(
    count: Option<usize>,
    pause_ms: u32,
    seed: Option<u32>,
    profiles: Option<&Path>,
    options: &PlaybackOptions,
) -> Result<ExitCode> {
    let registry = load_registry(profiles)?;
    let seed = resolve_seed(seed);
    let mut maker =
        Chirpmaker::new(CLI_PIN, RecordingDriver::new(), create_rng(seed)).with_registry(registry);

    let sung = match count {
        Some(count) => maker.bird_concert_of(count, pause_ms)?,
        None => maker.bird_concert(pause_ms)?,
    };

    println!("{} {} voices", "Concert:".cyan().bold(), sung.len());
    for (position, id) in sung.iter().enumerate() {
        let name = &maker.registry().get(*id)?.name;
        println!("  {:>3}. {:>2} {}", position + 1, id, name);
    }

    playback::report(maker.driver(), options)?;
    Ok(ExitCode::SUCCESS)
}
