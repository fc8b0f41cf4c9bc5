//! Chirp command implementation
//!
//! Plays one frequency sweep built from a settings file and flags.

use anyhow::Result;
use chirpmaker_core::{chirp, RecordingDriver};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use super::playback::{self, PlaybackOptions};
use crate::config::{ChirpOverrides, ChirpSettings};

/// Run the chirp command
///
/// # Arguments
/// * `config` - Optional settings file; flags in `overrides` take precedence
/// * `overrides` - Values given on the command line
/// * `options` - Trace and WAV output options
pub fn run(
    config: Option<&Path>,
    overrides: &ChirpOverrides,
    options: &PlaybackOptions,
) -> Result<ExitCode> {
    let mut settings = ChirpSettings::load_or_default(config)?;
    settings.apply(overrides);
    let spec = settings.to_spec();

    println!(
        "{} {} -> {} Hz, {} steps, {}, {} periods x {} chirps, duty {}%",
        "Chirp:".cyan().bold(),
        spec.f_start,
        spec.f_stop,
        spec.n_steps,
        spec.scale,
        spec.n_periods,
        spec.n_chirps,
        spec.duty_percent
    );

    let mut driver = RecordingDriver::new();
    chirp(&mut driver, &spec)?;
    playback::report(&driver, options)?;

    Ok(ExitCode::SUCCESS)
}
