//! Phaser command implementation

use anyhow::Result;
use chirpmaker_core::{phaser, PhaserSpec, RecordingDriver};
use colored::Colorize;
use std::process::ExitCode;

use super::playback::{self, PlaybackOptions};

/// Run the phaser command
pub fn run(spec: &PhaserSpec, options: &PlaybackOptions) -> Result<ExitCode> {
    println!(
        "{} {} Hz, duty {}..={}%, {} periods x {} chirps",
        "Phaser:".cyan().bold(),
        spec.freq_hz,
        spec.duty_start,
        spec.duty_end,
        spec.n_periods,
        spec.n_chirps
    );

    let mut driver = RecordingDriver::new();
    phaser(&mut driver, spec)?;
    playback::report(&driver, options)?;

    Ok(ExitCode::SUCCESS)
}
