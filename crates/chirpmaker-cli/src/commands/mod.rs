//! CLI command implementations

pub mod birds;
pub mod chirp;
pub mod concert;
pub mod phaser;
pub mod playback;
pub mod scale;
pub mod voice;

use anyhow::{Context, Result};
use chirpmaker_core::{OutputPin, Registry};
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Output line reported by the dispatcher-driven commands.
pub const CLI_PIN: OutputPin = OutputPin(0);

/// Loads a profile registry from JSON, or the built-in one.
pub fn load_registry(profiles: Option<&Path>) -> Result<Registry> {
    let Some(path) = profiles else {
        return Ok(Registry::builtin());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profiles file: {}", path.display()))?;
    let registry = Registry::from_json(&json)
        .with_context(|| format!("Invalid profiles file: {}", path.display()))?;
    println!(
        "{} {} ({} profiles)",
        "Profiles:".dimmed(),
        path.display(),
        registry.len()
    );
    Ok(registry)
}

/// Returns the given seed, or a time-derived one that is printed so the run can be repeated.
pub fn resolve_seed(seed: Option<u32>) -> u32 {
    match seed {
        Some(seed) => seed,
        None => {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or_default();
            println!("{} {} (pass --seed to repeat)", "Seed:".dimmed(), nanos);
            nanos
        }
    }
}
