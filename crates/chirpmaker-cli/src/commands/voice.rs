//! Voice command implementation
//!
//! Plays one bird profile, picked by id or by name.

use anyhow::{bail, Result};
use chirpmaker_core::{create_rng, Chirpmaker, RecordingDriver};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use super::playback::{self, PlaybackOptions};
use super::{load_registry, resolve_seed, CLI_PIN};

/// Which profile to play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceSelector {
    Id(usize),
    Name(String),
}

impl VoiceSelector {
    /// Builds a selector from the mutually exclusive `--id` / `--name` flags.
    pub fn from_flags(id: Option<usize>, name: Option<String>) -> Result<Self> {
        match (id, name) {
            (Some(id), None) => Ok(VoiceSelector::Id(id)),
            (None, Some(name)) => Ok(VoiceSelector::Name(name)),
            (Some(_), Some(_)) => bail!("--id and --name are mutually exclusive"),
            (None, None) => bail!("either --id or --name is required"),
        }
    }
}

/// Run the voice command
///
/// # Arguments
/// * `selector` - Profile id or name
/// * `pause_ms` - Pause after the voice
/// * `seed` - RNG seed; a time-based seed is printed when absent
/// * `profiles` - Optional JSON registry replacing the built-in profiles
/// * `options` - Trace and WAV output options
pub fn run(
    selector: &VoiceSelector,
    pause_ms: u32,
    seed: Option<u32>,
    profiles: Option<&Path>,
    options: &PlaybackOptions,
) -> Result<ExitCode> {
    let registry = load_registry(profiles)?;
    let seed = resolve_seed(seed);
    let mut maker =
        Chirpmaker::new(CLI_PIN, RecordingDriver::new(), create_rng(seed)).with_registry(registry);

    match selector {
        VoiceSelector::Id(id) => {
            let name = maker.registry().get(*id)?.name.clone();
            println!("{} {} ({})", "Voice:".cyan().bold(), id, name);
            maker.bird_voice(*id, pause_ms)?;
        }
        VoiceSelector::Name(name) => {
            let (id, _) = maker.registry().find(name)?;
            println!("{} {} ({})", "Voice:".cyan().bold(), id, name);
            maker.sing(name, pause_ms)?;
        }
    }

    playback::report(maker.driver(), options)?;
    Ok(ExitCode::SUCCESS)
}
