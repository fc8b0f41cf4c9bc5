//! CLI argument definitions for the `chirpmaker` command-line interface.

use chirpmaker_core::FrequencyScale;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use chirpmaker_cli::commands::playback::PlaybackOptions;
use chirpmaker_cli::config::ChirpOverrides;

/// Chirpmaker - square-wave chirps and bird calls for piezo buzzers
#[derive(Parser)]
#[command(name = "chirpmaker")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Play a frequency sweep
    Chirp {
        #[command(flatten)]
        chirp: ChirpArgs,

        #[command(flatten)]
        playback: PlaybackArgs,
    },

    /// Play a duty-cycle sweep at a fixed frequency
    Phaser {
        /// Square-wave frequency in Hz
        #[arg(long, default_value_t = 1000)]
        freq: u32,

        /// Periods per duty setting
        #[arg(long, default_value_t = 5)]
        periods: u32,

        /// First duty cycle in percent
        #[arg(long, default_value_t = 0)]
        duty_start: u32,

        /// Last duty cycle in percent (inclusive)
        #[arg(long, default_value_t = 100)]
        duty_end: u32,

        /// Repetitions of the sweep
        #[arg(long, default_value_t = 1)]
        chirps: u32,

        /// Pause after each repetition in milliseconds
        #[arg(long, default_value_t = 0)]
        pause_ms: u32,

        #[command(flatten)]
        playback: PlaybackArgs,
    },

    /// Play one bird profile
    Voice {
        /// Profile id
        #[arg(long, conflicts_with = "name", required_unless_present = "name")]
        id: Option<usize>,

        /// Profile name
        #[arg(long)]
        name: Option<String>,

        /// Pause after the voice in milliseconds
        #[arg(long, default_value_t = 20)]
        pause_ms: u32,

        #[command(flatten)]
        registry: RegistryArgs,

        #[command(flatten)]
        playback: PlaybackArgs,
    },

    /// Play randomly chosen bird profiles
    Concert {
        /// Number of voices (default: one per profile)
        #[arg(long)]
        count: Option<usize>,

        /// Pause after the concert in milliseconds
        #[arg(long, default_value_t = 1000)]
        pause_ms: u32,

        #[command(flatten)]
        registry: RegistryArgs,

        #[command(flatten)]
        playback: PlaybackArgs,
    },

    /// Print the step table of a chirp
    Scale {
        #[command(flatten)]
        chirp: ChirpArgs,

        /// List the available scales instead
        #[arg(long)]
        list: bool,
    },

    /// List bird profiles
    Birds {
        /// JSON file with custom profiles
        #[arg(long)]
        profiles: Option<PathBuf>,

        /// Print the registry as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Chirp settings given on the command line.
#[derive(Args, Debug, Clone)]
pub(crate) struct ChirpArgs {
    /// JSON settings file; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Start frequency in Hz
    #[arg(long)]
    pub f_start: Option<f64>,

    /// Stop frequency in Hz
    #[arg(long)]
    pub f_stop: Option<f64>,

    /// Number of steps (the sweep has steps + 1 frequencies)
    #[arg(long)]
    pub steps: Option<u32>,

    /// Periods per step
    #[arg(long)]
    pub periods: Option<u32>,

    /// Repetitions of the sweep
    #[arg(long)]
    pub chirps: Option<u32>,

    /// Pause after each repetition in milliseconds
    #[arg(long)]
    pub pause_ms: Option<u32>,

    /// Duty cycle in percent (1-99)
    #[arg(long)]
    pub duty: Option<u32>,

    /// Scale name, e.g. chromatic or sinc_centered:2
    #[arg(long)]
    pub scale: Option<FrequencyScale>,

    /// Window of a sinc scale
    #[arg(long)]
    pub window: Option<u32>,
}

impl ChirpArgs {
    pub fn overrides(&self) -> ChirpOverrides {
        ChirpOverrides {
            f_start: self.f_start,
            f_stop: self.f_stop,
            n_steps: self.steps,
            n_periods: self.periods,
            n_chirps: self.chirps,
            pause_ms: self.pause_ms,
            duty_percent: self.duty,
            scale: self.scale,
            window: self.window,
        }
    }
}

/// Registry and randomness options.
#[derive(Args, Debug, Clone)]
pub(crate) struct RegistryArgs {
    /// RNG seed (default: time based, printed)
    #[arg(long)]
    pub seed: Option<u32>,

    /// JSON file with custom profiles replacing the built-ins
    #[arg(long)]
    pub profiles: Option<PathBuf>,
}

/// Output options of the playing commands.
#[derive(Args, Debug, Clone)]
pub(crate) struct PlaybackArgs {
    /// Render to a WAV file
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print every driver event
    #[arg(long)]
    pub trace: bool,

    /// WAV sample rate in Hz
    #[arg(long, default_value_t = chirpmaker_core::render::DEFAULT_SAMPLE_RATE)]
    pub sample_rate: u32,

    /// Peak level of the rendered square wave (0-1)
    #[arg(long, default_value_t = chirpmaker_core::render::DEFAULT_AMPLITUDE)]
    pub amplitude: f64,
}

impl PlaybackArgs {
    pub fn options(&self) -> PlaybackOptions {
        PlaybackOptions {
            out: self.out.clone(),
            trace: self.trace,
            sample_rate: self.sample_rate,
            amplitude: self.amplitude,
        }
    }
}
