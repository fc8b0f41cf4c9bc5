//! Chirpmaker CLI - plan, trace and render chirps and bird calls
//!
//! Every playing command performs on a recording driver, prints a summary of
//! what a buzzer would have played, and can render the result to a WAV file.

use chirpmaker_core::PhaserSpec;
use clap::Parser;
use log::LevelFilter;
use std::process::ExitCode;

use chirpmaker_cli::commands;
use chirpmaker_cli::commands::voice::VoiceSelector;

mod cli_args;

use cli_args::{Cli, Commands};

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log_level(verbose));
    // RUST_LOG, when set, replaces the -v level
    builder.parse_default_env();
    builder.format_timestamp(None);
    builder.init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Chirp { chirp, playback } => commands::chirp::run(
            chirp.config.as_deref(),
            &chirp.overrides(),
            &playback.options(),
        ),
        Commands::Phaser {
            freq,
            periods,
            duty_start,
            duty_end,
            chirps,
            pause_ms,
            playback,
        } => {
            let spec = PhaserSpec::new(freq, duty_start, duty_end)
                .periods(periods)
                .chirps(chirps)
                .pause_ms(pause_ms);
            commands::phaser::run(&spec, &playback.options())
        }
        Commands::Voice {
            id,
            name,
            pause_ms,
            registry,
            playback,
        } => VoiceSelector::from_flags(id, name).and_then(|selector| {
            commands::voice::run(
                &selector,
                pause_ms,
                registry.seed,
                registry.profiles.as_deref(),
                &playback.options(),
            )
        }),
        Commands::Concert {
            count,
            pause_ms,
            registry,
            playback,
        } => commands::concert::run(
            count,
            pause_ms,
            registry.seed,
            registry.profiles.as_deref(),
            &playback.options(),
        ),
        Commands::Scale { chirp, list } => {
            commands::scale::run(chirp.config.as_deref(), &chirp.overrides(), list)
        }
        Commands::Birds { profiles, json } => commands::birds::run(profiles.as_deref(), json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
