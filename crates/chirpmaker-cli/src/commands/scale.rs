//! Scale command implementation
//!
//! Prints the per-step frequencies and pulse timings of a chirp without
//! playing it.

use anyhow::Result;
use chirpmaker_core::engine::{pulse_count, total_duration_us};
use chirpmaker_core::FrequencyScale;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use super::playback::format_duration;
use crate::config::{ChirpOverrides, ChirpSettings};

/// Run the scale command
///
/// With `list` set, prints the available scale names instead.
pub fn run(config: Option<&Path>, overrides: &ChirpOverrides, list: bool) -> Result<ExitCode> {
    if list {
        println!("{}", "Scales:".cyan().bold());
        for scale in FrequencyScale::ALL {
            let suffix = if scale.window().is_some() {
                ":<window>"
            } else {
                ""
            };
            println!("  {}{}", scale.name(), suffix.dimmed());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut settings = ChirpSettings::load_or_default(config)?;
    settings.apply(overrides);
    let spec = settings.to_spec();
    let timings = spec.step_timings()?;

    println!(
        "{} {} from {} to {} Hz in {} steps, duty {}%",
        "Scale:".cyan().bold(),
        spec.scale,
        spec.f_start,
        spec.f_stop,
        spec.n_steps,
        spec.duty_percent
    );
    println!(
        "{}",
        format!(
            "{:>5} {:>12} {:>10} {:>8} {:>8}",
            "step", "freq (Hz)", "period", "t_on", "t_off"
        )
        .bold()
    );
    for (step, timing) in timings.iter().enumerate() {
        let freq = spec
            .scale
            .frequency_at(step as u32, spec.f_start, spec.f_stop, spec.n_steps);
        println!(
            "{:>5} {:>12.2} {:>10} {:>8} {:>8}",
            step,
            freq,
            timing.period_us(),
            timing.on_us,
            timing.off_us
        );
    }

    let actions = spec.plan()?;
    println!(
        "{} {} pulses, {}",
        "Chirp:".dimmed(),
        pulse_count(&actions),
        format_duration(total_duration_us(&actions))
    );

    Ok(ExitCode::SUCCESS)
}
