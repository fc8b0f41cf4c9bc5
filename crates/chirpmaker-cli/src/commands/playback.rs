//! Shared output handling for the playing commands.
//!
//! Every playing command performs on a [`RecordingDriver`]. The recording is
//! then summarized, optionally traced event by event, and optionally replayed
//! into a [`SampleRenderer`] and written as a WAV file.

use anyhow::{Context, Result};
use chirpmaker_core::{RecordingDriver, SampleRenderer, ToneEvent};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

/// Output options shared by `chirp`, `phaser`, `voice` and `concert`.
#[derive(Debug, Clone)]
pub struct PlaybackOptions {
    /// Render the performance to this WAV file.
    pub out: Option<PathBuf>,
    /// Print every driver event.
    pub trace: bool,
    /// WAV sample rate in Hz.
    pub sample_rate: u32,
    /// Peak level of the rendered square wave.
    pub amplitude: f64,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            out: None,
            trace: false,
            sample_rate: chirpmaker_core::render::DEFAULT_SAMPLE_RATE,
            amplitude: chirpmaker_core::render::DEFAULT_AMPLITUDE,
        }
    }
}

/// Counts describing a finished performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceSummary {
    pub pulses: usize,
    pub pauses: usize,
    pub duration_us: u64,
}

impl PerformanceSummary {
    /// Summarizes a recording.
    pub fn of(driver: &RecordingDriver) -> Self {
        Self {
            pulses: driver.pulses().len(),
            pauses: driver.pauses().len(),
            duration_us: driver.elapsed_us(),
        }
    }
}

/// Prints the summary, the trace and writes the WAV file as requested.
pub fn report(driver: &RecordingDriver, options: &PlaybackOptions) -> Result<PerformanceSummary> {
    if options.trace {
        for event in driver.events() {
            println!("  {}", format_event(event).dimmed());
        }
    }

    let summary = PerformanceSummary::of(driver);
    println!(
        "{} {} pulses, {} pauses, {}",
        "Plan:".cyan().bold(),
        summary.pulses,
        summary.pauses,
        format_duration(summary.duration_us)
    );

    if let Some(path) = &options.out {
        let mut renderer = SampleRenderer::new(options.sample_rate, options.amplitude);
        driver.replay(&mut renderer);
        let result = renderer.finish()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(path, &result.wav_data)
            .with_context(|| format!("Failed to write WAV file: {}", path.display()))?;

        println!(
            "{} {} ({:.3}s, {} Hz)",
            "Wrote:".green().bold(),
            path.display(),
            result.duration_seconds(),
            result.sample_rate
        );
        println!("  {} {}", "PCM hash:".dimmed(), result.pcm_hash);
    }

    Ok(summary)
}

/// One line per driver event.
pub fn format_event(event: &ToneEvent) -> String {
    match event {
        ToneEvent::Output { high: true } => "high".to_string(),
        ToneEvent::Output { high: false } => "low".to_string(),
        ToneEvent::SleepMicros { us } => format!("wait {} us", us),
        ToneEvent::SleepMillis { ms } => format!("pause {} ms", ms),
    }
}

/// Human-readable duration.
pub fn format_duration(duration_us: u64) -> String {
    if duration_us >= 1_000_000 {
        format!("{:.3} s", duration_us as f64 / 1e6)
    } else if duration_us >= 1000 {
        format!("{:.3} ms", duration_us as f64 / 1e3)
    } else {
        format!("{} us", duration_us)
    }
}
