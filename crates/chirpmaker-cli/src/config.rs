//! Chirp settings file.
//!
//! Holds the tunable chirp values as a JSON document. Any field may be left
//! out; missing fields take the defaults below.

use anyhow::{Context, Result};
use chirpmaker_core::{ChirpSpec, FrequencyScale};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunable chirp values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChirpSettings {
    pub f_start: f64,
    pub f_stop: f64,
    pub n_steps: u32,
    pub n_periods: u32,
    pub n_chirps: u32,
    pub pause_ms: u32,
    pub duty_percent: u32,
    pub scale: FrequencyScale,
}

impl Default for ChirpSettings {
    fn default() -> Self {
        Self {
            f_start: 1000.0,
            f_stop: 1020.0,
            n_steps: 5,
            n_periods: 2,
            n_chirps: 2,
            pause_ms: 50,
            duty_percent: 50,
            scale: FrequencyScale::Chromatic,
        }
    }
}

/// Command-line values that replace settings from the file.
#[derive(Debug, Clone, Default)]
pub struct ChirpOverrides {
    pub f_start: Option<f64>,
    pub f_stop: Option<f64>,
    pub n_steps: Option<u32>,
    pub n_periods: Option<u32>,
    pub n_chirps: Option<u32>,
    pub pause_ms: Option<u32>,
    pub duty_percent: Option<u32>,
    pub scale: Option<FrequencyScale>,
    pub window: Option<u32>,
}

impl ChirpSettings {
    /// Loads settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Loads `path` if given, otherwise starts from the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Applies command-line values on top of these settings.
    ///
    /// `window` applies to whichever sinc scale ends up selected.
    pub fn apply(&mut self, overrides: &ChirpOverrides) {
        if let Some(f_start) = overrides.f_start {
            self.f_start = f_start;
        }
        if let Some(f_stop) = overrides.f_stop {
            self.f_stop = f_stop;
        }
        if let Some(n_steps) = overrides.n_steps {
            self.n_steps = n_steps;
        }
        if let Some(n_periods) = overrides.n_periods {
            self.n_periods = n_periods;
        }
        if let Some(n_chirps) = overrides.n_chirps {
            self.n_chirps = n_chirps;
        }
        if let Some(pause_ms) = overrides.pause_ms {
            self.pause_ms = pause_ms;
        }
        if let Some(duty_percent) = overrides.duty_percent {
            self.duty_percent = duty_percent;
        }
        if let Some(scale) = overrides.scale {
            self.scale = scale;
        }
        if let Some(window) = overrides.window {
            self.scale = self.scale.with_window(window);
        }
    }

    /// Chirp described by these settings.
    pub fn to_spec(&self) -> ChirpSpec {
        ChirpSpec::new(self.f_start, self.f_stop, self.n_steps, self.scale)
            .periods(self.n_periods)
            .chirps(self.n_chirps)
            .duty(self.duty_percent)
            .pause_ms(self.pause_ms)
    }
}
