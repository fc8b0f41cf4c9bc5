//! Frequency scales.
//!
//! A scale maps a step index in `0..=n_steps` onto a frequency between a start
//! and a stop value. The chirp engine evaluates one scale per step to obtain the
//! pitch of the pulses it emits.
//!
//! Boundary laws (`a` = start, `b` = stop, `n` = step count):
//!
//! | scale            | step 0          | step n                     |
//! |------------------|-----------------|----------------------------|
//! | `linear`         | `a`             | `b`                        |
//! | `chromatic`      | `a`             | `b`                        |
//! | `sine_pi`        | `a`             | `a` (peak `b` at `n/2`)    |
//! | `sine_2pi`       | `(a+b)/2`       | `(a+b)/2`                  |
//! | `cosine_pi`      | `a`             | `b`                        |
//! | `cosine_2pi`     | `a`             | `a` (peak `b` at `n/2`)    |
//! | `atan_pi`        | `a`             | `b`                        |
//! | `atan_2pi`       | `a`             | `b`                        |
//! | `sinc_centered`  | `≈ a`           | `≈ a` (peak `b` at `n/2`)  |
//! | `sinc_leading`   | `a`             | `≈ b`                      |
//! | `sinc_trailing`  | `≈ a`           | `b`                        |
//!
//! The `atan` scales only reach `b` at the last step because their normalising
//! constant uses the same argument; intermediate steps ease in and saturate.
//! With `n = 0` every scale returns `b`.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChirpError, ChirpResult};

const TWO_PI: f64 = 2.0 * PI;

/// Below this magnitude `sinc(x)` is taken as exactly 1.
const SINC_EPSILON: f64 = 1e-3;

/// Interpolation curve used to sweep from a start to a stop frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "curve", rename_all = "snake_case")]
pub enum FrequencyScale {
    /// Equal frequency increments.
    Linear,
    /// Equal frequency ratios (perceptually even pitch glide).
    Chromatic,
    /// Half sine cycle swinging from start up by the full range and back.
    SinePi,
    /// Full sine cycle around the arithmetic mean.
    #[serde(rename = "sine_2pi")]
    Sine2Pi,
    /// Half cosine cycle from start to stop.
    CosinePi,
    /// Full cosine cycle from start to stop and back to start.
    #[serde(rename = "cosine_2pi")]
    Cosine2Pi,
    /// Arctangent ease over `[0, π]`.
    AtanPi,
    /// Arctangent ease over `[0, 2π]`.
    #[serde(rename = "atan_2pi")]
    Atan2Pi,
    /// Sinc pulse peaking at the middle of a `±window·π` window.
    SincCentered {
        /// Half width of the window in multiples of π.
        window: u32,
    },
    /// Sinc pulse peaking at the first step, decaying over `window·π`.
    SincLeading {
        /// Width of the window in multiples of π.
        window: u32,
    },
    /// Sinc pulse rising over `window·π` and peaking at the last step.
    SincTrailing {
        /// Width of the window in multiples of π.
        window: u32,
    },
}

impl FrequencyScale {
    /// All non-windowed scales plus each sinc scale with a unit window.
    pub const ALL: [FrequencyScale; 11] = [
        FrequencyScale::Linear,
        FrequencyScale::Chromatic,
        FrequencyScale::SinePi,
        FrequencyScale::Sine2Pi,
        FrequencyScale::CosinePi,
        FrequencyScale::Cosine2Pi,
        FrequencyScale::AtanPi,
        FrequencyScale::Atan2Pi,
        FrequencyScale::SincCentered { window: 1 },
        FrequencyScale::SincLeading { window: 1 },
        FrequencyScale::SincTrailing { window: 1 },
    ];

    /// Returns the frequency at `step` of a sweep with `n_steps` steps.
    pub fn frequency_at(&self, step: u32, f_start: f64, f_stop: f64, n_steps: u32) -> f64 {
        if n_steps == 0 {
            return f_stop;
        }
        match *self {
            FrequencyScale::Linear => linear_scale(step, f_start, f_stop, n_steps),
            FrequencyScale::Chromatic => chromatic_scale(step, f_start, f_stop, n_steps),
            FrequencyScale::SinePi => sine_pi_scale(step, f_start, f_stop, n_steps),
            FrequencyScale::Sine2Pi => sine_2pi_scale(step, f_start, f_stop, n_steps),
            FrequencyScale::CosinePi => cosine_pi_scale(step, f_start, f_stop, n_steps),
            FrequencyScale::Cosine2Pi => cosine_2pi_scale(step, f_start, f_stop, n_steps),
            FrequencyScale::AtanPi => atan_pi_scale(step, f_start, f_stop, n_steps),
            FrequencyScale::Atan2Pi => atan_2pi_scale(step, f_start, f_stop, n_steps),
            FrequencyScale::SincCentered { window } => {
                sinc_centered_scale(step, f_start, f_stop, n_steps, window)
            }
            FrequencyScale::SincLeading { window } => {
                sinc_leading_scale(step, f_start, f_stop, n_steps, window)
            }
            FrequencyScale::SincTrailing { window } => {
                sinc_trailing_scale(step, f_start, f_stop, n_steps, window)
            }
        }
    }

    /// Evaluates every step `0..=n_steps` of the sweep.
    pub fn sweep(&self, f_start: f64, f_stop: f64, n_steps: u32) -> Vec<f64> {
        (0..=n_steps)
            .map(|step| self.frequency_at(step, f_start, f_stop, n_steps))
            .collect()
    }

    /// Window width of the sinc scales, `None` for the others.
    pub fn window(&self) -> Option<u32> {
        match *self {
            FrequencyScale::SincCentered { window }
            | FrequencyScale::SincLeading { window }
            | FrequencyScale::SincTrailing { window } => Some(window),
            _ => None,
        }
    }

    /// Returns a copy with the sinc window replaced. Other scales are unchanged.
    pub fn with_window(self, window: u32) -> Self {
        match self {
            FrequencyScale::SincCentered { .. } => FrequencyScale::SincCentered { window },
            FrequencyScale::SincLeading { .. } => FrequencyScale::SincLeading { window },
            FrequencyScale::SincTrailing { .. } => FrequencyScale::SincTrailing { window },
            other => other,
        }
    }

    /// Stable snake_case name.
    pub fn name(&self) -> &'static str {
        match self {
            FrequencyScale::Linear => "linear",
            FrequencyScale::Chromatic => "chromatic",
            FrequencyScale::SinePi => "sine_pi",
            FrequencyScale::Sine2Pi => "sine_2pi",
            FrequencyScale::CosinePi => "cosine_pi",
            FrequencyScale::Cosine2Pi => "cosine_2pi",
            FrequencyScale::AtanPi => "atan_pi",
            FrequencyScale::Atan2Pi => "atan_2pi",
            FrequencyScale::SincCentered { .. } => "sinc_centered",
            FrequencyScale::SincLeading { .. } => "sinc_leading",
            FrequencyScale::SincTrailing { .. } => "sinc_trailing",
        }
    }

    /// Checks parameters carried by the scale itself.
    pub fn validate(&self) -> ChirpResult<()> {
        match self.window() {
            Some(0) => Err(ChirpError::invalid_param(
                "window",
                format!("{} needs a window of at least 1", self.name()),
            )),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for FrequencyScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.window() {
            Some(window) => write!(f, "{}:{}", self.name(), window),
            None => f.write_str(self.name()),
        }
    }
}

impl FromStr for FrequencyScale {
    type Err = ChirpError;

    /// Parses `linear`, `chromatic`, ... and `sinc_centered:2` style names.
    /// A sinc scale without an explicit window gets a window of 1.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, window) = match s.split_once(':') {
            Some((name, window)) => {
                let window = window.trim().parse::<u32>().map_err(|_| {
                    ChirpError::invalid_param("scale", format!("bad window in '{}'", s))
                })?;
                (name.trim(), Some(window))
            }
            None => (s.trim(), None),
        };

        let scale = FrequencyScale::ALL
            .iter()
            .copied()
            .find(|scale| scale.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ChirpError::invalid_param("scale", format!("unknown scale '{}'", s)))?;

        match (scale.window(), window) {
            (Some(_), Some(window)) => Ok(scale.with_window(window)),
            (Some(_), None) => Ok(scale),
            (None, Some(_)) => Err(ChirpError::invalid_param(
                "scale",
                format!("{} does not take a window", scale.name()),
            )),
            (None, None) => Ok(scale),
        }
    }
}

/// `sin(x)/x`, taken as 1 near zero.
pub fn sinc(x: f64) -> f64 {
    if x.abs() < SINC_EPSILON {
        1.0
    } else {
        x.sin() / x
    }
}

/// Equal frequency increments from `f_start` to `f_stop`.
pub fn linear_scale(step: u32, f_start: f64, f_stop: f64, n_steps: u32) -> f64 {
    let df = (f_stop - f_start) / n_steps as f64;
    f_start + step as f64 * df
}

/// Geometric glide: `f_start * e^(k*step)` with `k = ln(f_stop/f_start)/n_steps`.
///
/// Both frequencies must be positive.
pub fn chromatic_scale(step: u32, f_start: f64, f_stop: f64, n_steps: u32) -> f64 {
    let k = (f_stop / f_start).ln() / n_steps as f64;
    f_start * (k * step as f64).exp()
}

/// Half sine: leaves `f_start`, peaks at `f_stop` halfway and returns.
pub fn sine_pi_scale(step: u32, f_start: f64, f_stop: f64, n_steps: u32) -> f64 {
    let fa = f_stop - f_start;
    let k = PI / n_steps as f64;
    f_start + fa * (k * step as f64).sin()
}

/// Full sine cycle around the mean of the two frequencies.
pub fn sine_2pi_scale(step: u32, f_start: f64, f_stop: f64, n_steps: u32) -> f64 {
    let (fm, fa) = mean_and_swing(f_start, f_stop);
    let k = TWO_PI / n_steps as f64;
    fm + fa * (k * step as f64).sin()
}

/// Half cosine ease from `f_start` to `f_stop`.
pub fn cosine_pi_scale(step: u32, f_start: f64, f_stop: f64, n_steps: u32) -> f64 {
    let (fm, fa) = mean_and_swing(f_start, f_stop);
    let k = PI / n_steps as f64;
    fm - fa * (k * step as f64).cos()
}

/// Full cosine cycle: out to `f_stop` halfway and back to `f_start`.
pub fn cosine_2pi_scale(step: u32, f_start: f64, f_stop: f64, n_steps: u32) -> f64 {
    let (fm, fa) = mean_and_swing(f_start, f_stop);
    let k = TWO_PI / n_steps as f64;
    fm - fa * (k * step as f64).cos()
}

/// Arctangent ease over `[0, π]`, normalised to land on `f_stop`.
pub fn atan_pi_scale(step: u32, f_start: f64, f_stop: f64, n_steps: u32) -> f64 {
    let k = (f_stop - f_start) / PI.atan();
    f_start + k * (PI / n_steps as f64 * step as f64).atan()
}

/// Arctangent ease over `[0, 2π]`, normalised to land on `f_stop`.
pub fn atan_2pi_scale(step: u32, f_start: f64, f_stop: f64, n_steps: u32) -> f64 {
    let k = (f_stop - f_start) / TWO_PI.atan();
    f_start + k * (TWO_PI / n_steps as f64 * step as f64).atan()
}

/// Sinc over `[-window·π, window·π]`, peak `f_stop` at the middle step.
pub fn sinc_centered_scale(step: u32, f_start: f64, f_stop: f64, n_steps: u32, window: u32) -> f64 {
    let half_range = window as f64 * PI;
    let k = 2.0 * half_range / n_steps as f64;
    f_start + (f_stop - f_start) * sinc(k * step as f64 - half_range)
}

/// Sinc over `[0, window·π]`: starts at the `f_start` peak and settles towards `f_stop`.
pub fn sinc_leading_scale(step: u32, f_start: f64, f_stop: f64, n_steps: u32, window: u32) -> f64 {
    let range = window as f64 * PI;
    let k = range / n_steps as f64;
    // peak and floor swap roles so the excursion sits at the start
    f_stop + (f_start - f_stop) * sinc(k * step as f64)
}

/// Sinc over `[-window·π, 0]`: rises from `f_start` into the `f_stop` peak.
pub fn sinc_trailing_scale(step: u32, f_start: f64, f_stop: f64, n_steps: u32, window: u32) -> f64 {
    let range = window as f64 * PI;
    let k = range / n_steps as f64;
    f_start + (f_stop - f_start) * sinc(k * step as f64 - range)
}

fn mean_and_swing(f_start: f64, f_stop: f64) -> (f64, f64) {
    ((f_start + f_stop) / 2.0, (f_stop - f_start) / 2.0)
}
