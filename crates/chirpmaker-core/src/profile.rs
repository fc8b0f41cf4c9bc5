//! Bird profiles: scripted sequences of chirp and phaser calls.
//!
//! A profile is plain data. Numeric arguments are either fixed or an inclusive
//! `[lo, hi]` range that is drawn from a [`RandomSource`] every time the call
//! runs, so no two calls share a cached value.
//!
//! In JSON a fixed value is a number and a range is a two-element array:
//!
//! ```json
//! {
//!   "name": "raven",
//!   "calls": [
//!     { "kind": "chirp", "f_start": 75, "f_stop": 65, "n_steps": 8,
//!       "n_periods": 4, "n_chirps": [2, 6], "scale": { "curve": "atan_pi" },
//!       "duty_percent": 20, "pause_ms": 550 }
//!   ]
//! }
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::driver::ToneDriver;
use crate::engine::{self, Action, ChirpSpec, PhaserSpec, MAX_CHIRP_DUTY, MIN_CHIRP_DUTY};
use crate::error::{ChirpError, ChirpResult};
use crate::rng::RandomSource;
use crate::scale::FrequencyScale;

/// Value types a random draw can be converted into.
pub trait Drawable: Copy {
    /// Converts a drawn integer.
    fn from_draw(value: i64) -> Self;
}

impl Drawable for f64 {
    fn from_draw(value: i64) -> Self {
        value as f64
    }
}

impl Drawable for u32 {
    fn from_draw(value: i64) -> Self {
        value.clamp(0, u32::MAX as i64) as u32
    }
}

/// A call argument: fixed, or drawn from an inclusive range at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Param<T> {
    /// Always this value.
    Fixed(T),
    /// Uniform draw from `[lo, hi]`; the bounds may be given in either order.
    Between([i64; 2]),
}

/// Shorthand for [`Param::Fixed`].
pub fn fixed<T>(value: T) -> Param<T> {
    Param::Fixed(value)
}

/// Shorthand for [`Param::Between`].
pub fn between<T>(lo: i64, hi: i64) -> Param<T> {
    Param::Between([lo, hi])
}

impl<T: Drawable> Param<T> {
    /// Produces the value for one call, drawing if the parameter is a range.
    pub fn resolve<R: RandomSource + ?Sized>(&self, rng: &mut R) -> T {
        match *self {
            Param::Fixed(value) => value,
            Param::Between([a, b]) => T::from_draw(rng.uniform_int(a.min(b), a.max(b))),
        }
    }

    /// Smallest and largest value the parameter can take.
    pub fn extremes(&self) -> (T, T) {
        match *self {
            Param::Fixed(value) => (value, value),
            Param::Between([a, b]) => (T::from_draw(a.min(b)), T::from_draw(a.max(b))),
        }
    }

    /// The distinct extremes: one value for a fixed parameter, two for a range.
    pub fn corners(&self) -> Vec<T>
    where
        T: PartialEq,
    {
        let (lo, hi) = self.extremes();
        if lo == hi {
            vec![lo]
        } else {
            vec![lo, hi]
        }
    }

    /// Returns false for ranges reaching below zero.
    fn is_non_negative(&self) -> bool {
        match *self {
            Param::Fixed(_) => true,
            Param::Between([a, b]) => a.min(b) >= 0,
        }
    }
}

impl<T: Default> Default for Param<T> {
    fn default() -> Self {
        Param::Fixed(T::default())
    }
}

fn default_duty() -> u32 {
    50
}

fn default_repeat() -> u32 {
    1
}

/// Chirp invocation with possibly randomized arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChirpCall {
    pub f_start: Param<f64>,
    pub f_stop: Param<f64>,
    pub n_steps: Param<u32>,
    pub n_periods: Param<u32>,
    pub n_chirps: Param<u32>,
    pub scale: FrequencyScale,
    #[serde(default = "default_duty")]
    pub duty_percent: u32,
    #[serde(default)]
    pub pause_ms: Param<u32>,
}

impl ChirpCall {
    /// Creates a call at 50% duty with no pause.
    pub fn new(
        f_start: Param<f64>,
        f_stop: Param<f64>,
        n_steps: Param<u32>,
        n_periods: Param<u32>,
        n_chirps: Param<u32>,
        scale: FrequencyScale,
    ) -> Self {
        Self {
            f_start,
            f_stop,
            n_steps,
            n_periods,
            n_chirps,
            scale,
            duty_percent: default_duty(),
            pause_ms: Param::Fixed(0),
        }
    }

    /// Sets the duty cycle.
    pub fn duty(mut self, duty_percent: u32) -> Self {
        self.duty_percent = duty_percent;
        self
    }

    /// Sets the pause after each repetition.
    pub fn pause(mut self, pause_ms: Param<u32>) -> Self {
        self.pause_ms = pause_ms;
        self
    }

    /// Draws every randomized argument, in declaration order.
    pub fn resolve<R: RandomSource + ?Sized>(&self, rng: &mut R) -> ChirpSpec {
        ChirpSpec {
            f_start: self.f_start.resolve(rng),
            f_stop: self.f_stop.resolve(rng),
            n_steps: self.n_steps.resolve(rng),
            n_periods: self.n_periods.resolve(rng),
            n_chirps: self.n_chirps.resolve(rng),
            scale: self.scale,
            duty_percent: self.duty_percent,
            pause_ms: self.pause_ms.resolve(rng),
        }
    }

    fn validate(&self) -> ChirpResult<()> {
        for (name, param) in [("f_start", &self.f_start), ("f_stop", &self.f_stop)] {
            let (lo, hi) = param.extremes();
            for freq in [lo, hi] {
                if !freq.is_finite() || freq <= 0.0 {
                    return Err(ChirpError::InvalidFrequency {
                        name: name.to_string(),
                        freq,
                    });
                }
            }
        }
        for (name, param) in [
            ("n_steps", &self.n_steps),
            ("n_periods", &self.n_periods),
            ("n_chirps", &self.n_chirps),
            ("pause_ms", &self.pause_ms),
        ] {
            if !param.is_non_negative() {
                return Err(ChirpError::invalid_param(name, "range reaches below zero"));
            }
        }
        if !(MIN_CHIRP_DUTY..=MAX_CHIRP_DUTY).contains(&self.duty_percent) {
            return Err(ChirpError::InvalidDuty {
                duty: self.duty_percent,
                min: MIN_CHIRP_DUTY,
                max: MAX_CHIRP_DUTY,
            });
        }
        self.scale.validate()?;

        // for a fixed step count each step is monotone in both frequencies,
        // so the range corners bound every drawn pair
        for f_start in self.f_start.corners() {
            for f_stop in self.f_stop.corners() {
                for n_steps in self.n_steps.corners() {
                    ChirpSpec::new(f_start, f_stop, n_steps, self.scale)
                        .duty(self.duty_percent)
                        .check_steps()?;
                }
            }
        }
        Ok(())
    }
}

/// Phaser invocation with possibly randomized arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaserCall {
    pub freq_hz: Param<u32>,
    pub n_periods: Param<u32>,
    pub duty_start: u32,
    pub duty_end: u32,
    pub n_chirps: Param<u32>,
    #[serde(default)]
    pub pause_ms: Param<u32>,
}

impl PhaserCall {
    /// Creates a call with no pause.
    pub fn new(
        freq_hz: Param<u32>,
        n_periods: Param<u32>,
        duty_start: u32,
        duty_end: u32,
        n_chirps: Param<u32>,
    ) -> Self {
        Self {
            freq_hz,
            n_periods,
            duty_start,
            duty_end,
            n_chirps,
            pause_ms: Param::Fixed(0),
        }
    }

    /// Sets the pause after each repetition.
    pub fn pause(mut self, pause_ms: Param<u32>) -> Self {
        self.pause_ms = pause_ms;
        self
    }

    /// Draws every randomized argument, in declaration order.
    pub fn resolve<R: RandomSource + ?Sized>(&self, rng: &mut R) -> PhaserSpec {
        PhaserSpec {
            freq_hz: self.freq_hz.resolve(rng),
            n_periods: self.n_periods.resolve(rng),
            duty_start: self.duty_start,
            duty_end: self.duty_end,
            n_chirps: self.n_chirps.resolve(rng),
            pause_ms: self.pause_ms.resolve(rng),
        }
    }

    fn validate(&self) -> ChirpResult<()> {
        for (name, param) in [
            ("freq_hz", &self.freq_hz),
            ("n_periods", &self.n_periods),
            ("n_chirps", &self.n_chirps),
            ("pause_ms", &self.pause_ms),
        ] {
            if !param.is_non_negative() {
                return Err(ChirpError::invalid_param(name, "range reaches below zero"));
            }
        }
        // both frequency extremes must make a valid phaser
        let (lo, hi) = self.freq_hz.extremes();
        for freq_hz in [lo, hi] {
            PhaserSpec::new(freq_hz, self.duty_start, self.duty_end).validate()?;
        }
        Ok(())
    }
}

/// One step of a profile script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Call {
    /// Frequency sweep.
    Chirp(ChirpCall),
    /// Duty-cycle sweep.
    Phaser(PhaserCall),
}

impl From<ChirpCall> for Call {
    fn from(call: ChirpCall) -> Self {
        Call::Chirp(call)
    }
}

impl From<PhaserCall> for Call {
    fn from(call: PhaserCall) -> Self {
        Call::Phaser(call)
    }
}

impl Call {
    /// Draws the call's random arguments.
    pub fn resolve<R: RandomSource + ?Sized>(&self, rng: &mut R) -> ResolvedCall {
        match self {
            Call::Chirp(call) => ResolvedCall::Chirp(call.resolve(rng)),
            Call::Phaser(call) => ResolvedCall::Phaser(call.resolve(rng)),
        }
    }

    /// Checks fixed values and range bounds.
    pub fn validate(&self) -> ChirpResult<()> {
        match self {
            Call::Chirp(call) => call.validate(),
            Call::Phaser(call) => call.validate(),
        }
    }
}

/// A call with every argument drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedCall {
    Chirp(ChirpSpec),
    Phaser(PhaserSpec),
}

impl ResolvedCall {
    /// Plans the engine call.
    pub fn plan(&self) -> ChirpResult<Vec<Action>> {
        match self {
            ResolvedCall::Chirp(spec) => spec.plan(),
            ResolvedCall::Phaser(spec) => spec.plan(),
        }
    }
}

/// Named script of calls representing one simulated animal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BirdProfile {
    /// Unique name inside a registry.
    pub name: String,
    /// Calls in playing order.
    pub calls: Vec<Call>,
    /// Times the whole call list is played.
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    /// Pause after the last repetition in milliseconds.
    #[serde(default)]
    pub tail_pause_ms: u32,
}

impl BirdProfile {
    /// Creates a profile that plays `calls` once.
    pub fn new(name: impl Into<String>, calls: Vec<Call>) -> Self {
        Self {
            name: name.into(),
            calls,
            repeat: 1,
            tail_pause_ms: 0,
        }
    }

    /// Sets the number of repetitions.
    pub fn repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self
    }

    /// Sets the pause after the last repetition.
    pub fn tail_pause(mut self, tail_pause_ms: u32) -> Self {
        self.tail_pause_ms = tail_pause_ms;
        self
    }

    /// Checks the script without drawing anything.
    pub fn validate(&self) -> ChirpResult<()> {
        if self.name.trim().is_empty() {
            return Err(ChirpError::invalid_profile("", "name must not be empty"));
        }
        if self.calls.is_empty() {
            return Err(ChirpError::invalid_profile(&self.name, "no calls"));
        }
        if self.repeat == 0 {
            return Err(ChirpError::invalid_profile(
                &self.name,
                "repeat must be at least 1",
            ));
        }
        for (index, call) in self.calls.iter().enumerate() {
            call.validate().map_err(|err| {
                ChirpError::invalid_profile(&self.name, format!("call {}: {}", index, err))
            })?;
        }
        Ok(())
    }

    /// Draws all calls of all repetitions, in playing order.
    pub fn resolve<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Vec<ResolvedCall> {
        (0..self.repeat)
            .flat_map(|_| self.calls.iter())
            .map(|call| call.resolve(rng))
            .collect()
    }

    /// Draws and plans the whole profile.
    ///
    /// Every call is planned before the result is returned, so a draw that
    /// makes a scale degenerate aborts the profile before any pulse.
    pub fn plan<R: RandomSource + ?Sized>(&self, rng: &mut R) -> ChirpResult<Vec<Action>> {
        let mut actions = Vec::new();
        for resolved in self.resolve(rng) {
            debug!("{}: {:?}", self.name, resolved);
            actions.extend(resolved.plan()?);
        }
        if self.tail_pause_ms > 0 {
            actions.push(Action::Pause {
                ms: self.tail_pause_ms,
            });
        }
        Ok(actions)
    }

    /// Draws, plans and plays the profile.
    pub fn perform<D, R>(&self, driver: &mut D, rng: &mut R) -> ChirpResult<()>
    where
        D: ToneDriver + ?Sized,
        R: RandomSource + ?Sized,
    {
        let actions = self.plan(rng)?;
        engine::play(driver, &actions);
        Ok(())
    }
}
