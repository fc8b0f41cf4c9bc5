//! Chirp and phaser waveform drivers.
//!
//! Both engines work in two phases. Planning turns a [`ChirpSpec`] or
//! [`PhaserSpec`] into a list of [`Action`]s and performs every check, including
//! evaluating the scale at each step. Playing walks the plan and issues driver
//! calls. Settings that fail any check therefore never produce a single pulse.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::driver::ToneDriver;
use crate::error::{ChirpError, ChirpResult};
use crate::scale::FrequencyScale;

/// Microseconds per second.
pub const MICROS_PER_SECOND: u32 = 1_000_000;

/// Smallest duty cycle accepted by chirps.
pub const MIN_CHIRP_DUTY: u32 = 1;

/// Largest duty cycle accepted by chirps.
pub const MAX_CHIRP_DUTY: u32 = 99;

/// Largest duty cycle accepted by phasers.
pub const MAX_PHASER_DUTY: u32 = 100;

/// High and low time of one square-wave period, in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PulseTiming {
    /// Time the line is held high.
    pub on_us: u32,
    /// Time the line is held low.
    pub off_us: u32,
}

impl PulseTiming {
    /// Splits `period_us` at `duty` percent. `duty` must not exceed 100.
    ///
    /// `on_us + off_us == period_us` always holds.
    pub fn from_period(period_us: u32, duty: u32) -> Self {
        let on_us = (period_us as u64 * duty.min(100) as u64 / 100) as u32;
        Self {
            on_us,
            off_us: period_us - on_us,
        }
    }

    /// Timing for a square wave of `freq` Hz at `duty` percent.
    pub fn from_frequency(freq: f64, duty: u32) -> ChirpResult<Self> {
        Ok(Self::from_period(period_us(freq)?, duty))
    }

    /// Full period in microseconds.
    pub fn period_us(&self) -> u32 {
        self.on_us + self.off_us
    }
}

/// Period of `freq` Hz rounded to whole microseconds.
///
/// The firmware truncated instead. Rounding keeps exact periods such as the
/// 250 us of 4000 Hz from dropping a microsecond to float error.
///
/// Fails for non-finite or non-positive frequencies and for frequencies whose
/// period rounds to zero or overflows `u32`.
pub fn period_us(freq: f64) -> ChirpResult<u32> {
    if !freq.is_finite() || freq <= 0.0 {
        return Err(ChirpError::InvalidFrequency {
            name: "frequency".to_string(),
            freq,
        });
    }
    let period = (MICROS_PER_SECOND as f64 / freq).round();
    if period < 1.0 || period > u32::MAX as f64 {
        return Err(ChirpError::PeriodOutOfRange { freq });
    }
    Ok(period as u32)
}

/// One step of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// `count` identical pulses.
    Pulses {
        /// Pulse shape.
        timing: PulseTiming,
        /// Number of periods.
        count: u32,
    },
    /// Silent pause with the line low.
    Pause {
        /// Pause length in milliseconds.
        ms: u32,
    },
    /// `body` played `times` times in a row.
    Repeat {
        /// Number of passes over `body`.
        times: u32,
        /// Actions of a single pass.
        body: Vec<Action>,
    },
}

impl Action {
    /// Time the action blocks the driver, in microseconds.
    pub fn duration_us(&self) -> u64 {
        match self {
            Action::Pulses { timing, count } => timing.period_us() as u64 * *count as u64,
            Action::Pause { ms } => *ms as u64 * 1000,
            Action::Repeat { times, body } => {
                total_duration_us(body).saturating_mul(*times as u64)
            }
        }
    }

    /// Pulses the action emits.
    pub fn pulse_count(&self) -> u64 {
        match self {
            Action::Pulses { count, .. } => *count as u64,
            Action::Pause { .. } => 0,
            Action::Repeat { times, body } => pulse_count(body).saturating_mul(*times as u64),
        }
    }
}

/// Total blocking time of a plan, in microseconds.
pub fn total_duration_us(actions: &[Action]) -> u64 {
    actions
        .iter()
        .fold(0, |total: u64, action| total.saturating_add(action.duration_us()))
}

/// Number of pulses a plan emits.
pub fn pulse_count(actions: &[Action]) -> u64 {
    actions
        .iter()
        .fold(0, |total: u64, action| total.saturating_add(action.pulse_count()))
}

/// Issues the driver calls of a plan.
pub fn play<D: ToneDriver + ?Sized>(driver: &mut D, actions: &[Action]) {
    for action in actions {
        match action {
            Action::Pulses { timing, count } => {
                for _ in 0..*count {
                    driver.pulse(timing.on_us, timing.off_us);
                }
            }
            Action::Pause { ms } => driver.sleep_millis(*ms),
            Action::Repeat { times, body } => {
                for _ in 0..*times {
                    play(driver, body);
                }
            }
        }
    }
}

/// One pass of `timings` at `n_periods` each, then the pause, repeated `n_chirps` times.
fn repeated_sweep(
    timings: Vec<PulseTiming>,
    n_periods: u32,
    n_chirps: u32,
    pause_ms: u32,
) -> Action {
    let mut body = Vec::with_capacity(timings.len() + 1);
    if n_periods > 0 {
        body.extend(timings.into_iter().map(|timing| Action::Pulses {
            timing,
            count: n_periods,
        }));
    }
    body.push(Action::Pause { ms: pause_ms });
    Action::Repeat {
        times: n_chirps,
        body,
    }
}

/// Frequency sweep along a scale, repeated `n_chirps` times.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChirpSpec {
    /// Frequency at step 0 in Hz.
    pub f_start: f64,
    /// Frequency the scale heads to in Hz.
    pub f_stop: f64,
    /// Number of steps; the sweep plays `n_steps + 1` frequencies.
    pub n_steps: u32,
    /// Periods emitted per frequency.
    pub n_periods: u32,
    /// Repetitions of the whole sweep.
    pub n_chirps: u32,
    /// Interpolation curve.
    pub scale: FrequencyScale,
    /// Duty cycle in percent (1..=99).
    pub duty_percent: u32,
    /// Pause after each repetition in milliseconds.
    pub pause_ms: u32,
}

impl ChirpSpec {
    /// Creates a single chirp with one period per step, 50% duty and no pause.
    pub fn new(f_start: f64, f_stop: f64, n_steps: u32, scale: FrequencyScale) -> Self {
        Self {
            f_start,
            f_stop,
            n_steps,
            n_periods: 1,
            n_chirps: 1,
            scale,
            duty_percent: 50,
            pause_ms: 0,
        }
    }

    /// Sets the periods per step.
    pub fn periods(mut self, n_periods: u32) -> Self {
        self.n_periods = n_periods;
        self
    }

    /// Sets the number of repetitions.
    pub fn chirps(mut self, n_chirps: u32) -> Self {
        self.n_chirps = n_chirps;
        self
    }

    /// Sets the duty cycle.
    pub fn duty(mut self, duty_percent: u32) -> Self {
        self.duty_percent = duty_percent;
        self
    }

    /// Sets the pause after each repetition.
    pub fn pause_ms(mut self, pause_ms: u32) -> Self {
        self.pause_ms = pause_ms;
        self
    }

    /// Checks the caller-supplied values.
    pub fn validate(&self) -> ChirpResult<()> {
        check_frequency("f_start", self.f_start)?;
        check_frequency("f_stop", self.f_stop)?;
        if !(MIN_CHIRP_DUTY..=MAX_CHIRP_DUTY).contains(&self.duty_percent) {
            return Err(ChirpError::InvalidDuty {
                duty: self.duty_percent,
                min: MIN_CHIRP_DUTY,
                max: MAX_CHIRP_DUTY,
            });
        }
        self.scale.validate()
    }

    /// Evaluates the scale and returns the pulse timing of every step.
    pub fn step_timings(&self) -> ChirpResult<Vec<PulseTiming>> {
        self.validate()?;
        (0..=self.n_steps)
            .map(|step| self.step_timing(step))
            .collect()
    }

    /// Like [`ChirpSpec::step_timings`] but keeps nothing.
    pub fn check_steps(&self) -> ChirpResult<()> {
        self.validate()?;
        (0..=self.n_steps).try_for_each(|step| self.step_timing(step).map(drop))
    }

    /// Builds the plan: one pass over every step plus the pause, repeated
    /// `n_chirps` times.
    pub fn plan(&self) -> ChirpResult<Vec<Action>> {
        let timings = self.step_timings()?;
        debug!(
            "chirp {:.1} -> {:.1} Hz, {} steps, {} periods, {} chirps, {}, duty {}%",
            self.f_start,
            self.f_stop,
            self.n_steps,
            self.n_periods,
            self.n_chirps,
            self.scale,
            self.duty_percent
        );
        Ok(vec![repeated_sweep(
            timings,
            self.n_periods,
            self.n_chirps,
            self.pause_ms,
        )])
    }

    fn step_timing(&self, step: u32) -> ChirpResult<PulseTiming> {
        let freq = self
            .scale
            .frequency_at(step, self.f_start, self.f_stop, self.n_steps);
        if !freq.is_finite() || freq <= 0.0 {
            return Err(ChirpError::DegenerateFrequency { step, freq });
        }
        let timing = PulseTiming::from_frequency(freq, self.duty_percent)?;
        trace!(
            "{:3}: f = {:8.2} Hz, t_on = {} us, t_off = {} us",
            step,
            freq,
            timing.on_us,
            timing.off_us
        );
        Ok(timing)
    }
}

/// Fixed-frequency sweep over the duty cycle, repeated `n_chirps` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhaserSpec {
    /// Square-wave frequency in Hz.
    pub freq_hz: u32,
    /// Periods emitted per duty setting.
    pub n_periods: u32,
    /// First duty cycle in percent (0..=100).
    pub duty_start: u32,
    /// Last duty cycle in percent (0..=100), inclusive.
    pub duty_end: u32,
    /// Repetitions of the whole sweep.
    pub n_chirps: u32,
    /// Pause after each repetition in milliseconds.
    pub pause_ms: u32,
}

impl PhaserSpec {
    /// Creates a single sweep with one period per duty setting and no pause.
    pub fn new(freq_hz: u32, duty_start: u32, duty_end: u32) -> Self {
        Self {
            freq_hz,
            n_periods: 1,
            duty_start,
            duty_end,
            n_chirps: 1,
            pause_ms: 0,
        }
    }

    /// Sets the periods per duty setting.
    pub fn periods(mut self, n_periods: u32) -> Self {
        self.n_periods = n_periods;
        self
    }

    /// Sets the number of repetitions.
    pub fn chirps(mut self, n_chirps: u32) -> Self {
        self.n_chirps = n_chirps;
        self
    }

    /// Sets the pause after each repetition.
    pub fn pause_ms(mut self, pause_ms: u32) -> Self {
        self.pause_ms = pause_ms;
        self
    }

    /// Checks the caller-supplied values.
    pub fn validate(&self) -> ChirpResult<()> {
        if self.freq_hz == 0 {
            return Err(ChirpError::InvalidFrequency {
                name: "freq_hz".to_string(),
                freq: 0.0,
            });
        }
        if self.freq_hz > MICROS_PER_SECOND {
            return Err(ChirpError::PeriodOutOfRange {
                freq: self.freq_hz as f64,
            });
        }
        for duty in [self.duty_start, self.duty_end] {
            if duty > MAX_PHASER_DUTY {
                return Err(ChirpError::InvalidDuty {
                    duty,
                    min: 0,
                    max: MAX_PHASER_DUTY,
                });
            }
        }
        if self.duty_start > self.duty_end {
            return Err(ChirpError::InvalidDutyRange {
                start: self.duty_start,
                end: self.duty_end,
            });
        }
        Ok(())
    }

    /// Period of the phaser's square wave, truncated to whole microseconds.
    pub fn period_us(&self) -> u32 {
        MICROS_PER_SECOND / self.freq_hz.max(1)
    }

    /// Pulse timing of every duty setting from `duty_start` to `duty_end`.
    pub fn duty_timings(&self) -> ChirpResult<Vec<PulseTiming>> {
        self.validate()?;
        let period = self.period_us();
        Ok((self.duty_start..=self.duty_end)
            .map(|duty| PulseTiming::from_period(period, duty))
            .collect())
    }

    /// Builds the plan: one pass over every duty setting plus the pause,
    /// repeated `n_chirps` times.
    pub fn plan(&self) -> ChirpResult<Vec<Action>> {
        let timings = self.duty_timings()?;
        debug!(
            "phaser {} Hz, duty {}..={}%, {} periods, {} chirps",
            self.freq_hz, self.duty_start, self.duty_end, self.n_periods, self.n_chirps
        );
        Ok(vec![repeated_sweep(
            timings,
            self.n_periods,
            self.n_chirps,
            self.pause_ms,
        )])
    }
}

/// Plays a chirp. Nothing is emitted if `spec` fails validation.
pub fn chirp<D: ToneDriver + ?Sized>(driver: &mut D, spec: &ChirpSpec) -> ChirpResult<()> {
    let actions = spec.plan()?;
    play(driver, &actions);
    Ok(())
}

/// Plays a phaser. Nothing is emitted if `spec` fails validation.
pub fn phaser<D: ToneDriver + ?Sized>(driver: &mut D, spec: &PhaserSpec) -> ChirpResult<()> {
    let actions = spec.plan()?;
    play(driver, &actions);
    Ok(())
}

fn check_frequency(name: &str, freq: f64) -> ChirpResult<()> {
    if freq.is_finite() && freq > 0.0 {
        Ok(())
    } else {
        Err(ChirpError::InvalidFrequency {
            name: name.to_string(),
            freq,
        })
    }
}
