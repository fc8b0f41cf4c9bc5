//! Sample buffer driver.

use crate::driver::ToneDriver;
use crate::error::ChirpResult;

use super::wav::{samples_to_pcm16, write_wav_to_vec, WavFormat};

/// Sample rate used when none is given.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Peak level of the rendered square wave.
pub const DEFAULT_AMPLITUDE: f64 = 0.5;

/// Renders driver calls into mono samples.
///
/// Inside pulses the line is rendered as `+amplitude` (high) and `-amplitude`
/// (low). Millisecond pauses are rendered as silence. Sample boundaries are
/// derived from the absolute microsecond position, so per-call rounding never
/// accumulates.
#[derive(Debug, Clone)]
pub struct SampleRenderer {
    sample_rate: u32,
    amplitude: f64,
    high: bool,
    elapsed_us: u64,
    samples: Vec<f64>,
}

impl SampleRenderer {
    /// Creates a renderer. `amplitude` is clamped to `[0, 1]`.
    pub fn new(sample_rate: u32, amplitude: f64) -> Self {
        Self {
            sample_rate: sample_rate.max(1),
            amplitude: amplitude.clamp(0.0, 1.0),
            high: false,
            elapsed_us: 0,
            samples: Vec::new(),
        }
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Samples rendered so far.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Rendered time in microseconds.
    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_us
    }

    /// Encodes the buffer as a WAV file.
    pub fn finish(self) -> ChirpResult<RenderResult> {
        let pcm = samples_to_pcm16(&self.samples);
        let pcm_hash = blake3::hash(&pcm).to_hex().to_string();
        let wav_data = write_wav_to_vec(&WavFormat::mono(self.sample_rate), &pcm)?;

        Ok(RenderResult {
            wav_data,
            pcm_hash,
            sample_rate: self.sample_rate,
            num_samples: self.samples.len(),
        })
    }

    fn fill(&mut self, level: f64, duration_us: u64) {
        self.elapsed_us += duration_us;
        let end = (self.elapsed_us as u128 * self.sample_rate as u128 / 1_000_000) as usize;
        if end > self.samples.len() {
            self.samples.resize(end, level);
        }
    }
}

impl Default for SampleRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE, DEFAULT_AMPLITUDE)
    }
}

impl ToneDriver for SampleRenderer {
    fn set_output(&mut self, high: bool) {
        self.high = high;
    }

    fn sleep_micros(&mut self, us: u32) {
        let level = if self.high {
            self.amplitude
        } else {
            -self.amplitude
        };
        self.fill(level, us as u64);
    }

    fn sleep_millis(&mut self, ms: u32) {
        self.fill(0.0, ms as u64 * 1000);
    }
}

/// Encoded output of a [`SampleRenderer`].
#[derive(Debug, Clone)]
pub struct RenderResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM data only.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples.
    pub num_samples: usize,
}

impl RenderResult {
    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / self.sample_rate as f64
    }
}
