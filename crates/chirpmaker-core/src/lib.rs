//! Chirpmaker core
//!
//! Square-wave chirp synthesis for piezo buzzers driven from a single digital
//! output line.
//!
//! # Overview
//!
//! A chirp sweeps the square-wave frequency from `f_start` to `f_stop` in
//! discrete steps. The step frequencies come from a [`FrequencyScale`]:
//!
//! - **Linear** and **chromatic** (equal frequency ratio per step)
//! - **Trigonometric** sweeps (`sine_pi`, `sine_2pi`, `cosine_pi`, `cosine_2pi`)
//! - **Arctangent** sweeps (`atan_pi`, `atan_2pi`)
//! - **Sinc** sweeps with a configurable window (centered, leading, trailing)
//!
//! A phaser keeps the frequency fixed and sweeps the duty cycle instead.
//! Bird calls are [`BirdProfile`]s, sequences of chirps and phasers whose
//! parameters may be drawn at random. The [`Chirpmaker`] dispatcher plays
//! single voices by id or name and concerts of randomly chosen voices.
//!
//! # Determinism
//!
//! Every call is planned before the first pulse, so an invalid call never emits
//! anything. With the same seed, a voice or concert produces the same driver
//! calls on every run. The crate uses PCG32 for all randomness; seeds can be
//! derived per key via BLAKE3.
//!
//! # Example
//!
//! ```
//! use chirpmaker_core::{create_rng, Chirpmaker, OutputPin, RecordingDriver};
//!
//! let mut maker = Chirpmaker::new(OutputPin(4), RecordingDriver::new(), create_rng(42));
//! maker.cuckoo().unwrap();
//! assert!(!maker.driver().pulses().is_empty());
//! ```
//!
//! # Crate Structure
//!
//! - [`scale`] - Frequency scales
//! - [`engine`] - Chirp and phaser planning and playback
//! - [`driver`] - Output line abstraction and a recording driver
//! - [`rng`] - Random source abstraction and seeded PCG32
//! - [`profile`] - Bird call profiles
//! - [`registry`] - Built-in and custom profile registries
//! - [`concert`] - Voice and concert dispatcher
//! - [`render`] - Offline WAV rendering

pub mod concert;
pub mod driver;
pub mod engine;
pub mod error;
pub mod profile;
pub mod registry;
pub mod render;
pub mod rng;
pub mod scale;

// Re-export main types at crate root
pub use concert::Chirpmaker;
pub use driver::{OutputPin, RecordingDriver, ToneDriver, ToneEvent};
pub use engine::{chirp, phaser, Action, ChirpSpec, PhaserSpec, PulseTiming};
pub use error::{ChirpError, ChirpResult};
pub use profile::{BirdProfile, Call, ChirpCall, Param, PhaserCall};
pub use registry::Registry;
pub use render::{RenderResult, SampleRenderer};
pub use rng::{create_rng, RandomSource};
pub use scale::FrequencyScale;
