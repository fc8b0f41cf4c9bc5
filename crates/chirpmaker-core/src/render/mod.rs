//! Offline rendering of the pulse stream.
//!
//! [`SampleRenderer`] is a [`crate::ToneDriver`] that, instead of toggling a pin,
//! writes the square wave it would have produced into a mono sample buffer.
//! The buffer can then be encoded as a deterministic 16-bit PCM WAV file whose
//! PCM hash identifies the performance.

mod renderer;
mod wav;

pub use renderer::{RenderResult, SampleRenderer, DEFAULT_AMPLITUDE, DEFAULT_SAMPLE_RATE};
pub use wav::{samples_to_pcm16, write_wav, write_wav_to_vec, WavFormat};
