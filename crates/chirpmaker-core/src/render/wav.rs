//! Minimal mono 16-bit PCM WAV encoding.
//!
//! The header carries no timestamps or optional chunks, so equal samples
//! always encode to equal bytes.

use std::io::{self, Write};

/// Size of the RIFF/fmt/data header written by [`write_wav`].
const HEADER_LEN: usize = 44;

/// Format of the WAV files produced by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl WavFormat {
    /// Always a single channel.
    pub const CHANNELS: u16 = 1;

    /// Always 16-bit signed samples.
    pub const BITS_PER_SAMPLE: u16 = 16;

    /// Mono 16-bit format at `sample_rate`.
    pub fn mono(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    /// Bytes per sample frame.
    pub fn block_align(&self) -> u16 {
        Self::CHANNELS * Self::BITS_PER_SAMPLE / 8
    }

    /// Bytes per second of audio.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }
}

/// Writes a complete WAV file around already encoded PCM bytes.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    let data_size = u32::try_from(pcm_data.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "PCM data exceeds 4 GiB"))?;
    // RIFF size excludes the 8-byte RIFF chunk header
    let riff_size = (HEADER_LEN as u32 - 8).saturating_add(data_size);

    writer.write_all(b"RIFF")?;
    writer.write_all(&riff_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?;
    writer.write_all(&1u16.to_le_bytes())?; // PCM
    writer.write_all(&WavFormat::CHANNELS.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&WavFormat::BITS_PER_SAMPLE.to_le_bytes())?;

    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm_data)?;

    Ok(())
}

/// Encodes a WAV file into memory.
pub fn write_wav_to_vec(format: &WavFormat, pcm_data: &[u8]) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(HEADER_LEN + pcm_data.len());
    write_wav(&mut buffer, format, pcm_data)?;
    Ok(buffer)
}

/// Converts samples in `[-1.0, 1.0]` to little-endian 16-bit PCM, clipping outside values.
pub fn samples_to_pcm16(samples: &[f64]) -> Vec<u8> {
    samples
        .iter()
        .flat_map(|&sample| {
            let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f64).round() as i16;
            value.to_le_bytes()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let format = WavFormat::mono(8000);
        let pcm = samples_to_pcm16(&[0.0, 0.5, -0.5]);
        let wav = write_wav_to_vec(&format, &pcm).unwrap();

        assert_eq!(wav.len(), 44 + 6);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]), 36 + 6);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(u16::from_le_bytes([wav[22], wav[23]]), 1);
        assert_eq!(u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]), 8000);
        assert_eq!(u32::from_le_bytes([wav[28], wav[29], wav[30], wav[31]]), 16000);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]), 6);
    }

    #[test]
    fn test_pcm_conversion_clips() {
        let pcm = samples_to_pcm16(&[1.0, -1.0, 2.0, -3.0, 0.0]);
        let values: Vec<i16> = pcm
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect();
        assert_eq!(values, vec![32767, -32767, 32767, -32767, 0]);
    }
}
