//! WAV decoding for the speech payload.
//!
//! The speech API takes 16-bit little-endian PCM (`LINEAR16`) at the
//! recording's own sample rate, so uploads are decoded and re-packed here
//! rather than resampled.

use anyhow::{Context, Result};
use std::path::Path;

/// Mono 16-bit little-endian PCM ready for the speech API.
pub struct Linear16Audio {
    pub data: Vec<u8>,
    pub sample_rate: u32,
}

/// Read a WAV file into mono LINEAR16 bytes.
///
/// Accepts int and float PCM of any bit depth; multi-channel audio is
/// averaged down to mono.
pub fn read_wav_linear16(path: &Path) -> Result<Linear16Audio> {
    let mut reader = hound::WavReader::open(path).context("Failed to open WAV file")?;

    let spec = reader.spec();
    let channels = spec.channels;

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read float samples")?,
        hound::SampleFormat::Int => {
            let bits = spec.bits_per_sample;
            let max_val = (1u32 << (bits - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()
                .context("Failed to read int samples")?
        }
    };

    let mono = if channels > 1 {
        downmix_to_mono(&samples, channels)
    } else {
        samples
    };

    let mut data = Vec::with_capacity(mono.len() * 2);
    for sample in mono {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        data.extend_from_slice(&value.to_le_bytes());
    }

    Ok(Linear16Audio {
        data,
        sample_rate: spec.sample_rate,
    })
}

/// Convert multichannel audio to mono by averaging all channels
fn downmix_to_mono(samples: &[f32], channels: u16) -> Vec<f32> {
    samples
        .chunks(channels as usize)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}
