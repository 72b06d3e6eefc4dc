//! WAV container decode/encode over normalized f32 buffers.
//!
//! Decoding accepts 8/16/24/32-bit PCM and 32-bit float data and
//! deinterleaves it into one vector per channel; encoding always writes
//! 16-bit PCM, the convention `decode` reads back.

use std::io::{Cursor, Read};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use thiserror::Error;

use crate::audio::AudioBuffer;

const I24_MAX: f32 = 8_388_607.0; // 2^23 - 1

/// Input container error types
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("WAV read error: {0}")]
    Read(#[from] hound::Error),
    #[error("WAV declares zero channels")]
    NoChannels,
    #[error("WAV declares a zero sample rate")]
    ZeroSampleRate,
    #[error("unsupported sample encoding: {bits}-bit {format:?}")]
    UnsupportedEncoding { format: SampleFormat, bits: u16 },
    #[error("sample data ends mid-frame")]
    TruncatedFrame,
}

/// Output container error types
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("buffer has no channels")]
    NoChannels,
    #[error("channel length mismatch: expected {expected} frames, found {found}")]
    ChannelLengthMismatch { expected: usize, found: usize },
    #[error("WAV write error: {0}")]
    Write(#[from] hound::Error),
}

/// Parse WAV bytes into sample rate plus one normalized channel per
/// vector, converting whatever bit depth the container carries.
pub fn decode(bytes: &[u8]) -> Result<AudioBuffer, FormatError> {
    let mut reader = WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(FormatError::NoChannels);
    }
    if spec.sample_rate == 0 {
        return Err(FormatError::ZeroSampleRate);
    }

    let interleaved = read_normalized(&mut reader, spec)?;
    let channel_count = spec.channels as usize;
    if interleaved.len() % channel_count != 0 {
        return Err(FormatError::TruncatedFrame);
    }

    let frames = interleaved.len() / channel_count;
    let mut channels: Vec<Vec<f32>> = (0..channel_count)
        .map(|_| Vec::with_capacity(frames))
        .collect();
    for (i, sample) in interleaved.into_iter().enumerate() {
        channels[i % channel_count].push(sample);
    }

    Ok(AudioBuffer::new(spec.sample_rate, channels))
}

fn read_normalized<R: Read>(
    reader: &mut WavReader<R>,
    spec: WavSpec,
) -> Result<Vec<f32>, FormatError> {
    let samples = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        (SampleFormat::Int, 8) => reader
            .samples::<i8>()
            .map(|s| s.map(|s| f32::from(s) / f32::from(i8::MAX)))
            .collect::<Result<Vec<_>, _>>()?,
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|s| f32::from(s) / f32::from(i16::MAX)))
            .collect::<Result<Vec<_>, _>>()?,
        (SampleFormat::Int, 24) => reader
            .samples::<i32>()
            .map(|s| s.map(|s| s as f32 / I24_MAX))
            .collect::<Result<Vec<_>, _>>()?,
        (SampleFormat::Int, 32) => reader
            .samples::<i32>()
            .map(|s| s.map(|s| s as f32 / i32::MAX as f32))
            .collect::<Result<Vec<_>, _>>()?,
        (format, bits) => return Err(FormatError::UnsupportedEncoding { format, bits }),
    };
    Ok(samples)
}

/// Serialize a buffer as 16-bit PCM WAV bytes.
///
/// Samples are clamped to [-1.0, 1.0] and rounded to the nearest step. A
/// zero-frame buffer produces a valid header-only container. Channel
/// lengths are checked before anything is written.
pub fn encode(buffer: &AudioBuffer) -> Result<Vec<u8>, EncodeError> {
    if buffer.channels.is_empty() {
        return Err(EncodeError::NoChannels);
    }
    let frames = buffer.frame_count();
    for channel in &buffer.channels {
        if channel.len() != frames {
            return Err(EncodeError::ChannelLengthMismatch {
                expected: frames,
                found: channel.len(),
            });
        }
    }

    let spec = WavSpec {
        channels: buffer.channel_count() as u16,
        sample_rate: buffer.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer = WavWriter::new(&mut cursor, spec)?;
    for frame in 0..frames {
        for channel in &buffer.channels {
            let sample = channel[frame].clamp(-1.0, 1.0);
            writer.write_sample((sample * f32::from(i16::MAX)).round() as i16)?;
        }
    }
    writer.finalize()?;

    Ok(cursor.into_inner())
}
