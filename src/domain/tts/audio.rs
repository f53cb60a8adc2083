use super::error::StorageError;
use std::io::{Cursor, Read};
use std::time::Duration;

/// Mono PCM buffer, samples in [-1, 1]
#[derive(Debug, Clone, PartialEq)]
pub struct PcmAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl PcmAudio {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }

    /// Encode as a 16-bit mono WAV file
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>, StorageError> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
            for sample in &self.samples {
                writer.write_sample(to_i16(*sample))?;
            }
            writer.finalize()?;
        }

        Ok(cursor.into_inner())
    }

    pub fn from_wav_bytes(bytes: &[u8]) -> Result<Self, StorageError> {
        Self::read_wav(Cursor::new(bytes))
    }

    /// Decode a WAV stream. Multichannel input is downmixed to mono.
    pub fn read_wav<R: Read>(reader: R) -> Result<Self, StorageError> {
        let reader = hound::WavReader::new(reader)?;
        let spec = reader.spec();

        let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
            (hound::SampleFormat::Int, 16) => reader
                .into_samples::<i16>()
                .map(|s| s.map(from_i16))
                .collect::<Result<Vec<_>, _>>()?,
            (hound::SampleFormat::Int, 32) => reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / 2147483648.0))
                .collect::<Result<Vec<_>, _>>()?,
            (hound::SampleFormat::Float, 32) => {
                reader.into_samples::<f32>().collect::<Result<Vec<_>, _>>()?
            }
            _ => return Err(StorageError::Wav(hound::Error::Unsupported)),
        };

        let channels = usize::from(spec.channels);
        let samples = if channels > 1 {
            samples
                .chunks(channels)
                .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
                .collect()
        } else {
            samples
        };

        Ok(Self::new(samples, spec.sample_rate))
    }
}

// Symmetric scaling so decode -> encode reproduces the stored integers.
fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16
}

fn from_i16(value: i16) -> f32 {
    (value as f32 / i16::MAX as f32).max(-1.0)
}
