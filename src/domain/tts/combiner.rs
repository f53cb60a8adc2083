use super::audio::PcmAudio;
use super::error::StorageError;

/// Concatenate chunk audio in the given order.
///
/// No trimming, cross-fade or silence is inserted. All parts must share one
/// sample rate; mismatches are rejected rather than resampled.
pub fn combine(parts: Vec<PcmAudio>) -> Result<PcmAudio, StorageError> {
    let mut parts = parts.into_iter();
    let mut combined = parts.next().ok_or(StorageError::EmptyCombination)?;

    for part in parts {
        if part.sample_rate != combined.sample_rate {
            return Err(StorageError::SampleRateMismatch {
                expected: combined.sample_rate,
                found: part.sample_rate,
            });
        }
        combined.samples.extend(part.samples);
    }

    Ok(combined)
}
