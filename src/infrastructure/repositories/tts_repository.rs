use crate::domain::tts::{LanguageCode, PcmAudio, SynthesisError};
use async_trait::async_trait;

/// Audio for one chunk along with the speaker that rendered it
#[derive(Debug, Clone)]
pub struct SynthesizedChunk {
    pub audio: PcmAudio,
    pub speaker: String,
}

/// Repository for speech synthesis.
/// Abstracts the underlying speech model (a Silero model server in production).
///
/// Implementations synthesize one bounded chunk at a time; splitting long
/// text and stitching the results is done by the caller.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Speakers the model for `language` can render
    async fn list_available_speakers(
        &self,
        language: LanguageCode,
    ) -> Result<Vec<String>, SynthesisError>;

    /// Synthesize a single chunk of text
    ///
    /// # Arguments
    /// * `text` - One chunk, already bounded in length
    /// * `speaker` - Speaker to render with; should come from `list_available_speakers`
    /// * `language` - The target language for synthesis
    /// * `sample_rate` - Output sample rate in Hz
    ///
    /// # Errors
    /// Returns error if the model is unavailable or rejects the input.
    /// The returned chunk reports the speaker actually used, which may
    /// differ from `speaker` if the model substituted one.
    async fn synthesize_chunk(
        &self,
        text: &str,
        speaker: &str,
        language: LanguageCode,
        sample_rate: u32,
    ) -> Result<SynthesizedChunk, SynthesisError>;
}
