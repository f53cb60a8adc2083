use super::error::SynthesisError;
use super::language::LanguageCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpeaker {
    /// Speaker the audio will actually be rendered with
    pub speaker: String,
    /// True when the requested speaker was replaced by a fallback
    pub substituted: bool,
}

/// Pick the speaker to synthesize with, given the speakers a language model offers.
///
/// The requested speaker wins when the model has it. Otherwise the
/// language's documented default is used, and failing that the first
/// speaker the model lists.
pub fn resolve_speaker(
    requested: &str,
    language: LanguageCode,
    available: &[String],
) -> Result<ResolvedSpeaker, SynthesisError> {
    if available.iter().any(|s| s == requested) {
        return Ok(ResolvedSpeaker {
            speaker: requested.to_string(),
            substituted: false,
        });
    }

    let fallback = language
        .default_speaker()
        .filter(|default| available.iter().any(|s| s == default))
        .map(str::to_string)
        .or_else(|| available.first().cloned())
        .ok_or(SynthesisError::NoSpeakers(language))?;

    tracing::warn!(
        requested_speaker = requested,
        speaker = %fallback,
        language = %language,
        "Speaker not available for language, using fallback"
    );

    Ok(ResolvedSpeaker {
        speaker: fallback,
        substituted: true,
    })
}
