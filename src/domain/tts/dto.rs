use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_SPEAKER: &str = "xenia";
pub const DEFAULT_LANGUAGE: &str = "ru";
pub const DEFAULT_SAMPLE_RATE: u32 = 48000;

/// Request for POST /api/synthesize
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisRequest {
    pub text: String,
    #[serde(default = "default_speaker")]
    pub speaker: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            speaker: default_speaker(),
            language: default_language(),
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }

    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = speaker.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }
}

fn default_speaker() -> String {
    DEFAULT_SPEAKER.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

/// Response for GET /api/speakers, keyed by language code
#[derive(Debug, Serialize, Deserialize)]
pub struct SpeakersResponse {
    pub speakers: BTreeMap<String, Vec<String>>,
}
