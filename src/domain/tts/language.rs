use super::error::SynthesisError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sample rates the Silero models can render
pub const SUPPORTED_SAMPLE_RATES: [u32; 3] = [8000, 24000, 48000];

/// ISO 639-1 language codes served by the Silero models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "ru")]
    Russian,
    #[serde(rename = "en")]
    English,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 2] = [LanguageCode::Russian, LanguageCode::English];

    /// Get the ISO 639-1 code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::Russian => "ru",
            LanguageCode::English => "en",
        }
    }

    /// Documented fallback speaker for the language, if it has one.
    /// Languages without one fall back to the first speaker the model lists.
    pub fn default_speaker(&self) -> Option<&'static str> {
        match self {
            LanguageCode::Russian => None,
            LanguageCode::English => Some("en_0"),
        }
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = SynthesisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ru" => Ok(LanguageCode::Russian),
            "en" => Ok(LanguageCode::English),
            other => Err(SynthesisError::UnsupportedLanguage(other.to_string())),
        }
    }
}
