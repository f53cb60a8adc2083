use super::language::LanguageCode;
use crate::error::AppError;
use std::path::PathBuf;

/// Failure of the speech model to produce audio for a chunk
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("language '{0}' is not supported")]
    UnsupportedLanguage(String),
    #[error("no speakers available for language '{0}'")]
    NoSpeakers(LanguageCode),
    #[error("speech model error: {0}")]
    Model(String),
}

/// Failure to read or write an audio artifact
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid audio artifact: {0}")]
    Wav(#[from] hound::Error),
    #[error("sample rate mismatch: expected {expected} Hz, found {found} Hz")]
    SampleRateMismatch { expected: u32, found: u32 },
    #[error("no audio artifacts to combine")]
    EmptyCombination,
    #[error("storage task failed: {0}")]
    Task(String),
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("text too large: {0}")]
    PayloadTooLarge(String),
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::Validation(msg) => AppError::BadRequest(msg),
            TtsServiceError::PayloadTooLarge(msg) => AppError::PayloadTooLarge(msg),
            TtsServiceError::Synthesis(e @ SynthesisError::UnsupportedLanguage(_)) => {
                AppError::BadRequest(e.to_string())
            }
            TtsServiceError::Synthesis(e) => AppError::ExternalService(e.to_string()),
            TtsServiceError::Storage(e) => AppError::Internal(e.to_string()),
        }
    }
}
