pub mod audio;
pub mod cache_key;
pub mod chunker;
pub mod combiner;
pub mod dto;
pub mod error;
pub mod language;
pub mod service;
pub mod speaker;

pub use audio::PcmAudio;
pub use cache_key::{ArtifactKind, CacheKey};
pub use chunker::{split_text, DEFAULT_MAX_CHUNK_LENGTH};
pub use combiner::combine;
pub use dto::{SpeakersResponse, SynthesisRequest};
pub use error::{StorageError, SynthesisError, TtsServiceError};
pub use language::{LanguageCode, SUPPORTED_SAMPLE_RATES};
pub use service::{PipelineSettings, SynthesisResult, TtsService, TtsServiceApi};
pub use speaker::{resolve_speaker, ResolvedSpeaker};
