pub mod audio_cache_repository;
pub mod silero_tts_repository;
pub mod tts_repository;

pub use audio_cache_repository::AudioCacheRepository;
pub use silero_tts_repository::{SileroTtsRepository, SPEAKER_HEADER};
pub use tts_repository::{SynthesizedChunk, TtsRepository};
