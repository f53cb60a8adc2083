use super::chunker::{split_text, DEFAULT_MAX_CHUNK_LENGTH};
use super::combiner::combine;
use super::dto::SynthesisRequest;
use super::error::TtsServiceError;
use super::language::{LanguageCode, SUPPORTED_SAMPLE_RATES};
use super::cache_key::CacheKey;
use super::speaker::resolve_speaker;
use crate::infrastructure::repositories::{AudioCacheRepository, TtsRepository};
use async_trait::async_trait;
use futures::{stream, StreamExt, TryStreamExt};
use moka::future::Cache;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_MAX_TEXT_LENGTH: usize = 100_000;

const SPEAKER_ALIAS_CAPACITY: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Longest chunk, in characters, sent to the model in one call
    pub max_chunk_length: usize,
    /// Longest accepted request text, in characters
    pub max_text_length: usize,
    /// How many chunks may be synthesized at once (1 = sequential)
    pub synthesis_concurrency: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_chunk_length: DEFAULT_MAX_CHUNK_LENGTH,
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
            synthesis_concurrency: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SynthesisResult {
    /// Playable WAV artifact for the whole text
    pub path: PathBuf,
    /// Speaker(s) heard in the artifact, in chunk order, joined with `+`
    pub speaker: String,
    /// True when the audio is not in the requested speaker's voice
    pub speaker_substituted: bool,
    pub language: LanguageCode,
    pub chunk_count: usize,
    /// Chunks that went to the model for this request
    pub synthesized_chunks: usize,
    /// Chunks served from the cache
    pub cache_hits: usize,
}

#[derive(Debug)]
struct ChunkArtifact {
    path: PathBuf,
    speaker: String,
    synthesized: bool,
}

pub struct TtsService {
    tts_repo: Arc<dyn TtsRepository>,
    cache: Arc<AudioCacheRepository>,
    settings: PipelineSettings,
    /// Chunk key under the resolved speaker -> speaker the model actually used
    speaker_aliases: Cache<CacheKey, String>,
}

impl TtsService {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        cache: Arc<AudioCacheRepository>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            tts_repo,
            cache,
            settings,
            speaker_aliases: Cache::builder()
                .max_capacity(SPEAKER_ALIAS_CAPACITY)
                .build(),
        }
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Turn a request into one playable audio artifact
    ///
    /// This operation:
    /// - Validates the request
    /// - Splits the text into bounded chunks
    /// - Resolves the speaker against the model's catalogue
    /// - Serves each chunk from the cache or synthesizes and caches it
    /// - Stitches multi-chunk results into one cached artifact
    ///
    /// A failing chunk fails the whole request. Chunks cached before the
    /// failure stay cached, so a retry only synthesizes what is missing.
    async fn run(&self, request: SynthesisRequest) -> Result<SynthesisResult, TtsServiceError>;

    /// Speaker catalogue for every supported language
    async fn speakers(&self) -> Result<BTreeMap<String, Vec<String>>, TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn run(&self, request: SynthesisRequest) -> Result<SynthesisResult, TtsServiceError> {
        let start_time = std::time::Instant::now();

        // 1. Validate
        let language = self.validate(&request)?;

        // 2. Chunk
        let chunks = split_text(&request.text, self.settings.max_chunk_length);
        tracing::info!(
            text_length = request.text.chars().count(),
            chunk_count = chunks.len(),
            language = %language,
            sample_rate = request.sample_rate,
            "Text chunked"
        );

        // 3. Resolve the speaker before any cache key is built
        let available = self.tts_repo.list_available_speakers(language).await?;
        let resolved = resolve_speaker(&request.speaker, language, &available)?;

        // 4. Fetch or synthesize every chunk, keeping chunk order
        let artifacts: Vec<ChunkArtifact> = stream::iter(chunks.into_iter().enumerate())
            .map(|(index, chunk)| {
                self.chunk_artifact(index, chunk, &resolved.speaker, language, request.sample_rate)
            })
            .buffered(self.settings.synthesis_concurrency.max(1))
            .try_collect()
            .await?;

        let synthesized_chunks = artifacts.iter().filter(|a| a.synthesized).count();
        let cache_hits = artifacts.len() - synthesized_chunks;
        let speaker = artifact_speaker(&artifacts);
        let speaker_substituted = resolved.substituted || speaker != resolved.speaker;

        // 5. Combine
        let path = match artifacts.as_slice() {
            [single] => single.path.clone(),
            _ => {
                self.combine_artifacts(&request, &speaker, language, &artifacts)
                    .await?
            }
        };

        tracing::info!(
            path = %path.display(),
            speaker = %speaker,
            speaker_substituted,
            chunk_count = artifacts.len(),
            synthesized_chunks,
            cache_hits,
            latency_ms = start_time.elapsed().as_millis(),
            "TTS pipeline completed"
        );

        Ok(SynthesisResult {
            path,
            speaker,
            speaker_substituted,
            language,
            chunk_count: artifacts.len(),
            synthesized_chunks,
            cache_hits,
        })
    }

    async fn speakers(&self) -> Result<BTreeMap<String, Vec<String>>, TtsServiceError> {
        let mut catalogue = BTreeMap::new();
        for language in LanguageCode::ALL {
            let speakers = self.tts_repo.list_available_speakers(language).await?;
            catalogue.insert(language.as_str().to_string(), speakers);
        }
        Ok(catalogue)
    }
}

impl TtsService {
    fn validate(&self, request: &SynthesisRequest) -> Result<LanguageCode, TtsServiceError> {
        if request.text.trim().is_empty() {
            return Err(TtsServiceError::Validation("Text is required".to_string()));
        }

        let text_length = request.text.chars().count();
        if text_length > self.settings.max_text_length {
            return Err(TtsServiceError::PayloadTooLarge(format!(
                "Text must be {} characters or less, got {}",
                self.settings.max_text_length, text_length
            )));
        }

        if !SUPPORTED_SAMPLE_RATES.contains(&request.sample_rate) {
            return Err(TtsServiceError::Validation(format!(
                "Unsupported sample rate {}, expected one of {:?}",
                request.sample_rate, SUPPORTED_SAMPLE_RATES
            )));
        }

        Ok(request.language.parse::<LanguageCode>()?)
    }

    async fn chunk_artifact(
        &self,
        index: usize,
        text: String,
        speaker: &str,
        language: LanguageCode,
        sample_rate: u32,
    ) -> Result<ChunkArtifact, TtsServiceError> {
        let requested_key = self.cache.key_for(&text, speaker, language, sample_rate);

        // A chunk the model rendered with another speaker is stored under that speaker
        let (key, cached_speaker) = match self.speaker_aliases.get(&requested_key).await {
            Some(actual) => (
                self.cache.key_for(&text, &actual, language, sample_rate),
                actual,
            ),
            None => (requested_key.clone(), speaker.to_string()),
        };

        if let Some(path) = self.cache.get(&key).await? {
            tracing::debug!(chunk_index = index, cache_key = %key, "Chunk cache hit");
            return Ok(ChunkArtifact {
                path,
                speaker: cached_speaker,
                synthesized: false,
            });
        }

        tracing::info!(
            chunk_index = index,
            chunk_length = text.chars().count(),
            speaker,
            "Synthesizing chunk"
        );

        let synthesized = self
            .tts_repo
            .synthesize_chunk(&text, speaker, language, sample_rate)
            .await?;

        // The key must describe the audio, so follow the model if it switched speakers
        let key = if synthesized.speaker == speaker {
            self.speaker_aliases.invalidate(&requested_key).await;
            requested_key
        } else {
            tracing::warn!(
                chunk_index = index,
                requested_speaker = speaker,
                speaker = %synthesized.speaker,
                "Model rendered chunk with a different speaker"
            );
            self.speaker_aliases
                .insert(requested_key, synthesized.speaker.clone())
                .await;
            self.cache
                .key_for(&text, &synthesized.speaker, language, sample_rate)
        };

        let path = self.cache.put(&key, &synthesized.audio).await?;
        tracing::debug!(chunk_index = index, cache_key = %key, "Chunk cached");

        Ok(ChunkArtifact {
            path,
            speaker: synthesized.speaker,
            synthesized: true,
        })
    }

    async fn combine_artifacts(
        &self,
        request: &SynthesisRequest,
        speaker: &str,
        language: LanguageCode,
        artifacts: &[ChunkArtifact],
    ) -> Result<PathBuf, TtsServiceError> {
        let key = self
            .cache
            .combined_key_for(&request.text, speaker, language, request.sample_rate);

        if let Some(path) = self.cache.get(&key).await? {
            tracing::debug!(cache_key = %key, "Combined audio cache hit");
            return Ok(path);
        }

        tracing::info!(
            chunk_count = artifacts.len(),
            cache_key = %key,
            "Combining chunk audio"
        );

        let mut parts = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            parts.push(self.cache.read(&artifact.path).await?);
        }
        let combined = combine(parts)?;

        Ok(self.cache.put(&key, &combined).await?)
    }
}

/// Distinct chunk speakers in order of first appearance, joined with `+`
fn artifact_speaker(artifacts: &[ChunkArtifact]) -> String {
    let mut speakers: Vec<&str> = Vec::new();
    for artifact in artifacts {
        if !speakers.contains(&artifact.speaker.as_str()) {
            speakers.push(&artifact.speaker);
        }
    }
    speakers.join("+")
}
