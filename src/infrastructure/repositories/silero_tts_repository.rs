use super::tts_repository::{SynthesizedChunk, TtsRepository};
use crate::domain::tts::{LanguageCode, PcmAudio, SynthesisError};
use async_trait::async_trait;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Response header in which the model server reports the speaker it used
pub const SPEAKER_HEADER: &str = "x-speaker";

#[derive(Debug, Serialize)]
struct SynthesizePayload<'a> {
    text: &'a str,
    speaker: &'a str,
    language: LanguageCode,
    sample_rate: u32,
}

#[derive(Debug, Deserialize)]
struct SpeakersPayload {
    speakers: Vec<String>,
}

/// Silero model server implementation of TTS repository.
///
/// The server hosts one Silero model per language (`v5_ru`, `v3_en`) and
/// exposes them over HTTP:
/// - `GET /speakers?language=<code>` returns `{"speakers": [...]}`
/// - `POST /synthesize` returns a WAV body for one chunk
pub struct SileroTtsRepository {
    client: reqwest::Client,
    base_url: String,
    speakers: Cache<LanguageCode, Arc<Vec<String>>>,
}

impl SileroTtsRepository {
    pub fn new(base_url: impl Into<String>, speaker_cache_ttl: Duration) -> Self {
        let speakers = Cache::builder()
            .max_capacity(LanguageCode::ALL.len() as u64)
            .time_to_live(speaker_cache_ttl)
            .build();

        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            speakers,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn fetch_speakers(&self, language: LanguageCode) -> Result<Vec<String>, SynthesisError> {
        let response = self
            .client
            .get(self.endpoint("speakers"))
            .query(&[("language", language.as_str())])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, language = %language, "Speaker catalogue request failed");
                SynthesisError::Model(format!("model server unreachable: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, language = %language, "Speaker catalogue request rejected");
            return Err(SynthesisError::Model(format!(
                "model server returned {} for speakers of '{}': {}",
                status, language, body
            )));
        }

        let payload: SpeakersPayload = response.json().await.map_err(|e| {
            SynthesisError::Model(format!("invalid speaker catalogue: {}", e))
        })?;

        tracing::info!(
            language = %language,
            speaker_count = payload.speakers.len(),
            "Speaker catalogue loaded"
        );

        Ok(payload.speakers)
    }
}

#[async_trait]
impl TtsRepository for SileroTtsRepository {
    async fn list_available_speakers(
        &self,
        language: LanguageCode,
    ) -> Result<Vec<String>, SynthesisError> {
        if let Some(speakers) = self.speakers.get(&language).await {
            return Ok(speakers.as_ref().clone());
        }

        let speakers = self.fetch_speakers(language).await?;
        self.speakers
            .insert(language, Arc::new(speakers.clone()))
            .await;
        Ok(speakers)
    }

    async fn synthesize_chunk(
        &self,
        text: &str,
        speaker: &str,
        language: LanguageCode,
        sample_rate: u32,
    ) -> Result<SynthesizedChunk, SynthesisError> {
        let start_time = std::time::Instant::now();

        tracing::debug!(
            language = %language,
            speaker,
            sample_rate,
            text_length = text.chars().count(),
            "Calling Silero model server"
        );

        let payload = SynthesizePayload {
            text,
            speaker,
            language,
            sample_rate,
        };

        let response = self
            .client
            .post(self.endpoint("synthesize"))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    language = %language,
                    speaker,
                    "Silero synthesis request failed"
                );
                SynthesisError::Model(format!("model server unreachable: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body,
                language = %language,
                speaker,
                "Silero synthesis rejected"
            );
            return Err(SynthesisError::Model(format!(
                "model server returned {}: {}",
                status, body
            )));
        }

        let speaker_used = response
            .headers()
            .get(SPEAKER_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| speaker.to_string());

        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read audio from model server");
            SynthesisError::Model(format!("failed to read audio: {}", e))
        })?;

        let audio = PcmAudio::from_wav_bytes(&bytes)
            .map_err(|e| SynthesisError::Model(format!("model server sent invalid audio: {}", e)))?;

        if audio.sample_rate != sample_rate {
            return Err(SynthesisError::Model(format!(
                "model server rendered {} Hz audio, requested {} Hz",
                audio.sample_rate, sample_rate
            )));
        }

        tracing::info!(
            provider = "silero",
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.chars().count(),
            audio_duration_ms = audio.duration().as_millis(),
            speaker = %speaker_used,
            "Chunk synthesized"
        );

        Ok(SynthesizedChunk {
            audio,
            speaker: speaker_used,
        })
    }
}
