use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::tts::{SpeakersResponse, SynthesisRequest, TtsService, TtsServiceApi},
    error::{AppError, AppResult},
};

pub struct TtsController {
    tts_service: Arc<TtsService>,
}

impl TtsController {
    pub fn new(tts_service: Arc<TtsService>) -> Self {
        Self { tts_service }
    }

    /// POST /api/synthesize - Convert text to speech
    pub async fn synthesize(
        State(controller): State<Arc<TtsController>>,
        Json(request): Json<SynthesisRequest>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let result = controller.tts_service.run(request).await?;

        let audio = tokio::fs::read(&result.path).await.map_err(|e| {
            AppError::Internal(format!(
                "failed to read artifact {}: {}",
                result.path.display(),
                e
            ))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/wav"));
        headers.insert(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_static("attachment; filename=\"generated.wav\""),
        );
        headers.insert("x-chunk-count", HeaderValue::from(result.chunk_count));
        headers.insert("x-cache-hits", HeaderValue::from(result.cache_hits));
        headers.insert("x-language", HeaderValue::from_static(result.language.as_str()));
        if let Ok(speaker) = HeaderValue::from_str(&result.speaker) {
            headers.insert("x-speaker", speaker);
        }
        headers.insert(
            "x-speaker-substituted",
            HeaderValue::from_static(if result.speaker_substituted { "true" } else { "false" }),
        );

        Ok((StatusCode::OK, headers, Body::from(audio)))
    }

    /// GET /api/speakers - Speakers available per language
    pub async fn speakers(
        State(controller): State<Arc<TtsController>>,
    ) -> AppResult<Json<SpeakersResponse>> {
        let speakers = controller.tts_service.speakers().await?;
        Ok(Json(SpeakersResponse { speakers }))
    }
}
