use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::tts::LanguageCode;
use crate::infrastructure::repositories::{AudioCacheRepository, TtsRepository};

pub struct HealthState {
    pub cache: Arc<AudioCacheRepository>,
    pub tts_repo: Arc<dyn TtsRepository>,
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    let cache_ok = match state.cache.check_writable().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Audio cache is not writable");
            false
        }
    };

    let tts_ok = match state
        .tts_repo
        .list_available_speakers(LanguageCode::Russian)
        .await
    {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Speech model is not available");
            false
        }
    };

    let status = if cache_ok && tts_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if status == StatusCode::OK { "ready" } else { "not_ready" },
            "cache": if cache_ok { "writable" } else { "unavailable" },
            "tts": if tts_ok { "available" } else { "unavailable" }
        })),
    )
}
