use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::json;
use silero_tts_backend::domain::tts::PcmAudio;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Samples rendered per input character
pub const SAMPLES_PER_CHAR: usize = 10;

pub const RU_SPEAKERS: &[&str] = &["aidar", "baya", "kseniya", "xenia", "eugene"];
pub const EN_SPEAKERS: &[&str] = &["en_0", "en_1", "en_2"];

#[derive(Debug, Clone, Deserialize)]
pub struct SynthCall {
    pub text: String,
    pub speaker: String,
    pub language: String,
    pub sample_rate: u32,
}

#[derive(Default)]
pub struct ModelServerState {
    synth_calls: Mutex<Vec<SynthCall>>,
    speaker_calls: AtomicUsize,
    fail_on: Mutex<Option<String>>,
    render_as: Mutex<Option<String>>,
}

/// Audio the fake model renders for `text`: a constant level derived from
/// the text length, so chunks are distinguishable in combined output
pub fn rendered_audio(text: &str, sample_rate: u32) -> PcmAudio {
    let chars = text.chars().count();
    let level = (chars % 50) as f32 / 100.0;
    PcmAudio::new(vec![level; chars * SAMPLES_PER_CHAR], sample_rate)
}

/// Stand-in for the Silero model server
pub struct FakeModelServer {
    pub base_url: String,
    state: Arc<ModelServerState>,
}

impl FakeModelServer {
    pub async fn start() -> Self {
        let state = Arc::new(ModelServerState::default());
        let app = Router::new()
            .route("/speakers", get(speakers))
            .route("/synthesize", post(synthesize))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind model server");
        let addr = listener.local_addr().expect("Failed to get model server addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn synth_calls(&self) -> Vec<SynthCall> {
        self.state.synth_calls.lock().clone()
    }

    pub fn synth_call_count(&self) -> usize {
        self.state.synth_calls.lock().len()
    }

    pub fn speaker_call_count(&self) -> usize {
        self.state.speaker_calls.load(Ordering::SeqCst)
    }

    /// Make synthesis fail for any chunk containing `needle`
    pub fn fail_on(&self, needle: Option<&str>) {
        *self.state.fail_on.lock() = needle.map(str::to_string);
    }

    /// Report `speaker` in `x-speaker` regardless of the one requested
    pub fn render_as(&self, speaker: Option<&str>) {
        *self.state.render_as.lock() = speaker.map(str::to_string);
    }
}

fn speakers_for(language: &str) -> Option<&'static [&'static str]> {
    match language {
        "ru" => Some(RU_SPEAKERS),
        "en" => Some(EN_SPEAKERS),
        _ => None,
    }
}

async fn speakers(
    State(state): State<Arc<ModelServerState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.speaker_calls.fetch_add(1, Ordering::SeqCst);

    let language = params.get("language").map(String::as_str).unwrap_or("");
    match speakers_for(language) {
        Some(speakers) => Json(json!({ "speakers": speakers })).into_response(),
        None => (StatusCode::NOT_FOUND, "unknown language").into_response(),
    }
}

async fn synthesize(
    State(state): State<Arc<ModelServerState>>,
    Json(call): Json<SynthCall>,
) -> Response {
    if let Some(needle) = state.fail_on.lock().as_deref() {
        if call.text.contains(needle) {
            return (StatusCode::INTERNAL_SERVER_ERROR, "model crashed").into_response();
        }
    }

    let Some(speakers) = speakers_for(&call.language) else {
        return (StatusCode::BAD_REQUEST, "unknown language").into_response();
    };
    if !speakers.contains(&call.speaker.as_str()) {
        return (StatusCode::BAD_REQUEST, "unknown speaker").into_response();
    }

    let bytes = rendered_audio(&call.text, call.sample_rate)
        .to_wav_bytes()
        .expect("Failed to encode fake audio");

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/wav"));
    let rendered_by = state
        .render_as
        .lock()
        .clone()
        .unwrap_or_else(|| call.speaker.clone());
    headers.insert(
        "x-speaker",
        HeaderValue::from_str(&rendered_by).expect("Speaker is a valid header value"),
    );

    state.synth_calls.lock().push(call);

    (StatusCode::OK, headers, bytes).into_response()
}
