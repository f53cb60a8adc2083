use crate::e2e::helpers;

use helpers::model_server::{EN_SPEAKERS, RU_SPEAKERS};
use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn it_should_list_speakers_per_language() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.client.get("/api/speakers").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body.unwrap(),
        json!({ "speakers": { "en": EN_SPEAKERS, "ru": RU_SPEAKERS } })
    );
}

#[tokio::test]
async fn it_should_cache_speaker_catalogue() {
    let ctx = TestContext::new().await.unwrap();

    ctx.client
        .get("/api/speakers")
        .await
        .unwrap()
        .assert_status(StatusCode::OK);
    let calls_after_first = ctx.model.speaker_call_count();
    assert_eq!(calls_after_first, 2);

    ctx.client
        .get("/api/speakers")
        .await
        .unwrap()
        .assert_status(StatusCode::OK);
    ctx.client
        .post("/api/synthesize", &json!({ "text": "Привет." }))
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    assert_eq!(ctx.model.speaker_call_count(), calls_after_first);
}

#[tokio::test]
async fn it_should_fail_when_model_server_is_down() {
    let ctx = TestContext::with_config(|config| {
        // Nothing listens on the discard port
        config.model_server_url = "http://127.0.0.1:9".to_string();
    })
    .await
    .unwrap();

    let response = ctx.client.get("/api/speakers").await.unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("Speech synthesis failed");
}
