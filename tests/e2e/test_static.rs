use crate::e2e::helpers;

use helpers::{TestContext, INDEX_HTML, SCRIPT_JS};
use hyper::StatusCode;

#[tokio::test]
async fn it_should_serve_web_ui_at_root() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.client.get("/").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert!(response
        .header("content-type")
        .is_some_and(|ct| ct.starts_with("text/html")));
    assert_eq!(response.body_bytes, INDEX_HTML.as_bytes());
}

#[tokio::test]
async fn it_should_serve_static_assets() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.client.get("/static/script.js").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body_bytes, SCRIPT_JS.as_bytes());
}

#[tokio::test]
async fn it_should_return_not_found_for_missing_asset() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.client.get("/static/missing.css").await.unwrap();

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn it_should_keep_api_available_without_static_dir() {
    let ctx = TestContext::with_config(|config| {
        config.static_dir = "/nonexistent/silero-static".to_string();
    })
    .await
    .unwrap();

    ctx.client
        .get("/")
        .await
        .unwrap()
        .assert_status(StatusCode::NOT_FOUND);
    ctx.client
        .get("/health")
        .await
        .unwrap()
        .assert_status(StatusCode::OK);
}
