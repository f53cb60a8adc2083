pub mod request_id;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::controllers::{
    health::{self, HealthState},
    tts::TtsController,
};
use crate::infrastructure::config::Config;

pub use request_id::{request_id_middleware, X_REQUEST_ID};

/// Build the application router with all routes configured
pub fn build_router(
    config: &Config,
    tts_controller: Arc<TtsController>,
    health_state: Arc<HealthState>,
) -> Router {
    // Synthesis API
    let api_routes = Router::new()
        .route("/api/speakers", get(TtsController::speakers))
        .route("/api/synthesize", post(TtsController::synthesize))
        .with_state(tts_controller);

    // Liveness and readiness
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(health_state);

    let mut app = Router::new().merge(health_routes).merge(api_routes);

    // Web UI
    let static_dir = Path::new(&config.static_dir);
    if static_dir.is_dir() {
        app = app
            .route_service("/", ServeFile::new(static_dir.join("index.html")))
            .nest_service("/static", ServeDir::new(static_dir));
    } else {
        tracing::warn!(
            static_dir = %static_dir.display(),
            "Static directory not found, web UI disabled"
        );
    }

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(request_id_middleware)),
    )
}

/// Start the HTTP server
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
