use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use silero_tts_backend::controllers::health::HealthState;
use silero_tts_backend::controllers::tts::TtsController;
use silero_tts_backend::domain::tts::TtsService;
use silero_tts_backend::infrastructure::config::{Config, LogFormat};
use silero_tts_backend::infrastructure::http::{build_router, start_http_server};
use silero_tts_backend::infrastructure::repositories::{
    AudioCacheRepository, SileroTtsRepository, TtsRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        environment = ?config.environment,
        "Starting Silero TTS Backend on {}:{}",
        config.host,
        config.port
    );

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories
    tracing::info!("Instantiating repositories...");
    let cache = Arc::new(AudioCacheRepository::new(&config.cache_dir)?);

    tracing::info!(
        model_server_url = %config.model_server_url,
        speaker_cache_ttl_secs = config.speaker_cache_ttl_secs,
        "Using Silero model server"
    );
    let tts_repo: Arc<dyn TtsRepository> = Arc::new(SileroTtsRepository::new(
        config.model_server_url.clone(),
        config.speaker_cache_ttl(),
    ));

    // 2. Instantiate services
    tracing::info!(
        max_chunk_length = config.max_chunk_length,
        max_text_length = config.max_text_length,
        synthesis_concurrency = config.synthesis_concurrency,
        "Instantiating services..."
    );
    let tts_service = Arc::new(TtsService::new(
        tts_repo.clone(),
        cache.clone(),
        config.pipeline_settings(),
    ));

    // 3. Instantiate controllers
    tracing::info!("Instantiating controllers...");
    let tts_controller = Arc::new(TtsController::new(tts_service));
    let health_state = Arc::new(HealthState { cache, tts_repo });

    if config.is_development() {
        tracing::debug!(config = ?config, "Development configuration");
    }

    // Start HTTP server with all routes
    let config = Arc::new(config);
    let app = build_router(&config, tts_controller, health_state);
    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "silero_tts_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "silero_tts_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
