use crate::domain::tts::{PipelineSettings, DEFAULT_MAX_CHUNK_LENGTH};
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Artifact storage
    pub cache_dir: String,
    pub static_dir: String,
    // Silero model server
    pub model_server_url: String,
    pub speaker_cache_ttl_secs: u64,
    // Pipeline
    pub max_chunk_length: usize,
    pub max_text_length: usize,
    pub synthesis_concurrency: usize,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            cache_dir: env::var("CACHE_DIR").unwrap_or_else(|_| "cache".to_string()),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
            model_server_url: env::var("MODEL_SERVER_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8001".to_string()),
            speaker_cache_ttl_secs: env::var("SPEAKER_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()?,
            max_chunk_length: env::var("MAX_CHUNK_LENGTH")
                .unwrap_or_else(|_| DEFAULT_MAX_CHUNK_LENGTH.to_string())
                .parse()?,
            max_text_length: env::var("MAX_TEXT_LENGTH")
                .unwrap_or_else(|_| "100000".to_string())
                .parse()?,
            synthesis_concurrency: env::var("SYNTHESIS_CONCURRENCY")
                .unwrap_or_else(|_| "1".to_string())
                .parse()?,
        };

        if config.max_chunk_length == 0 {
            return Err("MAX_CHUNK_LENGTH must be greater than zero".into());
        }

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn speaker_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.speaker_cache_ttl_secs)
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            max_chunk_length: self.max_chunk_length,
            max_text_length: self.max_text_length,
            synthesis_concurrency: self.synthesis_concurrency.max(1),
        }
    }
}
