use std::collections::HashMap;

use config::{Config, ConfigError, Environment as EnvironmentSource, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub ocr: OcrSettings,
    pub llm: LlmSettings,
    pub identity: IdentitySettings,
    pub database: DatabaseSettings,
    pub pipeline: PipelineSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// `appsettings.{env}.toml` (optional), then `APP_*` variables,
    /// e.g. `APP_LLM__API_KEY`.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.allowed_origins", vec!["http://localhost:3000"])?
            .set_default("storage.provider", "local")?
            .set_default("storage.local_path", "./data/blobs")?
            .set_default("ocr.endpoint", "https://vision.googleapis.com")?
            .set_default("ocr.poll_interval_secs", 5)?
            .set_default("ocr.poll_timeout_secs", 600)?
            .set_default("llm.base_url", "https://api.openai.com/v1")?
            .set_default("llm.api_key", "")?
            .set_default("llm.model", "gpt-4o")?
            .set_default("llm.max_tokens", 4096)?
            .set_default("llm.temperature", 0.2)?
            .set_default("identity.provider", "token_info")?
            .set_default(
                "identity.token_info_url",
                "https://oauth2.googleapis.com/tokeninfo",
            )?
            .set_default("database.provider", "memory")?
            .set_default("database.max_connections", 10)?
            .set_default("pipeline.max_upload_bytes", 10 * 1024 * 1024)?
            .set_default("pipeline.min_native_chars", 500)?
            .set_default("pipeline.retry.max_attempts", 3)?
            .set_default("pipeline.retry.multiplier", 1.0)?
            .set_default("pipeline.retry.min_backoff_secs", 4.0)?
            .set_default("pipeline.retry.max_backoff_secs", 10.0)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str().to_lowercase()))
                    .required(false),
            )
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub provider: StorageProviderSetting,
    pub local_path: String,
    pub bucket: Option<String>,
    pub service_account_path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderSetting {
    Local,
    Gcs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    pub poll_interval_secs: u64,
    pub poll_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: usize,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentitySettings {
    pub provider: IdentityProviderSetting,
    pub token_info_url: String,
    pub audience: Option<String>,
    /// token -> user id, for local runs only.
    #[serde(default)]
    pub static_tokens: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityProviderSetting {
    TokenInfo,
    Static,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub provider: DatabaseProviderSetting,
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseProviderSetting {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineSettings {
    pub max_upload_bytes: usize,
    pub min_native_chars: usize,
    pub retry: RetrySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub multiplier: f64,
    pub min_backoff_secs: f64,
    pub max_backoff_secs: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}
