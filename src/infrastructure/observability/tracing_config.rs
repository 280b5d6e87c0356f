use crate::presentation::config::{Environment, LoggingSettings};

/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: Environment,
    pub default_level: String,
    pub json_format: bool,
}

impl TracingConfig {
    pub fn from_settings(environment: Environment, logging: &LoggingSettings) -> Self {
        Self {
            environment,
            default_level: logging.level.clone(),
            json_format: logging.json,
        }
    }

    /// Filter used when `RUST_LOG` is unset.
    pub fn default_filter(&self) -> String {
        format!(
            "{},casebrief=debug,tower_http=debug",
            self.default_level
        )
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Local,
            default_level: "info".to_string(),
            json_format: false,
        }
    }
}
