mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    DatabaseProviderSetting, DatabaseSettings, IdentityProviderSetting, IdentitySettings,
    LlmSettings, LoggingSettings, OcrSettings, PipelineSettings, RetrySettings, ServerSettings,
    Settings, StorageProviderSetting, StorageSettings,
};
