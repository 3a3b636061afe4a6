use crate::presentation::config::LoggingSettings;

/// Configuration for tracing initialization, derived from the logging
/// section of [`Settings`](crate::presentation::Settings) so that env
/// parsing happens in exactly one place.
pub struct TracingConfig {
    /// Base level for the default filter when RUST_LOG is unset.
    pub level: String,
    pub json_format: bool,
}

impl From<&LoggingSettings> for TracingConfig {
    fn from(logging: &LoggingSettings) -> Self {
        Self {
            level: logging.level.clone(),
            json_format: logging.enable_json,
        }
    }
}
