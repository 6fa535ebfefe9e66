use serde::{Deserialize, Serialize};

/// Logging configuration, same shape as the teacher's
/// `domain::config::LoggingConfig`: a level string plus a `Default`.
/// The engine crate never installs a global subscriber itself (a
/// library must not steal that decision from its host); this struct is
/// here only so a host binary can build one the same way the teacher's
/// `cli::bootstrap::logging::init_logging` does.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Installs a `tracing_subscriber::fmt` global subscriber at the
/// configured level, the same shape as the teacher's
/// `cli::bootstrap::logging::init_logging`. The analysis engine itself
/// never calls this — only a host binary (CLI, batch job, service)
/// wiring up this library should decide when to install a global
/// subscriber.
pub fn init_logging(config: &LoggingConfig) {
    let log_level = config.level.parse().unwrap_or(tracing::Level::INFO);

    tracing_subscriber::fmt()
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true)
        .with_max_level(log_level)
        .with_ansi(true)
        .init();

    tracing::info!(level = %config.level, "logging initialized");
}
