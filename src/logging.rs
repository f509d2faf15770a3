use std::path::PathBuf;

use compact_str::CompactString;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::result::{Result, VibeError};

pub const LOG_ENV_VAR: &str = "VIBECHECK_LOG";
const DEFAULT_FILTER: &str = "vibecheck=info";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directives
    pub filter: CompactString,
    /// Directory of the daily rolling JSON log; `None` disables the file
    pub log_dir: Option<PathBuf>,
    /// Also print compact logs to stderr
    pub stderr: bool,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            filter: std::env::var(LOG_ENV_VAR)
                .map(CompactString::from)
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
            log_dir: Some(crate::config::default_log_dir()),
            stderr: false,
        }
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held until exit.
pub fn init_logging(config: LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(config.filter.as_str()).map_err(|e| {
        VibeError::config_validation_error("log_level", format!("invalid log filter: {e}"))
    })?;

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "vibecheck.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .json();
            (Some(layer), Some(guard))
        },
        None => (None, None),
    };

    let stderr_layer = config.stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| VibeError::GeneralError(format!("Failed to initialize logging: {e}").into()))?;

    Ok(guard)
}
