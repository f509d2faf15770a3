use tracing_appender::non_blocking::WorkerGuard;

use crate::{
    client::{ClientConfig, ProfileService},
    config::{VibeConfig, default_log_dir},
    event::EventHandler,
    logging::{LoggingConfig, init_logging},
    notice_service::NoticeService,
    result::Result,
    stores::ComparisonStore,
};

pub struct AppComponents {
    pub service: ProfileService,
    pub events: EventHandler,
    pub store: ComparisonStore,
    pub notices: NoticeService,
    pub _log_guard: Option<WorkerGuard>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InitOptions {
    /// Dump raw response bodies to disk
    pub debug: bool,
    /// Mirror logs to stderr
    pub verbose: bool,
}

/// Wire logging, the profile service and the session state together.
///
/// Must run inside a Tokio runtime.
pub fn initialize_app(config: &VibeConfig, options: InitOptions) -> Result<AppComponents> {
    let log_guard = initialize_logging(config, options)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "vibecheck starting up");

    let client_config = ClientConfig::from(config.clone()).with_debug_logging(options.debug);
    let service = ProfileService::new(client_config)?;

    let events = EventHandler::new();
    let store = ComparisonStore::new(events.sender());

    Ok(AppComponents {
        service,
        events,
        store,
        notices: NoticeService::new(),
        _log_guard: log_guard,
    })
}

fn initialize_logging(config: &VibeConfig, options: InitOptions) -> Result<Option<WorkerGuard>> {
    let mut logging_config = LoggingConfig::from_env();
    logging_config.stderr = options.verbose;

    // config file wins over the environment
    if let Some(log_level) = &config.log_level
        && !config.logging_disabled()
    {
        logging_config.filter = log_level.clone();
    }

    logging_config.log_dir = if config.logging_disabled() {
        None
    } else {
        Some(config.log_dir.clone().unwrap_or_else(default_log_dir))
    };

    init_logging(logging_config)
}
