//! Server startup utilities.

use petsocial_config::{AppConfig, ObservabilityConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Builds the default log filter directive.
///
/// Access log lines use the `http` target, so turning `access_log` off
/// raises that target to `warn` and only failed requests are logged.
#[must_use]
pub fn default_filter(config: &ObservabilityConfig) -> String {
    let level = config.log_level.to_lowercase();
    let access = if config.access_log { level.as_str() } else { "warn" };
    format!("{level},petsocial={level},http={access},tower_http=warn,sqlx=warn")
}

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(config)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let addr = config.server.addr();
    let store = if config.database.in_memory { "in-memory" } else { "mysql" };
    let cache = if config.cache.use_redis { "redis" } else { "memory" };

    info!("{}", separator);
    info!("Lookup API: http://{}/api/lookup", addr);
    info!("Admin API:  http://{}/api/admin", addr);
    info!("Health:     http://{}/health", addr);
    info!("Store: {}, cache: {} (ttl {}s)", store, cache, config.cache.ttl_secs);
    info!("{}", separator);
}
