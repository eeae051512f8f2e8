//! # Petsocial API Server
//!
//! Serves the cached lookup endpoints and the admin endpoints that
//! maintain the lookup tables.

use anyhow::Context;
use petsocial_config::{format_validation_errors, AppConfig, ConfigLoader, ConfigValidator};
use petsocial_rest::create_router;
use petsocial_server::{di, startup};
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let config = match load_config().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    };

    startup::init_logging(&config.observability);

    info!("Starting Petsocial API server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    if let Err(e) = run(config).await {
        error!("Application error: {:#}", e);
        std::process::exit(1);
    }
}

async fn load_config() -> anyhow::Result<AppConfig> {
    let loader = ConfigLoader::from_default_location().context("failed to load configuration")?;
    let config = loader.get().await;
    ConfigValidator::validate(&config).map_err(|errors| anyhow::anyhow!(format_validation_errors(&errors)))?;
    Ok(config)
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let module = di::build_module(&config)
        .await
        .context("failed to build application module")?;

    let router = create_router(module.app_state(), &config.server);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    startup::print_startup_info(&config);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
