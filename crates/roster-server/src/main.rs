//! # Roster Server
//!
//! Main entry point for the Roster users and roles API.

use roster_config::{AppConfig, ConfigLoader};
use roster_core::{telemetry::init_telemetry, RosterError, RosterResult};
use roster_server::{
    app::App,
    startup::{print_banner, print_startup_info},
};
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let config = match load_config().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to start: {e}");
            std::process::exit(1);
        }
    };

    print_banner();
    info!("Version: {}", config.app.version);
    info!("Environment: {}", config.app.environment);

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

/// Loads configuration and installs the tracing subscriber it describes.
async fn load_config() -> RosterResult<AppConfig> {
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get();
    init_telemetry(&config.observability.telemetry(&config.app.name))?;
    info!(environment = config_loader.environment(), "Configuration loaded");
    Ok(config)
}

async fn run(config: AppConfig) -> RosterResult<()> {
    let app = App::build(&config).await?;

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| RosterError::internal(format!("Failed to bind {addr}: {e}")))?;

    print_startup_info(&addr, config.server.swagger_enabled);

    let served = axum::serve(listener, app.router.clone())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| RosterError::internal(format!("REST server error: {e}")));

    app.close().await;
    served?;

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
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
