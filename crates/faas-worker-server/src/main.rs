//! Binary entrypoint for the faas worker HTTP server.
//!
//! Reads configuration from environment variables:
//! - `HANDLER_FUNCTION`: handler identifier (default: "function.handler.handle")
//! - `WORKER_HOST`: listen address (default: "0.0.0.0")
//! - `WORKER_PORT`: listen port (default: "8000")
//! - `RUST_LOG`: log filter (default: "info")
//!
//! The handler is resolved before the listener is bound; if resolution fails
//! the process exits with status 1 without serving any traffic.

use std::process;

use faas_worker_core::{HandlerResolutionError, RegistryError};
use faas_worker_server::config::{ConfigError, WorkerConfig};
use faas_worker_server::startup;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Resolution(#[from] HandlerResolutionError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run().await {
        tracing::error!("{}", err);
        process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = WorkerConfig::from_env()?;
    let registry = faas_worker_functions::registry()?;

    let app = startup::prepare(&config, &registry)?;

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!("faas worker starting on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    tracing::info!("faas worker stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for ctrl-c: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!("failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
