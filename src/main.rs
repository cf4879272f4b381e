pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;

use anyhow::{Context, Result};
use config::Config;
use routes::AppState;
use service::TodoService;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run().await {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = Config::load()?;

    // open and ping the store before taking any traffic
    let repository = repository::connect(&config.storage)
        .with_context(|| format!("could not open store at {}", config.storage))?;
    tracing::info!(storage = %config.storage, "connected to store");

    let todos = TodoService::new(repository);
    let app = routes::router(AppState::new(todos.clone()));

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("could not bind port {}", config.port))?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    wind_down(served, &todos)
}

/// Flushes the store whether or not the server exited cleanly, then
/// reports the server error first.
fn wind_down(served: std::io::Result<()>, todos: &TodoService) -> Result<()> {
    let flushed = todos.flush();
    served.context("server stopped unexpectedly")?;
    flushed?;
    tracing::info!("store flushed, bye");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::warn!(%err, "could not listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::warn!(%err, "could not listen for SIGTERM");
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
    tracing::info!("shutting down");
}
