//! ttt_matchmaker - HTTP server binary.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use ttt_matchmaker::{PORT_ENV, ServerConfig, Sessions};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            static_dir,
        } => run_http_server(config, host, port, static_dir).await,
    }
}

/// Run the HTTP game server
async fn run_http_server(
    config_path: PathBuf,
    host: Option<String>,
    port: Option<u16>,
    static_dir: Option<PathBuf>,
) -> Result<()> {
    let config = ServerConfig::load(Some(config_path.as_path()))?
        .with_port_env(std::env::var(PORT_ENV).ok())?
        .with_overrides(host, port, static_dir);

    initialize_tracing(config.log_filter());

    info!(
        host = %config.host(),
        port = config.port(),
        static_dir = %config.static_dir().display(),
        "Starting tic-tac-toe matchmaking server"
    );

    let sessions = Sessions::new();
    let app = ttt_matchmaker::router(sessions, config.static_dir());

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!("Server ready at http://{}:{}/", config.host(), config.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

#[instrument]
fn initialize_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
