mod routes;
mod singleton;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;

use agenda_core::{Agenda, AgendaConfig, StoreBackend};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[derive(Parser)]
#[command(name = "agenda-server", version, about = "HTTP server for recurring appointments")]
struct Cli {
    /// Config file (defaults to ~/.config/agenda/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to listen on, overrides the config file
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AgendaConfig::load_from(path)?,
        None => AgendaConfig::load()?,
    };

    // Ensure only one instance writes the data file
    let _lock = match config.store {
        StoreBackend::File => Some(singleton::acquire_lock(&config.data_path())?),
        StoreBackend::Memory => None,
    };

    let store = config.open_store().await?;
    tracing::info!(store = ?config.store, path = %config.data_path().display(), "opened store");

    let app = routes::app(AppState::new(Agenda::new(store)));

    let addr = match cli.bind {
        Some(addr) => addr,
        None => config
            .bind
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", config.bind))?,
    };
    tracing::info!("agenda-server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
