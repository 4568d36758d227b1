//! Zoning lookup server.
//!
//! Exposes a single POST endpoint that geocodes a Vancouver street
//! address and answers with the zoning district containing it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use arbutus::config::Config;
use arbutus::http::{router, AppState};
use arbutus::pipeline::LookupService;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Vancouver zoning lookup server")]
struct Args {
    /// Listen address (overrides the config file)
    #[arg(short, long)]
    listen: Option<String>,

    /// Path to TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };

    let listen = args
        .listen
        .clone()
        .unwrap_or_else(|| config.server.listen.clone());

    info!("Arbutus zoning lookup server");
    info!("Zoning provider: {:?}", config.zoning.provider);
    if config.parcel.is_some() {
        info!("Parcel layer enabled for lot-area lookup");
    }

    let service = LookupService::from_config(&config)?;
    let state = Arc::new(AppState {
        service,
        reporting: config.lookup.reporting,
    });

    let app = router(state);

    info!("Starting server on {}", listen);

    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .context("Failed to bind listen address")?;
    axum::serve(listener, app).await?;

    Ok(())
}
