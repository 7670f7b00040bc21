//! Locale router (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ trace → timeout → classify → i18n policy → page handler
//!                                                      │
//!     Client Response                                  ▼
//!     ◀────────────── pass through │ 404 + Location │ redirect │ fallback redirect
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use locale_router::config::{load_config, log_warnings, ServerConfig};
use locale_router::observability::{logging, metrics};
use locale_router::HttpServer;

#[derive(Parser)]
#[command(name = "locale-router")]
#[command(about = "Locale-aware routing in front of a page handler", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    logging::init_logging(&config.observability.log_level);

    tracing::info!("locale-router v0.1.0 starting");
    tracing::info!(
        config = ?cli.config,
        bind_address = %config.listener.bind_address,
        locales = config.i18n.locales.len(),
        default_locale = %config.i18n.default_locale,
        routing = ?config.i18n.routing,
        fallbacks = config.i18n.fallback.len(),
        "Configuration loaded"
    );
    log_warnings(&config);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
