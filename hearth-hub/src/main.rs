//! hearth-hub binary entry point.
//!
//! ## Example
//!
//! ```bash
//! # Defaults (hearth.toml when present, env overrides applied)
//! hearth-hub
//!
//! # Explicit config file and bind address
//! hearth-hub --config /etc/hearth/hearth.toml --bind 127.0.0.1:9000
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use hearth_hub::config::{Config, DEFAULT_ADMIN_KEY};
use hearth_hub::http;
use hearth_hub::hub::Hub;

/// Smart-home state hub and alert notifier.
#[derive(Parser, Debug)]
#[command(name = "hearth-hub")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file (default: hearth.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the bind address from the configuration
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hearth_hub=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    config.apply_env();
    if let Some(bind) = cli.bind {
        config.server.bind_address = bind;
    }

    if config.auth.admin_key == DEFAULT_ADMIN_KEY {
        tracing::warn!("Using the default admin key; set ADMIN_KEY before exposing this service");
    }
    if config.notifier.is_configured() {
        tracing::info!("Notifier in live mode");
    } else {
        tracing::info!("Notifier in simulation mode (credentials not configured)");
    }

    http::health::init_start_time();

    let bind_address = config.server.bind_address.clone();
    let hub = Arc::new(Hub::new(config).context("building hub")?);
    let app = http::build_router(hub);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("binding {bind_address}"))?;
    tracing::info!("Listening on {}", bind_address);

    axum::serve(listener, app).await.context("serving HTTP")?;

    Ok(())
}
