//! caredesk-ui - Complaint management dashboard
//!
//! Pulls complaint registrations and technician follow-up visits from the
//! KoboToolbox forms API, reconciles them into one table, and serves KPI
//! counters, charts, and an unresolved-cases export to the browser.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use caredesk_common::config::{load_config, resolve_config_path};
use caredesk_ui::kobo::KoboClient;
use caredesk_ui::{build_router, AppState};

#[derive(Debug, Parser)]
#[command(name = "caredesk-ui", about = "Complaint management dashboard")]
struct Cli {
    /// Path to caredesk.toml (overrides CAREDESK_CONFIG and defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen port (overrides the config file)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting CareDesk Dashboard (caredesk-ui) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let cli = Cli::parse();

    let config_path = resolve_config_path(cli.config.as_deref());
    info!("Config path: {}", config_path.display());
    let mut config = load_config(&config_path)?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let kobo = KoboClient::new(config.kobo.clone())
        .map_err(|e| anyhow::anyhow!("Failed to create forms client: {}", e))?;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(Arc::new(config), Arc::new(kobo));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("caredesk-ui listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
