//! groupie-web - band catalog web front end
//!
//! Serves the artist list, artist detail pages and search suggestions over
//! data fetched once from the public catalog API.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use groupie_common::config::{ConfigOverrides, ConfigResolver, ServerConfig};
use groupie_web::catalog::{CatalogClient, CatalogStore};
use groupie_web::{build_router, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Command-line arguments; each overrides its environment/config file value
#[derive(Debug, Parser)]
#[command(name = "groupie-web", version, about = "Band catalog web front end")]
struct Args {
    /// Config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address, host:port
    #[arg(long)]
    bind: Option<String>,

    /// Catalog API base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Directory served under /assets
    #[arg(long)]
    assets_dir: Option<PathBuf>,

    /// Default log level (RUST_LOG takes precedence)
    #[arg(long)]
    log_level: Option<String>,

    /// Per-request timeout for catalog calls, in seconds (0 = none)
    #[arg(long)]
    request_timeout: Option<u64>,

    /// Fetch the catalog before accepting connections
    #[arg(long)]
    preload: bool,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            bind_addr: self.bind.clone(),
            api_base_url: self.api_url.clone(),
            assets_dir: self.assets_dir.clone(),
            log_level: self.log_level.clone(),
            request_timeout_secs: self.request_timeout,
            preload: self.preload.then_some(true),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let resolver = ConfigResolver::new(args.config.clone());
    let config = resolver
        .resolve(&args.overrides())
        .context("Failed to load configuration")?;

    init_tracing(&config)?;

    info!(
        "Starting groupie-web v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    if let Some(path) = resolver.config_file_path() {
        info!("Config file: {}", path.display());
    }
    info!("Catalog API: {}", config.api_base_url);
    info!("Assets: {}", config.assets_dir.display());

    let shutdown = CancellationToken::new();
    let client = CatalogClient::from_config(&config).context("Failed to create catalog client")?;
    let store = Arc::new(CatalogStore::new(Arc::new(client), shutdown.clone()));

    if config.preload {
        store
            .ensure_loaded()
            .await
            .map_err(|e| anyhow!("Catalog preload failed: {}", e))?;
    }

    let state = AppState::new(Arc::clone(&store), config.assets_dir.clone());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("groupie-web listening on http://{}", config.bind_addr);
    info!("To stop the server press Ctrl+C");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    if let Some(reason) = store.fatal_error() {
        error!("Stopped: catalog could not be loaded");
        return Err(anyhow!("Catalog load failed: {}", reason));
    }

    info!("groupie-web stopped");
    Ok(())
}

/// `RUST_LOG` wins; otherwise the configured level
fn init_tracing(config: &ServerConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("Invalid log level {:?}", config.log_level))?,
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

/// Resolves on Ctrl+C or when a fatal catalog failure cancels `token`
async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = ctrl_c => {
            info!("Ctrl+C received, shutting down");
        }
        _ = token.cancelled() => {
            warn!("Shutdown requested after fatal error");
        }
    }
}
