//! Shared catalog dataset
//!
//! The catalog is fetched once, on first use, and then shared read-only for
//! the life of the process. Requests that arrive while the fetch is running
//! wait for it and all see the same fully-built [`Dataset`].
//!
//! A failed fetch is fatal: the reason is recorded, the shutdown token is
//! cancelled so the server stops, and no later caller triggers a new fetch.

use super::client::{CatalogSource, FetchError};
use groupie_common::Dataset;
use std::sync::{Arc, OnceLock};
use std::time::Instant;
use thiserror::Error;
use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// The catalog could not be loaded; the service is shutting down
#[derive(Debug, Clone, Error)]
#[error("Catalog unavailable: {0}")]
pub struct CatalogUnavailable(pub String);

/// Lazily-loaded, immutable-after-load catalog
pub struct CatalogStore {
    /// `None` when the store was built already loaded
    source: Option<Arc<dyn CatalogSource>>,
    dataset: OnceCell<Arc<Dataset>>,
    fatal: OnceLock<String>,
    shutdown: CancellationToken,
}

impl CatalogStore {
    /// Store that loads from `source` on first use and cancels `shutdown` if that fails
    pub fn new(source: Arc<dyn CatalogSource>, shutdown: CancellationToken) -> Self {
        Self {
            source: Some(source),
            dataset: OnceCell::new(),
            fatal: OnceLock::new(),
            shutdown,
        }
    }

    /// Store that is already loaded with `dataset`
    pub fn with_dataset(dataset: Dataset) -> Self {
        Self {
            source: None,
            dataset: OnceCell::new_with(Some(Arc::new(dataset))),
            fatal: OnceLock::new(),
            shutdown: CancellationToken::new(),
        }
    }

    /// Return the dataset, fetching it first if this is the first call
    ///
    /// Concurrent first callers share one fetch.
    pub async fn ensure_loaded(&self) -> Result<Arc<Dataset>, CatalogUnavailable> {
        if let Some(reason) = self.fatal.get() {
            return Err(CatalogUnavailable(reason.clone()));
        }

        self.dataset
            .get_or_try_init(|| self.load_once())
            .await
            .map(Arc::clone)
    }

    async fn load_once(&self) -> Result<Arc<Dataset>, CatalogUnavailable> {
        // A waiter woken after a failed fetch must not fetch again
        if let Some(reason) = self.fatal.get() {
            return Err(CatalogUnavailable(reason.clone()));
        }

        let Some(source) = &self.source else {
            return Err(CatalogUnavailable("no catalog source configured".to_string()));
        };

        info!("Loading catalog");
        let started = Instant::now();

        match source.load().await {
            Ok(dataset) => {
                info!(
                    artists = dataset.artists.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "✓ Catalog loaded"
                );
                Ok(Arc::new(dataset))
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn fail(&self, e: FetchError) -> CatalogUnavailable {
        let reason = e.to_string();
        error!(error = %reason, "Catalog load failed; shutting down");
        let _ = self.fatal.set(reason);
        self.shutdown.cancel();
        CatalogUnavailable(self.fatal.get().cloned().unwrap_or_default())
    }

    pub fn is_loaded(&self) -> bool {
        self.dataset.initialized()
    }

    /// Reason the catalog load failed, if it did
    pub fn fatal_error(&self) -> Option<&str> {
        self.fatal.get().map(String::as_str)
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown
    }
}
