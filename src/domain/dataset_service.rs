//! Process-lifetime dataset cache.
//!
//! Single-slot, populate-once: the first successful request runs the
//! loader and the derivation engine, then every later request returns
//! the same snapshot until the process restarts (or a test calls
//! [`DatasetService::reset`]). The served data can therefore go stale
//! relative to the remote sheet; that is the accepted contract, not a
//! bug. Failures are never cached, so a request after an outage retries
//! the fetch.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use super::dataset::{derive, Dataset};
use super::error::Error;
use super::ports::SheetSource;

/// Loader + derivation engine behind a populate-once cache slot.
pub struct DatasetService {
    source: Arc<dyn SheetSource>,
    slot: RwLock<Option<Arc<Dataset>>>,
}

impl DatasetService {
    /// Wrap a sheet source with an empty cache.
    pub fn new(source: Arc<dyn SheetSource>) -> Self {
        Self {
            source,
            slot: RwLock::new(None),
        }
    }

    /// The derived dataset, fetching and deriving on first use.
    ///
    /// Two racing first requests may both run the loader; the result is
    /// deterministic and the first writer's snapshot wins, so every
    /// caller still observes a single dataset.
    ///
    /// # Errors
    ///
    /// Propagates `SourceUnavailable` from the loader and
    /// `MissingColumn` from the derivation engine. Neither outcome is
    /// cached.
    pub async fn dataset(&self) -> Result<Arc<Dataset>, Error> {
        if let Some(cached) = self.slot.read().await.as_ref() {
            return Ok(Arc::clone(cached));
        }

        let table = self.source.fetch_table().await?;
        let dataset = Arc::new(derive(table)?);
        info!(
            rows = dataset.table.len(),
            days_late_column = %dataset.days_late_column,
            "dataset loaded and derived"
        );

        let mut slot = self.slot.write().await;
        Ok(Arc::clone(slot.get_or_insert(dataset)))
    }

    /// Drop the cached snapshot so the next request reloads.
    pub async fn reset(&self) {
        *self.slot.write().await = None;
    }
}
