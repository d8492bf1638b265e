//! Query façade: fetch, normalize, persist, then read back from the cache.

use parking_lot::Mutex;
use std::sync::Arc;
use tenki_core::Config;

use crate::error::ForecastError;
use crate::fetcher::ForecastFetcher;
use crate::normalize::normalize;
use crate::store::ForecastStore;
use crate::types::{AreaCode, ForecastRecord};

/// Read-through forecast service.
///
/// Callers always receive the store's view of an area, never the freshly
/// normalized batch. Upstream failures degrade to whatever is cached;
/// store failures are returned.
#[derive(Clone)]
pub struct ForecastService {
    fetcher: Arc<ForecastFetcher>,
    store: Arc<Mutex<ForecastStore>>,
}

impl ForecastService {
    pub fn new(fetcher: ForecastFetcher, store: ForecastStore) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Build a service from config, opening the on-disk cache on the blocking pool.
    pub async fn from_config(config: &Config) -> Result<Self, ForecastError> {
        let fetcher = ForecastFetcher::from_config(&config.forecast)?;
        let path = config.storage.database_path.clone();
        let store = tokio::task::spawn_blocking(move || ForecastStore::open(&path)).await??;
        Ok(Self::new(fetcher, store))
    }

    /// Current forecast for an area, refreshed from upstream when possible.
    ///
    /// Returns an empty vector when the upstream fails and nothing is cached.
    pub async fn get_forecast(
        &self,
        area: &AreaCode,
        area_name: &str,
    ) -> Result<Vec<ForecastRecord>, ForecastError> {
        match self.refresh(area, area_name).await {
            Ok(records) => Ok(records),
            Err(e) if e.is_recoverable() => {
                tracing::warn!("Forecast refresh for {} failed, using cache: {}", area, e);
                let cached = self.cached(area).await?;
                tracing::info!("Serving {} cached records for {}", cached.len(), area);
                Ok(cached)
            }
            Err(e) => Err(e),
        }
    }

    /// Cached records for an area without touching the network.
    pub async fn cached(&self, area: &AreaCode) -> Result<Vec<ForecastRecord>, ForecastError> {
        let store = self.store.clone();
        let area = area.clone();
        tokio::task::spawn_blocking(move || store.lock().read_by_area(&area)).await?
    }

    async fn refresh(
        &self,
        area: &AreaCode,
        area_name: &str,
    ) -> Result<Vec<ForecastRecord>, ForecastError> {
        let payload = self.fetcher.fetch(area).await?;
        let batch = normalize(&payload, area, area_name)?;

        let store = self.store.clone();
        let area = area.clone();
        tokio::task::spawn_blocking(move || {
            let mut store = store.lock();
            store.upsert(&batch)?;
            store.read_by_area(&area)
        })
        .await?
    }
}
