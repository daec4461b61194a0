// In-memory cache over the dataset source with a fixed freshness window.
// Fresh reads share a read lock. Reloads run under the write lock and re-check freshness
// first, so concurrent callers arriving on a stale cache wait for a single reload.

use serde_json::Value;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::dataset::*;
use crate::error::{LoadError, Result};
use crate::source::{DatasetSource, JsonFileSource};

/// How long a loaded dataset is served before the source is read again: 30 minutes.
pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(30 * 60);
/// Number of top words returned when the caller doesn't ask for a valid count.
pub const DEFAULT_TOP_WORDS_LIMIT: usize = 50;

#[derive(Debug, Clone)]
struct CacheEntry {
    data: Arc<Dataset>,
    loaded_at: Instant,
}

impl CacheEntry {
    fn new(data: Dataset) -> Self {
        Self {
            data: Arc::new(data),
            loaded_at: Instant::now(),
        }
    }

    fn is_fresh(&self, window: Duration) -> bool {
        self.loaded_at.elapsed() < window
    }
}

pub struct CachedDataStore<S = JsonFileSource> {
    source: S,
    freshness: Duration,
    entry: RwLock<Option<CacheEntry>>,
}

impl CachedDataStore<JsonFileSource> {
    /// Store backed by a JSON file, with the default freshness window.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(JsonFileSource::new(path))
    }
}

impl<S: DatasetSource> CachedDataStore<S> {
    pub fn new(source: S) -> Self {
        Self::with_freshness(source, DEFAULT_FRESHNESS)
    }

    pub fn with_freshness(source: S, freshness: Duration) -> Self {
        Self {
            source,
            freshness,
            entry: RwLock::new(None),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn freshness(&self) -> Duration {
        self.freshness
    }

    /// Whether a dataset is cached and still inside the freshness window.
    pub async fn is_warm(&self) -> bool {
        let entry = self.entry.read().await;
        entry.as_ref().is_some_and(|e| e.is_fresh(self.freshness))
    }

    async fn load(&self) -> std::result::Result<Dataset, LoadError> {
        tracing::info!("Loading fresh data from {}", self.source.describe());
        let result = self.source.load().await;
        match &result {
            Ok(_) => tracing::info!("Data loaded from {}", self.source.describe()),
            Err(err @ LoadError::Missing(_)) => {
                tracing::error!("{}", err);
                tracing::error!("Run the data processing step to produce it");
            }
            Err(err) => tracing::error!("{}", err),
        }
        result
    }

    /// The current dataset.
    /// A fresh cached dataset is returned without I/O; otherwise the source is read again.
    /// A failed load yields the empty dataset and is not cached, so the next call retries.
    pub async fn dataset(&self) -> Arc<Dataset> {
        {
            let entry = self.entry.read().await;
            if let Some(data) = self.cached(&entry) {
                return data;
            }
        }

        let mut entry = self.entry.write().await;
        // Another caller may have reloaded while we waited for the write lock
        if let Some(data) = self.cached(&entry) {
            return data;
        }

        match self.load().await {
            Ok(data) => {
                let fresh = CacheEntry::new(data);
                let data = fresh.data.clone();
                *entry = Some(fresh);
                data
            }
            Err(_) => Arc::new(Dataset::empty()),
        }
    }

    fn cached(&self, entry: &Option<CacheEntry>) -> Option<Arc<Dataset>> {
        let cached = entry.as_ref().filter(|e| e.is_fresh(self.freshness))?;
        tracing::debug!("Returning cached data");
        Some(cached.data.clone())
    }

    /// Read the source now regardless of freshness.
    /// On failure the current entry, if any, is kept.
    pub async fn refresh(&self) -> Result<()> {
        let mut entry = self.entry.write().await;
        let data = self.load().await?;
        *entry = Some(CacheEntry::new(data));
        Ok(())
    }

    pub async fn yearly_stats(&self) -> Value {
        self.dataset().await.yearly_stats()
    }

    pub async fn major_events(&self) -> Value {
        self.dataset().await.major_events()
    }

    pub async fn summary(&self) -> Value {
        self.dataset().await.summary()
    }

    /// The `limit` most popular words. A limit of zero yields empty sequences.
    pub async fn top_words(&self, limit: usize) -> TopWords {
        self.dataset().await.top_words(limit)
    }
}

impl<S: DatasetSource + 'static> CachedDataStore<S> {
    /// Reload the dataset every `period` in the background, so that requests rarely pay for a reload.
    pub fn spawn_refresh(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                if let Err(err) = self.refresh().await {
                    tracing::warn!("Background refresh failed, keeping current data: {}", err);
                }
            }
        })
    }
}
