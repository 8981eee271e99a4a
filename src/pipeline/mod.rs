//! Ingestion → Normalizer → Filter Engine → Aggregator, as one explicit
//! pipeline.
//!
//! Normalization happens once per distinct input (memoized in a
//! [`TableCache`]); every interaction after that only filters and
//! aggregates the cached base table.

pub mod dashboard;
pub mod stage;

pub use dashboard::{aggregate_views, build_dashboard, DashboardView, FilterControls, ViewOptions};

use crate::cache::{CacheStats, TableCache, TableKey};
use crate::config::DashConfig;
use crate::core::errors::Result;
use crate::core::Table;
use crate::filter::{self, FilterSpec};
use crate::ingest::{self, RawTable};
use crate::normalize::{self, Normalized};
use stage::{FallibleStage, PureStage};
use std::path::Path;
use std::sync::Arc;

/// Run ingestion and normalization over raw bytes, without caching.
///
/// # Errors
///
/// Returns the ingestion error when the bytes are not a readable CSV with
/// a header row.
pub fn ingest_and_normalize(
    bytes: &[u8],
    source_name: &str,
    config: &DashConfig,
) -> Result<Normalized> {
    let ingest_stage = FallibleStage::new("Ingest", |input: &[u8]| {
        ingest::parse_bytes(input, source_name)
    });
    let normalize_stage = PureStage::new("Normalize", |raw: RawTable| {
        normalize::normalize(&raw, &config.normalize)
    });

    let raw = ingest_stage.run(bytes)?;
    Ok(normalize_stage.run(raw))
}

/// A long-lived dashboard session: configuration plus the normalized table
/// memo.
#[derive(Debug, Default)]
pub struct Session {
    config: DashConfig,
    cache: TableCache,
}

impl Session {
    pub fn new(config: DashConfig) -> Self {
        Self {
            config,
            cache: TableCache::new(),
        }
    }

    pub fn config(&self) -> &DashConfig {
        &self.config
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions::from(&self.config.aggregate)
    }

    /// Normalized table for in-memory input, reusing a cached result for
    /// identical bytes and settings.
    pub fn load_bytes(&mut self, bytes: &[u8], source_name: &str) -> Result<Arc<Normalized>> {
        let key = TableKey::new(bytes, &self.config.normalize);
        let config = &self.config;
        self.cache
            .get_or_try_insert(key, || ingest_and_normalize(bytes, source_name, config))
    }

    /// Normalized table for a file on disk.
    ///
    /// # Errors
    ///
    /// Unreadable files and malformed CSV are fatal.
    pub fn load(&mut self, path: &Path) -> Result<Arc<Normalized>> {
        let bytes = crate::io::read_bytes(path)?;
        self.load_bytes(&bytes, &path.display().to_string())
    }

    /// Filtered view of the normalized table for `path`.
    pub fn filtered(&mut self, path: &Path, spec: &FilterSpec) -> Result<Table> {
        let normalized = self.load(path)?;
        Ok(filter::apply(&normalized.table, spec))
    }

    /// Every dashboard view for `path` under `spec`.
    pub fn dashboard(&mut self, path: &Path, spec: &FilterSpec) -> Result<DashboardView> {
        let normalized = self.load(path)?;
        Ok(build_dashboard(&normalized.table, spec, self.view_options()))
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
