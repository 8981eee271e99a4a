use crate::config::NormalizeConfig;
use crate::core::errors::Result;
use crate::normalize::Normalized;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;

/// Cache key for normalized tables
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct TableKey {
    /// SHA-256 of the raw input bytes
    pub content_hash: String,
    /// Fingerprint of the normalization settings
    pub settings: String,
}

impl TableKey {
    pub fn new(bytes: &[u8], config: &NormalizeConfig) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self {
            content_hash: format!("{:x}", hasher.finalize()),
            settings: config.fingerprint(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: usize,
    pub misses: usize,
}

/// In-process memo of normalized tables keyed by input content and
/// normalization settings.
///
/// Normalization is deterministic, so a hit is always equivalent to
/// re-running it.
#[derive(Debug, Default)]
pub struct TableCache {
    entries: HashMap<TableKey, Arc<Normalized>>,
    hits: usize,
    misses: usize,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &TableKey) -> Option<Arc<Normalized>> {
        self.entries.get(key).cloned()
    }

    /// Return the cached table for `key`, or build it with `produce` and
    /// remember it. Errors from `produce` are returned and nothing is
    /// cached.
    pub fn get_or_try_insert<F>(&mut self, key: TableKey, produce: F) -> Result<Arc<Normalized>>
    where
        F: FnOnce() -> Result<Normalized>,
    {
        if let Some(hit) = self.entries.get(&key) {
            self.hits += 1;
            log::info!("Normalized table cache hit ({})", short_hash(&key));
            return Ok(Arc::clone(hit));
        }

        self.misses += 1;
        log::info!("Normalized table cache miss ({})", short_hash(&key));
        let normalized = Arc::new(produce()?);
        self.entries.insert(key, Arc::clone(&normalized));
        Ok(normalized)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }

    pub fn clear(&mut self) {
        log::debug!("Clearing {} cached tables", self.entries.len());
        self.entries.clear();
    }
}

fn short_hash(key: &TableKey) -> &str {
    key.content_hash.get(..12).unwrap_or(&key.content_hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RowPolicy;
    use crate::core::errors::Error;
    use crate::core::Table;
    use crate::normalize::DataQualityReport;

    fn empty_normalized() -> Normalized {
        Normalized {
            table: Table::default(),
            report: DataQualityReport::default(),
        }
    }

    #[test]
    fn test_key_depends_on_content_and_settings() {
        let strict = NormalizeConfig::default();
        let lenient = NormalizeConfig::default().with_policy(RowPolicy::Lenient);

        assert_eq!(TableKey::new(b"a,b\n", &strict), TableKey::new(b"a,b\n", &strict));
        assert_ne!(TableKey::new(b"a,b\n", &strict), TableKey::new(b"a,c\n", &strict));
        assert_ne!(TableKey::new(b"a,b\n", &strict), TableKey::new(b"a,b\n", &lenient));
    }

    #[test]
    fn test_hit_skips_producer() {
        let mut cache = TableCache::new();
        let key = TableKey::new(b"x", &NormalizeConfig::default());

        cache
            .get_or_try_insert(key.clone(), || Ok(empty_normalized()))
            .unwrap();
        cache
            .get_or_try_insert(key, || panic!("producer must not run on a hit"))
            .unwrap();

        assert_eq!(
            cache.stats(),
            CacheStats {
                entries: 1,
                hits: 1,
                misses: 1
            }
        );
    }

    #[test]
    fn test_errors_are_not_cached() {
        let mut cache = TableCache::new();
        let key = TableKey::new(b"", &NormalizeConfig::default());

        let result = cache.get_or_try_insert(key.clone(), || Err(Error::missing_header("empty")));
        assert!(result.is_err());
        assert!(cache.get(&key).is_none());
        assert_eq!(cache.stats().entries, 0);
    }

    #[test]
    fn test_clear() {
        let mut cache = TableCache::new();
        let key = TableKey::new(b"x", &NormalizeConfig::default());
        cache.get_or_try_insert(key, || Ok(empty_normalized())).unwrap();
        cache.clear();
        assert_eq!(cache.stats().entries, 0);
    }
}
