//! Memoization of traced paths, keyed by ordered node pair.

use crate::error::{GraphError, Result};
use crate::graph::{Graph, PairKey, Path};
use std::collections::HashMap;
use std::fmt::Debug;

/// Path cache plus the buffer reservation hint derived from it.
#[derive(Debug, Clone)]
pub(crate) struct PathCache {
    enabled: bool,
    entries: HashMap<PairKey, Path>,
    average_path_len: Option<usize>,
}

impl PathCache {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: HashMap::new(),
            average_path_len: None,
        }
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.clear();
    }

    pub(crate) fn clear(&mut self) {
        if !self.entries.is_empty() {
            tracing::debug!("clearing {} cached paths", self.entries.len());
        }
        self.entries.clear();
    }

    pub(crate) fn get(&self, key: PairKey) -> Option<&Path> {
        if !self.enabled {
            return None;
        }
        self.entries.get(&key)
    }

    /// Store a path; a no-op while caching is disabled.
    pub(crate) fn insert(&mut self, key: PairKey, path: Path) {
        if self.enabled {
            self.entries.insert(key, path);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Initial capacity for uncached searches, once `optimize` has run.
    pub(crate) fn reservation_hint(&self) -> Option<usize> {
        self.average_path_len
    }

    /// Recompute the average stored path length (rounded up).
    pub(crate) fn optimize(&mut self) -> Result<usize> {
        if !self.enabled || self.entries.is_empty() {
            return Err(GraphError::CacheOptimizationUnavailable);
        }
        let total: usize = self.entries.values().map(Path::len).sum();
        let average = total.div_ceil(self.entries.len());
        self.average_path_len = Some(average);
        Ok(average)
    }
}

impl<K, E> Graph<K, E>
where
    K: Ord + Clone + Debug,
{
    /// Drop every cached path.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Enable or disable path caching. Always clears the cache.
    pub fn set_cache_enabled(&mut self, enabled: bool) {
        self.cache.set_enabled(enabled);
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_enabled()
    }

    /// Number of paths currently memoized.
    pub fn cached_paths(&self) -> usize {
        self.cache.len()
    }

    /// Use the average cached path length as the initial buffer reservation
    /// for later uncached traces. Returns the computed average.
    ///
    /// Fails when caching is disabled or nothing has been cached yet.
    pub fn optimize_trace(&mut self) -> Result<usize> {
        self.cache.optimize()
    }
}
