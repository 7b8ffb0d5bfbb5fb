//! Memoization of search results.
//!
//! The search engine talks to a [`SearchCache`] only through `get`, `set`
//! and `invalidate`, so a [`NoopSearchCache`] can stand in wherever results
//! must be recomputed every time.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::catalog::model::{IngredientId, RecipeId};
use crate::matching::MatchResult;
use crate::search::filters::SearchFilters;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Everything a search result depends on, apart from collection contents.
/// Contents changing under the same ids must be signalled through
/// [`SearchCache::invalidate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchKey {
    pub recipe_ids: Vec<RecipeId>,
    pub filters: SearchFilters,
    /// Sorted and deduplicated.
    pub available: Vec<IngredientId>,
    pub month: u32,
}

pub trait SearchCache: Send + Sync {
    fn get(&self, key: &SearchKey) -> Option<Vec<MatchResult>>;
    fn set(&self, key: SearchKey, results: Vec<MatchResult>);
    fn invalidate(&self);
}

/// Never stores anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSearchCache;

impl SearchCache for NoopSearchCache {
    fn get(&self, _key: &SearchKey) -> Option<Vec<MatchResult>> {
        None
    }

    fn set(&self, _key: SearchKey, _results: Vec<MatchResult>) {}

    fn invalidate(&self) {}
}

#[derive(Debug)]
struct CacheEntry {
    stored_at: Instant,
    results: Vec<MatchResult>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// In-memory cache whose entries expire `ttl` after they were stored.
#[derive(Debug)]
pub struct TtlSearchCache {
    ttl: Duration,
    entries: Mutex<HashMap<SearchKey, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for TtlSearchCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

impl TtlSearchCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // A panic while holding the lock cannot leave a half-written entry, so a
    // poisoned map is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<SearchKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.lock().len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Drops expired entries, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        purge(&mut self.lock(), self.ttl)
    }
}

fn purge(entries: &mut HashMap<SearchKey, CacheEntry>, ttl: Duration) -> usize {
    let before = entries.len();
    entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
    before - entries.len()
}

impl SearchCache for TtlSearchCache {
    fn get(&self, key: &SearchKey) -> Option<Vec<MatchResult>> {
        let mut entries = self.lock();
        let fresh = match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.results.clone()),
            Some(_) => {
                entries.remove(key);
                debug!("search cache entry expired");
                None
            }
            None => None,
        };
        match fresh {
            Some(results) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(results = results.len(), "search cache hit");
                Some(results)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    fn set(&self, key: SearchKey, results: Vec<MatchResult>) {
        let mut entries = self.lock();
        let purged = purge(&mut entries, self.ttl);
        if purged > 0 {
            debug!(purged, "expired search cache entries dropped");
        }
        entries.insert(
            key,
            CacheEntry {
                stored_at: Instant::now(),
                results,
            },
        );
    }

    fn invalidate(&self) {
        let mut entries = self.lock();
        let dropped = entries.len();
        entries.clear();
        debug!(dropped, "search cache invalidated");
    }
}
