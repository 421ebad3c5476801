/// In-memory cache with TTL expiry and insertion-order eviction
///
/// Keys are strings (request cache keys); values are generic. Expiry is lazy:
/// a stale entry is dropped the moment a read touches it. The optional sweeper
/// only reclaims memory for keys nobody reads again.
use super::config::CacheConfig;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::logger::{self, LogTag};

struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
    /// Insertion sequence, the eviction order
    seq: u64,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) > ttl
    }
}

/// Cache metrics for monitoring
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub invalidations: u64,
}

impl CacheMetrics {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct CacheState<V> {
    entries: HashMap<String, CacheEntry<V>>,
    /// seq -> key, oldest first
    order: BTreeMap<u64, String>,
    next_seq: u64,
    metrics: CacheMetrics,
}

impl<V> CacheState<V> {
    fn remove(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.order.remove(&entry.seq);
        Some(entry)
    }

    fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.order.pop_first()?;
        self.entries.remove(&key);
        self.metrics.evictions += 1;
        Some(key)
    }
}

/// Bounded request cache
///
/// One instance is created by the application context and shared as
/// `Arc<CacheStore<V>>`; every operation is a short synchronous critical section.
pub struct CacheStore<V: Clone> {
    config: CacheConfig,
    state: Mutex<CacheState<V>>,
}

impl<V: Clone> CacheStore<V> {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                order: BTreeMap::new(),
                next_seq: 0,
                metrics: CacheMetrics::default(),
            }),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Get a value if present and `now - stored_at <= ttl`
    pub fn get(&self, key: &str) -> Option<V> {
        let mut state = self.state.lock();

        if !self.config.enabled {
            state.metrics.misses += 1;
            return None;
        }

        let now = Instant::now();
        let expired = match state.entries.get(key) {
            Some(entry) if !entry.is_expired(self.config.ttl, now) => {
                let value = entry.value.clone();
                state.metrics.hits += 1;
                return Some(value);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            state.remove(key);
            state.metrics.expirations += 1;
        }
        state.metrics.misses += 1;
        None
    }

    /// Store a value, evicting the oldest-inserted entry when full
    ///
    /// Overwriting a key refreshes its timestamp and makes it the newest entry.
    pub fn set(&self, key: impl Into<String>, value: V) {
        if !self.config.enabled {
            return;
        }

        let key = key.into();
        let mut state = self.state.lock();

        if state.remove(&key).is_none() && state.entries.len() >= self.config.capacity {
            if let Some(evicted) = state.evict_oldest() {
                logger::debug(LogTag::Cache, &format!("Evicted oldest entry '{}'", evicted));
            }
        }

        let seq = state.next_seq;
        state.next_seq += 1;
        state.order.insert(seq, key.clone());
        state.entries.insert(
            key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
                seq,
            },
        );
        state.metrics.inserts += 1;
    }

    /// Remove entries whose key starts with `prefix`, or everything for `None`
    ///
    /// Returns the number of removed entries.
    pub fn invalidate(&self, prefix: Option<&str>) -> usize {
        let mut state = self.state.lock();

        let removed = match prefix {
            None => {
                let count = state.entries.len();
                state.entries.clear();
                state.order.clear();
                count
            }
            Some(prefix) => {
                let doomed: Vec<String> = state
                    .entries
                    .keys()
                    .filter(|k| k.starts_with(prefix))
                    .cloned()
                    .collect();
                for key in &doomed {
                    state.remove(key);
                }
                doomed.len()
            }
        };

        state.metrics.invalidations += removed as u64;
        removed
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let mut state = self.state.lock();
        let now = Instant::now();
        let ttl = self.config.ttl;

        let expired: Vec<String> = state
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(ttl, now))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            state.remove(key);
        }

        state.metrics.expirations += expired.len() as u64;
        expired.len()
    }

    /// Keys from oldest to newest insertion
    pub fn keys(&self) -> Vec<String> {
        self.state.lock().order.values().cloned().collect()
    }

    pub fn metrics(&self) -> CacheMetrics {
        self.state.lock().metrics.clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone + Send + 'static> CacheStore<V> {
    /// Spawn the periodic sweep task
    ///
    /// Holds only a weak reference, so the task ends when the cache is dropped
    /// or when `shutdown` is notified.
    pub fn spawn_sweeper(
        self: &Arc<Self>,
        interval: Duration,
        shutdown: Arc<Notify>,
    ) -> JoinHandle<()> {
        let cache: Weak<Self> = Arc::downgrade(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = shutdown.notified() => break,
                    _ = ticker.tick() => {
                        let Some(cache) = cache.upgrade() else { break };
                        let purged = cache.purge_expired();
                        if purged > 0 {
                            logger::debug(
                                LogTag::Cache,
                                &format!("Sweep removed {} expired entries ({} left)", purged, cache.len()),
                            );
                        }
                    }
                }
            }

            logger::debug(LogTag::Cache, "Cache sweeper stopped");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(ttl_ms: u64, capacity: usize) -> CacheStore<String> {
        CacheStore::new(CacheConfig::custom(ttl_ms, capacity))
    }

    #[test]
    fn test_basic_operations() {
        let cache = store(60_000, 100);

        cache.set("key1", "value1".to_string());
        assert_eq!(cache.get("key1"), Some("value1".to_string()));
        assert_eq!(cache.get("nonexistent"), None);

        let metrics = cache.metrics();
        assert_eq!(metrics.hits, 1);
        assert_eq!(metrics.misses, 1);
        assert_eq!(metrics.inserts, 1);
        assert!((metrics.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ttl_expiration() {
        let cache = store(1_000, 100);

        cache.set("key", "value".to_string());
        tokio::time::advance(Duration::from_millis(1_000)).await;
        assert_eq!(cache.get("key"), Some("value".to_string()));

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(cache.get("key"), None);
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.metrics().expirations, 1);
    }

    #[test]
    fn test_insertion_order_eviction() {
        let cache = store(60_000, 2);

        cache.set("key1", "value1".to_string());
        cache.set("key2", "value2".to_string());
        // Reading key1 must not protect it: eviction is by insertion, not use
        assert!(cache.get("key1").is_some());
        cache.set("key3", "value3".to_string());

        assert_eq!(cache.get("key1"), None);
        assert_eq!(cache.get("key2"), Some("value2".to_string()));
        assert_eq!(cache.get("key3"), Some("value3".to_string()));
        assert_eq!(cache.metrics().evictions, 1);
    }

    #[test]
    fn test_size_never_exceeds_capacity() {
        let cache = store(60_000, 3);

        for i in 0..10 {
            cache.set(format!("k{}", i), i.to_string());
            assert!(cache.len() <= 3);
        }
        assert_eq!(cache.keys(), vec!["k7", "k8", "k9"]);
        assert_eq!(cache.metrics().evictions, 7);
    }

    #[test]
    fn test_overwrite_moves_key_to_newest() {
        let cache = store(60_000, 2);

        cache.set("a", "1".to_string());
        cache.set("b", "2".to_string());
        cache.set("a", "3".to_string());
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.metrics().evictions, 0);

        cache.set("c", "4".to_string());
        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.get("a"), Some("3".to_string()));
    }

    #[test]
    fn test_invalidate_prefix_and_all() {
        let cache = store(60_000, 10);

        cache.set("/api/enterprises?page=1", "p1".to_string());
        cache.set("/api/enterprises?page=2", "p2".to_string());
        cache.set("/api/imports?page=1", "i1".to_string());

        assert_eq!(cache.invalidate(Some("/api/enterprises")), 2);
        assert_eq!(cache.keys(), vec!["/api/imports?page=1"]);

        assert_eq!(cache.invalidate(None), 1);
        assert!(cache.is_empty());
        assert_eq!(cache.metrics().invalidations, 3);
    }

    #[test]
    fn test_disabled_cache_never_stores() {
        let cache: CacheStore<String> = CacheStore::new(CacheConfig::disabled());

        cache.set("key", "value".to_string());
        assert!(cache.is_empty());
        assert_eq!(cache.get("key"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired() {
        let cache = store(100, 10);

        cache.set("old", "1".to_string());
        tokio::time::advance(Duration::from_millis(80)).await;
        cache.set("new", "2".to_string());
        tokio::time::advance(Duration::from_millis(40)).await;

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.keys(), vec!["new"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_reclaims_and_stops() {
        let cache = Arc::new(store(50, 10));
        let shutdown = Arc::new(Notify::new());
        let handle = cache.spawn_sweeper(Duration::from_millis(100), shutdown.clone());

        cache.set("key", "value".to_string());
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(cache.is_empty());

        shutdown.notify_one();
        handle.await.expect("sweeper task should finish cleanly");
    }
}
