//! In-memory result cache for extraction output.
//!
//! Keyed by `(requester, content fingerprint)` so repeated extraction of
//! the same document is idempotent and cheap, without one requester's
//! cached extraction leaking into another's visibility. TTL-based expiry
//! is evaluated lazily on `get`; a bounded full-table sweep runs
//! opportunistically from `get`/`put` when more than the sweep interval
//! has elapsed, so memory does not grow unboundedly under sustained
//! traffic. No durability across restarts.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Default minimum gap between opportunistic full-table sweeps.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(300);

/// Default TTL for cached extraction results (1 hour).
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

struct CacheEntry<T> {
    value: T,
    created_at: Instant,
    expires_at: Instant,
}

impl<T: Clone> CacheEntry<T> {
    fn new(value: T, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            value,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

struct CacheInner<T> {
    entries: HashMap<String, CacheEntry<T>>,
    last_sweep: Instant,
}

/// Snapshot of cache occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub oldest_entry_age_ms: u64,
}

/// Per-requester, content-addressed result cache.
///
/// Last write wins per key; no merge semantics. A single exclusive lock
/// guards the mapping - every operation completes in microseconds and
/// throughput here is never the bottleneck, OCR latency is. The cache
/// never raises: a poisoned lock degrades to a forced miss / dropped
/// write rather than blocking the request.
pub struct ResultCache<T> {
    inner: Mutex<CacheInner<T>>,
    ttl: Duration,
    sweep_interval: Duration,
}

impl<T: Clone> ResultCache<T> {
    /// Create a cache with the default 1-hour TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Create a cache with a custom TTL and the default sweep interval.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::with_ttl_and_sweep(ttl, SWEEP_INTERVAL)
    }

    /// Create a cache with a custom TTL and sweep interval.
    pub fn with_ttl_and_sweep(ttl: Duration, sweep_interval: Duration) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                last_sweep: Instant::now(),
            }),
            ttl,
            sweep_interval,
        }
    }

    fn key(requester_id: &str, fingerprint: &str) -> String {
        format!("{}:{}", requester_id, fingerprint)
    }

    /// Look up a cached result. An entry past its expiry is deleted and
    /// reported absent.
    pub fn get(&self, fingerprint: &str, requester_id: &str) -> Option<T> {
        let key = Self::key(requester_id, fingerprint);
        let mut inner = self.inner.lock().ok()?;
        self.maybe_sweep(&mut inner);

        match inner.entries.get(&key) {
            Some(entry) if !entry.is_expired() => Some(entry.value.clone()),
            Some(_) => {
                inner.entries.remove(&key);
                None
            }
            None => None,
        }
    }

    /// Store a result under the cache TTL. Overwrites any previous
    /// entry for the same key.
    pub fn put(&self, fingerprint: &str, requester_id: &str, value: T) {
        self.put_with_ttl(fingerprint, requester_id, value, self.ttl)
    }

    /// Store a result with an explicit TTL.
    pub fn put_with_ttl(&self, fingerprint: &str, requester_id: &str, value: T, ttl: Duration) {
        if let Ok(mut inner) = self.inner.lock() {
            self.maybe_sweep(&mut inner);
            inner
                .entries
                .insert(Self::key(requester_id, fingerprint), CacheEntry::new(value, ttl));
        }
    }

    /// Drop a cached result, if present.
    pub fn invalidate(&self, fingerprint: &str, requester_id: &str) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.entries.remove(&Self::key(requester_id, fingerprint));
        }
    }

    /// Current size and age of the oldest entry.
    pub fn stats(&self) -> CacheStats {
        match self.inner.lock() {
            Ok(inner) => {
                let oldest = inner
                    .entries
                    .values()
                    .map(|e| e.created_at.elapsed().as_millis() as u64)
                    .max()
                    .unwrap_or(0);
                CacheStats {
                    size: inner.entries.len(),
                    oldest_entry_age_ms: oldest,
                }
            }
            Err(_) => CacheStats {
                size: 0,
                oldest_entry_age_ms: 0,
            },
        }
    }

    /// Full-table sweep of expired entries, at most once per sweep
    /// interval. Cost is amortized across `get`/`put` calls; this is the
    /// only path by which expired keys that are never read again leave
    /// memory.
    fn maybe_sweep(&self, inner: &mut CacheInner<T>) {
        if inner.last_sweep.elapsed() < self.sweep_interval {
            return;
        }
        let before = inner.entries.len();
        inner.entries.retain(|_, entry| !entry.is_expired());
        inner.last_sweep = Instant::now();
        let evicted = before - inner.entries.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = inner.entries.len(), "cache sweep");
        }
    }
}

impl<T: Clone> Default for ResultCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_before_ttl() {
        let cache: ResultCache<String> = ResultCache::new();
        cache.put("fp1", "user1", "result".to_string());
        assert_eq!(cache.get("fp1", "user1"), Some("result".to_string()));
    }

    #[test]
    fn test_expired_entry_is_absent_and_deleted() {
        let cache: ResultCache<String> = ResultCache::with_ttl(Duration::from_millis(0));
        cache.put("fp1", "user1", "result".to_string());
        assert_eq!(cache.get("fp1", "user1"), None);
        // Lazy eviction removed the entry.
        assert_eq!(cache.stats().size, 0);
    }

    #[test]
    fn test_requester_isolation() {
        let cache: ResultCache<String> = ResultCache::new();
        cache.put("fp1", "userA", "result".to_string());
        assert_eq!(cache.get("fp1", "userB"), None);
        assert_eq!(cache.get("fp1", "userA"), Some("result".to_string()));
    }

    #[test]
    fn test_last_write_wins() {
        let cache: ResultCache<u32> = ResultCache::new();
        cache.put("fp1", "user1", 1);
        cache.put("fp1", "user1", 2);
        assert_eq!(cache.get("fp1", "user1"), Some(2));
        assert_eq!(cache.stats().size, 1);
    }

    #[test]
    fn test_invalidate() {
        let cache: ResultCache<u32> = ResultCache::new();
        cache.put("fp1", "user1", 1);
        cache.invalidate("fp1", "user1");
        assert_eq!(cache.get("fp1", "user1"), None);
    }

    #[test]
    fn test_sweep_evicts_expired_keys_never_read_again() {
        let cache: ResultCache<u32> =
            ResultCache::with_ttl_and_sweep(Duration::from_millis(0), Duration::from_millis(0));
        cache.put("fp1", "user1", 1);
        cache.put("fp2", "user1", 2);
        // The next write sweeps; the expired keys leave memory without
        // ever being looked up.
        cache.put("fp3", "user1", 3);
        assert_eq!(cache.stats().size, 1);
    }

    #[test]
    fn test_sweep_waits_for_its_interval() {
        let cache: ResultCache<u32> =
            ResultCache::with_ttl_and_sweep(Duration::from_millis(0), Duration::from_secs(3600));
        cache.put("fp1", "user1", 1);
        cache.put("fp2", "user1", 2);
        cache.put("fp3", "user1", 3);
        // Expired entries linger until the interval elapses.
        assert_eq!(cache.stats().size, 3);
    }

    #[test]
    fn test_stats() {
        let cache: ResultCache<u32> = ResultCache::new();
        assert_eq!(cache.stats().size, 0);
        cache.put("fp1", "user1", 1);
        cache.put("fp2", "user1", 2);
        let stats = cache.stats();
        assert_eq!(stats.size, 2);
    }
}
