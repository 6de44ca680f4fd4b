//! Generic TTL cache helper utilities.
//! These helpers wrap the common pattern of (Instant, Value) stored in a HashMap behind an `RwLock`.
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

pub type TtlMap<K, V> = RwLock<HashMap<K, (Instant, V)>>;

static HITS: AtomicU64 = AtomicU64::new(0);
static MISSES: AtomicU64 = AtomicU64::new(0);

fn record(hit: bool) {
    let counter = if hit { &HITS } else { &MISSES };
    counter.fetch_add(1, Ordering::Relaxed);
}

/// Expose counters for diagnostics (hit, miss)
pub fn cache_stats() -> (u64, u64) {
    (HITS.load(Ordering::Relaxed), MISSES.load(Ordering::Relaxed))
}

/// Attempt to fetch a cloned value from a `(Instant, V)` TTL cache.
/// Returns `None` if the key is absent or the entry is expired. Expired entries are eagerly removed.
pub async fn get_with_ttl<K, V>(map: &TtlMap<K, V>, key: &K, ttl: Duration) -> Option<V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // Fast path: read lock
    if let Some((ts, val)) = map.read().await.get(key).cloned() {
        if ts.elapsed() < ttl {
            record(true);
            return Some(val);
        }
    } else {
        record(false);
        return None;
    }
    // Entry expired: acquire write lock to remove (avoid holding write unless needed)
    let mut write = map.write().await;
    if let Some((ts, _)) = write.get(key)
        && ts.elapsed() >= ttl
    {
        write.remove(key);
    }
    record(false);
    None
}

/// Insert / overwrite a value in the TTL cache with current timestamp.
pub async fn insert<K, V>(map: &TtlMap<K, V>, key: K, value: V)
where
    K: Eq + Hash,
{
    map.write().await.insert(key, (Instant::now(), value));
}

pub async fn invalidate<K, V>(map: &TtlMap<K, V>, key: &K)
where
    K: Eq + Hash,
{
    map.write().await.remove(key);
}
