//! Request-deduplicating cache for reference data (wilayas and the like).
//!
//! Owned by the application shell and handed to whoever needs it. Concurrent
//! lookups of the same key share a single in-flight load. Successful loads
//! stay until invalidated; failed loads are not remembered, so the next
//! caller tries again.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use tracing::debug;

pub struct ReferenceCache<T> {
    slots: Mutex<HashMap<String, Arc<OnceCell<Arc<T>>>>>,
    loads: AtomicUsize,
}

impl<T> ReferenceCache<T> {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            loads: AtomicUsize::new(0),
        }
    }

    /// Return the cached value for `key`, running `loader` if nobody has
    /// loaded it yet. Callers arriving while a load is running wait for it.
    pub async fn get_or_load<F, Fut, E>(&self, key: &str, loader: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let cell = {
            let mut slots = self.slots.lock().await;
            slots
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        if let Some(value) = cell.get() {
            debug!("Reference cache hit: {}", key);
            return Ok(value.clone());
        }

        let value = cell
            .get_or_try_init(|| async move {
                debug!("Reference cache load: {}", key);
                self.loads.fetch_add(1, Ordering::Relaxed);
                loader().await.map(Arc::new)
            })
            .await?;

        Ok(value.clone())
    }

    /// Drop `key` so the next lookup reloads it.
    pub async fn invalidate(&self, key: &str) {
        self.slots.lock().await.remove(key);
    }

    pub async fn clear(&self) {
        self.slots.lock().await.clear();
    }

    /// Whether `key` currently holds a loaded value.
    pub async fn contains(&self, key: &str) -> bool {
        self.slots
            .lock()
            .await
            .get(key)
            .map(|cell| cell.initialized())
            .unwrap_or(false)
    }

    /// Number of times a loader actually ran.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }
}

impl<T> Default for ReferenceCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_loads_once() {
        let cache: ReferenceCache<Vec<&str>> = ReferenceCache::new();

        let first = cache
            .get_or_load("wilayas", || async { Ok::<_, String>(vec!["Alger", "Oran"]) })
            .await
            .unwrap();
        let second = cache
            .get_or_load("wilayas", || async { Ok::<_, String>(vec!["never used"]) })
            .await
            .unwrap();

        assert_eq!(*first, vec!["Alger", "Oran"]);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.load_count(), 1);
        assert!(cache.contains("wilayas").await);
    }

    #[tokio::test]
    async fn test_concurrent_lookups_share_one_load() {
        let cache: Arc<ReferenceCache<u32>> = Arc::new(ReferenceCache::new());

        let lookups = (0..8).map(|_| {
            let cache = cache.clone();
            async move {
                cache
                    .get_or_load("slow", || async {
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        Ok::<_, String>(48)
                    })
                    .await
            }
        });
        let results = futures::future::join_all(lookups).await;

        assert!(results.iter().all(|r| r.as_deref() == Ok(&48)));
        assert_eq!(cache.load_count(), 1);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let cache: ReferenceCache<u32> = ReferenceCache::new();

        let failed = cache
            .get_or_load("k", || async { Err::<u32, _>("backend down") })
            .await;
        assert_eq!(failed.unwrap_err(), "backend down");
        assert!(!cache.contains("k").await);

        let loaded = cache
            .get_or_load("k", || async { Ok::<_, &str>(7) })
            .await
            .unwrap();
        assert_eq!(*loaded, 7);
        assert_eq!(cache.load_count(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_reload() {
        let cache: ReferenceCache<u32> = ReferenceCache::new();
        cache.get_or_load("k", || async { Ok::<_, ()>(1) }).await.unwrap();
        cache.invalidate("k").await;
        let reloaded = cache.get_or_load("k", || async { Ok::<_, ()>(2) }).await.unwrap();
        assert_eq!(*reloaded, 2);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let cache: ReferenceCache<&str> = ReferenceCache::new();
        cache.get_or_load("a", || async { Ok::<_, ()>("A") }).await.unwrap();
        cache.get_or_load("b", || async { Ok::<_, ()>("B") }).await.unwrap();
        assert_eq!(cache.load_count(), 2);

        cache.clear().await;
        assert!(!cache.contains("a").await);
    }
}
