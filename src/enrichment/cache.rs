//! Memoized enrichment content keyed by word id

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use tokio::sync::Notify;

/// Shared handle to a word -> payload map.
///
/// Clones point at the same map, so background fetches can populate it while
/// the store keeps reading. Writes overwrite; the last write wins. There is no
/// expiry.
pub struct ContentCache<T> {
    entries: Arc<RwLock<HashMap<String, T>>>,
    in_flight: Arc<Mutex<HashSet<String>>>,
    fetch_done: Arc<Notify>,
}

impl<T> Clone for ContentCache<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            in_flight: Arc::clone(&self.in_flight),
            fetch_done: Arc::clone(&self.fetch_done),
        }
    }
}

impl<T: Clone> Default for ContentCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> ContentCache<T> {
    pub fn new() -> Self {
        Self::from_map(HashMap::new())
    }

    pub fn from_map(entries: HashMap<String, T>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(entries)),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            fetch_done: Arc::new(Notify::new()),
        }
    }

    // A panic while holding the lock leaves the map itself intact
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, T>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, T>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }

    fn pending(&self) -> MutexGuard<'_, HashSet<String>> {
        self.in_flight.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.read().get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.read().contains_key(id)
    }

    pub fn put(&self, id: &str, payload: T) {
        self.write().insert(id.to_string(), payload);
    }

    pub fn remove(&self, id: &str) -> Option<T> {
        self.write().remove(id)
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Copy of the current contents, for persistence
    pub fn snapshot(&self) -> HashMap<String, T> {
        self.read().clone()
    }

    /// Mark a fetch for `id` as started. Returns false if one is already running.
    pub fn begin_fetch(&self, id: &str) -> bool {
        self.pending().insert(id.to_string())
    }

    pub fn finish_fetch(&self, id: &str) {
        self.pending().remove(id);
        self.fetch_done.notify_waiters();
    }

    pub fn is_fetching(&self, id: &str) -> bool {
        self.pending().contains(id)
    }

    /// Wait until no fetch for `id` is running, or `limit` passes.
    /// Returns false on timeout.
    pub async fn wait_for_fetch(&self, id: &str, limit: Duration) -> bool {
        let wait = async {
            loop {
                let notified = self.fetch_done.notified();
                tokio::pin!(notified);
                // Register before checking so a finish in between is not missed
                notified.as_mut().enable();
                if !self.is_fetching(id) {
                    return;
                }
                notified.await;
            }
        };
        tokio::time::timeout(limit, wait).await.is_ok()
    }
}
