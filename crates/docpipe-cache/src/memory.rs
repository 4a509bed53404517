//! In-memory cache implementation.
//!
//! [`MemoryCache`] keeps every bucket in one shared map guarded by an
//! `RwLock`, so pipeline workers running on separate threads can read
//! concurrently. Writes of the same key serialize on the lock: the last
//! writer wins and a reader always sees a complete entry.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::{Cache, CacheBucket};

type BucketMap = HashMap<String, (String, Vec<u8>)>;

/// In-process [`Cache`] backed by a concurrent map.
///
/// Cloning the cache (or calling [`Cache::bucket`] twice with the same
/// name) yields handles sharing the same storage.
#[derive(Default)]
pub struct MemoryCache {
    buckets: Arc<RwLock<HashMap<String, Arc<RwLock<BucketMap>>>>>,
}

impl MemoryCache {
    /// Create a new empty in-memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn bucket_map(&self, name: &str) -> Arc<RwLock<BucketMap>> {
        if let Some(map) = self.buckets.read().unwrap_or_else(|e| e.into_inner()).get(name) {
            return Arc::clone(map);
        }
        let mut buckets = self.buckets.write().unwrap_or_else(|e| e.into_inner());
        Arc::clone(buckets.entry(name.to_owned()).or_default())
    }
}

impl Cache for MemoryCache {
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket> {
        Box::new(MemoryCacheBucket {
            entries: self.bucket_map(name),
        })
    }
}

/// A single bucket handle into a [`MemoryCache`].
struct MemoryCacheBucket {
    entries: Arc<RwLock<BucketMap>>,
}

impl CacheBucket for MemoryCacheBucket {
    fn get(&self, key: &str, etag: &str) -> Option<Vec<u8>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        let (stored_etag, value) = entries.get(key)?;
        if !etag.is_empty() && stored_etag != etag {
            return None;
        }
        Some(value.clone())
    }

    fn set(&self, key: &str, etag: &str, value: &[u8]) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_owned(), (etag.to_owned(), value.to_vec()));
    }
}
