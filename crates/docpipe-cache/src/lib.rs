//! Cache abstraction for the docpipe content pipeline.
//!
//! Pipeline results (processed documents, rendered TOC fragments) are keyed
//! by a content hash chosen by the caller, so the same pipeline runs
//! identically whether caching is enabled or not. Two traits form the API:
//!
//! - [`Cache`]: factory for named cache buckets
//! - [`CacheBucket`]: key-value store with etag-based invalidation
//!
//! # Implementations
//!
//! - [`NullCache`]: no-op, always misses (caching disabled)
//! - [`MemoryCache`]: in-process concurrent map, last-writer-wins
//! - [`FileCache`]: on-disk cache with version validation
//!
//! # Example
//!
//! ```
//! use docpipe_cache::{Cache, MemoryCache};
//!
//! let cache = MemoryCache::new();
//! let bucket = cache.bucket("documents");
//! bucket.set("guide", "abc123", b"<html>guide</html>");
//! assert_eq!(bucket.get("guide", "abc123"), Some(b"<html>guide</html>".to_vec()));
//! ```

mod ext;
mod file;
mod memory;

pub use ext::CacheBucketExt;
pub use file::FileCache;
pub use memory::MemoryCache;

/// A named partition within a [`Cache`].
///
/// Values are invalidated by an etag: an opaque string chosen by the caller,
/// typically a content hash. A lookup hits only when both key and etag match
/// the stored entry.
pub trait CacheBucket: Send + Sync {
    /// Retrieve a cached value.
    ///
    /// Returns `Some(value)` if the key exists **and** was stored with the
    /// same `etag`, `None` on miss or etag mismatch. An empty `etag` skips
    /// validation and returns whatever is stored for the key.
    fn get(&self, key: &str, etag: &str) -> Option<Vec<u8>>;

    /// Store a value, overwriting any previous entry for the key.
    ///
    /// Concurrent writes of the same key are allowed; the last writer wins
    /// and readers never observe a torn value.
    fn set(&self, key: &str, etag: &str, value: &[u8]);
}

/// Factory for named [`CacheBucket`]s.
///
/// Buckets are logically isolated from each other; a file-based cache keeps
/// each bucket in its own subdirectory, the memory cache in its own map.
pub trait Cache: Send + Sync {
    /// Open or create a named bucket.
    ///
    /// Multiple calls with the same name may return independent handles
    /// sharing the same underlying storage.
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket>;
}

/// No-op [`CacheBucket`] that never stores anything.
pub struct NullCacheBucket;

impl CacheBucket for NullCacheBucket {
    fn get(&self, _key: &str, _etag: &str) -> Option<Vec<u8>> {
        None
    }

    fn set(&self, _key: &str, _etag: &str, _value: &[u8]) {}
}

/// No-op [`Cache`] used when caching is disabled.
///
/// Every lookup misses; every write is discarded.
pub struct NullCache;

impl Cache for NullCache {
    fn bucket(&self, _name: &str) -> Box<dyn CacheBucket> {
        Box::new(NullCacheBucket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_cache_always_misses() {
        let cache = NullCache;
        let bucket = cache.bucket("documents");

        assert_eq!(bucket.get("key", "etag1"), None);

        bucket.set("key", "etag1", b"hello");
        assert_eq!(bucket.get("key", "etag1"), None);
    }

    #[test]
    fn test_null_cache_different_buckets_all_miss() {
        let cache = NullCache;

        for name in &["documents", "toc", "navigation"] {
            let bucket = cache.bucket(name);
            bucket.set("k", "v", b"data");
            assert_eq!(bucket.get("k", "v"), None, "bucket {name} should miss");
        }
    }
}
