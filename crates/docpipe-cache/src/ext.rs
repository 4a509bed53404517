//! Extension trait for [`CacheBucket`] with typed convenience methods.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::CacheBucket;

/// Typed convenience methods for [`CacheBucket`].
///
/// `get_json`/`set_json` cover serde-serializable pipeline results and
/// `get_string`/`set_string` cover rendered HTML fragments. Default methods
/// on an extension trait keep [`CacheBucket`] object-safe and free of any
/// serde dependency; implementors only handle raw bytes.
///
/// # Example
///
/// ```
/// use docpipe_cache::{Cache, CacheBucketExt, MemoryCache};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct TocFragment { html: String }
///
/// let cache = MemoryCache::new();
/// let bucket = cache.bucket("toc");
///
/// bucket.set_json("guide", "v1", &TocFragment { html: "<ul/>".into() });
/// let fragment: Option<TocFragment> = bucket.get_json("guide", "v1");
/// assert!(fragment.is_some());
/// ```
pub trait CacheBucketExt: CacheBucket {
    /// Retrieve a JSON-deserialized value from the cache.
    ///
    /// Returns `None` on cache miss, etag mismatch, or deserialization failure.
    fn get_json<T: DeserializeOwned>(&self, key: &str, etag: &str) -> Option<T> {
        let bytes = self.get(key, etag)?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Store a value as JSON in the cache.
    ///
    /// Silently does nothing if serialization fails.
    fn set_json<T: Serialize>(&self, key: &str, etag: &str, value: &T) {
        if let Ok(bytes) = serde_json::to_vec(value) {
            self.set(key, etag, &bytes);
        }
    }

    /// Retrieve a cached UTF-8 string.
    ///
    /// Returns `None` on cache miss, etag mismatch, or invalid UTF-8.
    fn get_string(&self, key: &str, etag: &str) -> Option<String> {
        let bytes = self.get(key, etag)?;
        String::from_utf8(bytes).ok()
    }

    /// Store a string value in the cache.
    fn set_string(&self, key: &str, etag: &str, value: &str) {
        self.set(key, etag, value.as_bytes());
    }
}

impl<B: CacheBucket + ?Sized> CacheBucketExt for B {}
