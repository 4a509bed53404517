//! File-based cache implementation.
//!
//! [`FileCache`] stores entries as files on disk, one subdirectory per
//! bucket. Each entry file starts with the stored etag on its own line;
//! the payload follows the newline:
//!
//! ```text
//! {etag}\n{payload bytes}
//! ```
//!
//! Etags in this pipeline are hex content hashes, so the header line
//! can never contain a newline itself. Reads compare the header before
//! touching the payload. Writes go through a temp file renamed into
//! place, so a concurrent reader sees either the old entry or the new
//! one, never a partial write.
//!
//! On construction, a `VERSION` stamp in the cache root is checked
//! against the caller's version string; on mismatch the whole cache
//! directory is dropped so entries from previous pipeline versions are
//! never served.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use crate::{Cache, CacheBucket};

/// File-based [`Cache`] rooted at a directory on disk.
///
/// Directory layout:
/// ```text
/// {root}/
/// +-- VERSION            # cache version stamp
/// +-- documents/         # bucket "documents"
/// |   +-- guide          # cache entry
/// +-- toc/               # bucket "toc"
///     +-- ...
/// ```
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    /// Create a file-based cache at `root`, validating the cache version.
    ///
    /// If the `VERSION` stamp inside `root` does not match `version`,
    /// the cache directory is dropped and restamped. Stamp errors are
    /// logged but never fatal; a broken cache degrades to all-miss.
    #[must_use]
    pub fn new(root: PathBuf, version: &str) -> Self {
        ensure_version(&root, version);
        Self { root }
    }
}

impl Cache for FileCache {
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket> {
        Box::new(FileCacheBucket {
            dir: self.root.join(name),
        })
    }
}

/// A single bucket backed by a directory on disk.
struct FileCacheBucket {
    dir: PathBuf,
}

impl FileCacheBucket {
    fn read_entry(&self, key: &str, etag: &str) -> std::io::Result<Option<Vec<u8>>> {
        let mut reader = BufReader::new(File::open(self.dir.join(key))?);

        let mut header = String::new();
        reader.read_line(&mut header)?;
        if !etag.is_empty() && header.trim_end_matches('\n') != etag {
            return Ok(None);
        }

        let mut payload = Vec::new();
        reader.read_to_end(&mut payload)?;
        Ok(Some(payload))
    }
}

impl CacheBucket for FileCacheBucket {
    fn get(&self, key: &str, etag: &str) -> Option<Vec<u8>> {
        self.read_entry(key, etag).ok().flatten()
    }

    fn set(&self, key: &str, etag: &str, value: &[u8]) {
        // A newline in the etag would break the header framing; such an
        // entry is unrepresentable and simply not cached
        if etag.contains('\n') {
            return;
        }

        // Cache writes are best-effort; a failed write is the next
        // read's miss
        let path = self.dir.join(key);
        let Some(parent) = path.parent() else {
            return;
        };
        if fs::create_dir_all(parent).is_err() {
            return;
        }

        // Write-then-rename keeps racing readers off partial entries
        let tmp = path.with_extension("tmp");
        let written = File::create(&tmp).and_then(|mut file| {
            file.write_all(etag.as_bytes())?;
            file.write_all(b"\n")?;
            file.write_all(value)
        });
        if written.is_ok() {
            let _ = fs::rename(&tmp, &path);
        } else {
            let _ = fs::remove_file(&tmp);
        }
    }
}

/// Check the version stamp, dropping the cache directory on mismatch.
fn ensure_version(root: &Path, version: &str) {
    let stamp = root.join("VERSION");

    match fs::read_to_string(&stamp) {
        Ok(stored) if stored == version => {
            tracing::debug!(version, "file cache version current");
            return;
        }
        Ok(stored) => {
            tracing::info!(stored, version, "file cache version changed, dropping entries");
        }
        Err(_) => {
            tracing::info!(version, "stamping new file cache");
        }
    }

    if root.exists()
        && let Err(error) = fs::remove_dir_all(root)
    {
        tracing::warn!(%error, path = %root.display(), "could not clear file cache");
    }
    if let Err(error) = fs::create_dir_all(root) {
        tracing::warn!(%error, path = %root.display(), "could not create file cache root");
        return;
    }
    if let Err(error) = fs::write(&stamp, version) {
        tracing::warn!(%error, "could not write file cache version stamp");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_bucket_set_and_get() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("documents");

        bucket.set("guide", "etag1", b"<html>guide</html>");
        assert_eq!(
            bucket.get("guide", "etag1"),
            Some(b"<html>guide</html>".to_vec())
        );
    }

    #[test]
    fn test_file_bucket_etag_mismatch_misses() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("documents");

        bucket.set("key", "correct-etag", b"data");

        assert_eq!(bucket.get("key", "correct-etag"), Some(b"data".to_vec()));
        assert_eq!(bucket.get("key", "wrong-etag"), None);
    }

    #[test]
    fn test_file_bucket_empty_etag_skips_validation() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("documents");

        bucket.set("key", "some-etag", b"data");
        assert_eq!(bucket.get("key", ""), Some(b"data".to_vec()));
    }

    #[test]
    fn test_file_bucket_get_nonexistent_key() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("documents");

        assert_eq!(bucket.get("nonexistent", "etag"), None);
    }

    #[test]
    fn test_file_bucket_overwrite() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("documents");

        bucket.set("key", "etag1", b"first");
        bucket.set("key", "etag2", b"second");

        assert_eq!(bucket.get("key", "etag1"), None);
        assert_eq!(bucket.get("key", "etag2"), Some(b"second".to_vec()));
    }

    #[test]
    fn test_file_bucket_payload_may_contain_newlines() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("documents");

        let payload: Vec<u8> = vec![b'\n', 0x00, b'\r', 0xFF, b'\n', 0x80];
        bucket.set("binary", "etag1", &payload);
        assert_eq!(bucket.get("binary", "etag1"), Some(payload));
    }

    #[test]
    fn test_file_bucket_newline_etag_not_stored() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("documents");

        bucket.set("key", "bad\netag", b"data");
        assert_eq!(bucket.get("key", ""), None);
    }

    #[test]
    fn test_file_cache_buckets_are_isolated() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");

        let alpha = cache.bucket("alpha");
        let beta = cache.bucket("beta");

        alpha.set("key", "etag", b"alpha-data");
        beta.set("key", "etag", b"beta-data");

        assert_eq!(alpha.get("key", "etag"), Some(b"alpha-data".to_vec()));
        assert_eq!(beta.get("key", "etag"), Some(b"beta-data".to_vec()));
    }

    #[test]
    fn test_file_bucket_nested_key() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("documents");

        bucket.set("docs/guide/intro", "etag1", b"nested content");
        assert_eq!(
            bucket.get("docs/guide/intro", "etag1"),
            Some(b"nested content".to_vec())
        );
    }

    #[test]
    fn test_version_match_keeps_cache() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("cache");

        let cache = FileCache::new(root.clone(), "v1");
        cache.bucket("documents").set("key", "etag1", b"preserved");

        let cache2 = FileCache::new(root, "v1");
        assert_eq!(
            cache2.bucket("documents").get("key", "etag1"),
            Some(b"preserved".to_vec())
        );
    }

    #[test]
    fn test_version_mismatch_wipes_cache() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("cache");

        let cache = FileCache::new(root.clone(), "v1");
        cache.bucket("documents").set("key", "etag1", b"stale");

        let cache2 = FileCache::new(root.clone(), "v2");
        assert_eq!(cache2.bucket("documents").get("key", "etag1"), None);

        let version = fs::read_to_string(root.join("VERSION")).unwrap();
        assert_eq!(version, "v2");
    }

    #[test]
    fn test_missing_version_file_wipes_cache() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("cache");

        fs::create_dir_all(root.join("documents")).unwrap();
        fs::write(root.join("documents/orphan"), b"stale data").unwrap();

        let cache = FileCache::new(root.clone(), "v1");
        assert_eq!(cache.bucket("documents").get("orphan", ""), None);

        let version = fs::read_to_string(root.join("VERSION")).unwrap();
        assert_eq!(version, "v1");
    }

    #[test]
    fn test_nonexistent_root_creates_version() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("deeply/nested/cache");

        assert!(!root.exists());

        let _cache = FileCache::new(root.clone(), "v1");

        assert!(root.exists());
        let version = fs::read_to_string(root.join("VERSION")).unwrap();
        assert_eq!(version, "v1");
    }
}
