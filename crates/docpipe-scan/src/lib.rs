//! Content-tree scanning: discovery, frontmatter splitting, and
//! [`FileRecord`] extraction.
//!
//! The scanner is the only place in the pipeline that touches I/O. It
//! walks a [`ContentSource`], splits each document into frontmatter and
//! body, and emits immutable [`FileRecord`]s partitioned by top-level
//! directory. Everything downstream (navigation, TOC generation) is pure
//! over these records.
//!
//! Unreadable or malformed individual documents are logged and skipped;
//! only a failure to list the source at all is surfaced as an error.

mod record;
mod scanner;
mod source;

pub use record::{FileRecord, humanize};
pub use scanner::{CategoryEntry, ScanResult, Scanner};
pub use source::{ContentSource, FsSource, IgnoreRules, MockSource};

/// Error type for content-source operations.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The content root or a file within it could not be accessed.
    #[error("i/o error at {path}: {source}")]
    Io {
        /// Relative path (or content root) that failed.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A requested path does not exist in the source.
    #[error("not found: {0}")]
    NotFound(String),
}
