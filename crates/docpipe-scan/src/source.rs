//! Content-source abstraction.
//!
//! The scanner reads through [`ContentSource`] so the walking and record
//! extraction logic stays independent of where documents live.
//! [`FsSource`] is the production implementation; [`MockSource`] backs
//! unit tests without filesystem access.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::ScanError;

/// Read access to a tree of markdown documents.
///
/// Paths are relative, forward-slash separated, and include the `.md`
/// extension (e.g. `"dev/setup_guide.md"`).
pub trait ContentSource: Send + Sync {
    /// List all markdown document paths, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] if the source cannot be enumerated.
    fn list(&self) -> Result<Vec<String>, ScanError>;

    /// Read the raw text of one document.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] if the document does not exist or cannot
    /// be read.
    fn read(&self, path: &str) -> Result<String, ScanError>;
}

/// Which directory entries the walker skips.
#[derive(Clone, Copy, Debug)]
pub struct IgnoreRules {
    /// Skip dotfiles and dot-directories.
    pub hidden: bool,
    /// Skip files whose stem starts with `_`.
    ///
    /// Off by default: leading-underscore files are real documents that
    /// resolve to the `"other"` group, not partials.
    pub underscore_partials: bool,
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self {
            hidden: true,
            underscore_partials: false,
        }
    }
}

/// Filesystem-backed content source rooted at a directory.
#[derive(Debug)]
pub struct FsSource {
    root: std::path::PathBuf,
    ignore: IgnoreRules,
}

impl FsSource {
    /// Create a source rooted at `root` with default ignore rules.
    #[must_use]
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self {
            root: root.into(),
            ignore: IgnoreRules::default(),
        }
    }

    /// Override the ignore rules.
    #[must_use]
    pub fn with_ignore(mut self, ignore: IgnoreRules) -> Self {
        self.ignore = ignore;
        self
    }

    fn walk(&self, dir: &Path, prefix: &str, paths: &mut Vec<String>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };

        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if self.ignore.hidden && name.starts_with('.') {
                continue;
            }

            let path = entry.path();
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                let child_prefix = if prefix.is_empty() {
                    name
                } else {
                    format!("{prefix}/{name}")
                };
                self.walk(&path, &child_prefix, paths);
            } else if path.extension().is_some_and(|e| e == "md") {
                if self.ignore.underscore_partials && name.starts_with('_') {
                    continue;
                }
                if prefix.is_empty() {
                    paths.push(name);
                } else {
                    paths.push(format!("{prefix}/{name}"));
                }
            }
        }
    }
}

impl ContentSource for FsSource {
    fn list(&self) -> Result<Vec<String>, ScanError> {
        if !self.root.exists() {
            return Err(ScanError::NotFound(self.root.display().to_string()));
        }
        let mut paths = Vec::new();
        self.walk(&self.root, "", &mut paths);
        paths.sort();
        Ok(paths)
    }

    fn read(&self, path: &str) -> Result<String, ScanError> {
        fs::read_to_string(self.root.join(path)).map_err(|source| ScanError::Io {
            path: path.to_owned(),
            source,
        })
    }
}

/// In-memory content source for testing.
///
/// # Example
///
/// ```
/// use docpipe_scan::{ContentSource, MockSource};
///
/// let source = MockSource::new().with_file("guide.md", "# Guide\n\nBody.");
/// assert_eq!(source.list().unwrap(), vec!["guide.md"]);
/// ```
#[derive(Debug, Default)]
pub struct MockSource {
    files: HashMap<String, String>,
}

impl MockSource {
    /// Create an empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document with the given path and raw text.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

impl ContentSource for MockSource {
    fn list(&self) -> Result<Vec<String>, ScanError> {
        let mut paths: Vec<String> = self.files.keys().cloned().collect();
        paths.sort();
        Ok(paths)
    }

    fn read(&self, path: &str) -> Result<String, ScanError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| ScanError::NotFound(path.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_mock_source_lists_sorted() {
        let source = MockSource::new()
            .with_file("b.md", "")
            .with_file("a.md", "")
            .with_file("dev/c.md", "");
        assert_eq!(source.list().unwrap(), vec!["a.md", "b.md", "dev/c.md"]);
    }

    #[test]
    fn test_mock_source_read_missing_is_not_found() {
        let source = MockSource::new();
        assert!(matches!(
            source.read("missing.md"),
            Err(ScanError::NotFound(_))
        ));
    }

    #[test]
    fn test_fs_source_walks_nested_tree() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("readme.md"), "# Readme").unwrap();
        let sub = dir.path().join("dev");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("setup_guide.md"), "# Setup").unwrap();
        fs::write(sub.join("notes.txt"), "not markdown").unwrap();

        let source = FsSource::new(dir.path());
        assert_eq!(
            source.list().unwrap(),
            vec!["dev/setup_guide.md", "readme.md"]
        );
        assert_eq!(source.read("readme.md").unwrap(), "# Readme");
    }

    #[test]
    fn test_fs_source_skips_hidden_entries() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".hidden.md"), "# Hidden").unwrap();
        fs::write(dir.path().join("visible.md"), "# Visible").unwrap();

        let source = FsSource::new(dir.path());
        assert_eq!(source.list().unwrap(), vec!["visible.md"]);
    }

    #[test]
    fn test_fs_source_keeps_underscore_files_by_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_draft_notes.md"), "# Draft").unwrap();

        let source = FsSource::new(dir.path());
        assert_eq!(source.list().unwrap(), vec!["_draft_notes.md"]);

        let strict = FsSource::new(dir.path()).with_ignore(IgnoreRules {
            underscore_partials: true,
            ..IgnoreRules::default()
        });
        assert!(strict.list().unwrap().is_empty());
    }

    #[test]
    fn test_fs_source_missing_root_errors() {
        let source = FsSource::new("/nonexistent/docpipe-test");
        assert!(matches!(source.list(), Err(ScanError::NotFound(_))));
    }
}
