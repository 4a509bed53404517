//! Tree walking and record extraction.

use std::collections::BTreeMap;

use docpipe_meta::{Frontmatter, MetadataResolver};
use serde::Serialize;
use serde_yaml::Value;

use crate::ScanError;
use crate::record::{DEFAULT_SORT_PRIORITY, FileRecord, first_h1, humanize};
use crate::source::ContentSource;

/// One top-level directory of the content root.
#[derive(Clone, Debug, Serialize)]
pub struct CategoryEntry {
    /// Humanized display title (e.g. `"dev"` → `"Dev"`).
    pub title: String,
    /// Leading-slash URL path of the category (e.g. `"/dev"`).
    pub path: String,
    /// Records in this category, in listing order.
    pub files: Vec<FileRecord>,
}

/// Everything a scan produced, partitioned by top-level directory.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ScanResult {
    /// Categories keyed by lowercase directory name, sorted by key.
    pub categories: BTreeMap<String, CategoryEntry>,
    /// Records at the content root (category `"root"`).
    pub files: Vec<FileRecord>,
}

impl ScanResult {
    /// Total number of records across categories and the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len() + self.categories.values().map(|c| c.files.len()).sum::<usize>()
    }

    /// Check whether the scan found any records at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Walks a [`ContentSource`] and produces [`FileRecord`]s.
///
/// Documents that cannot be read are logged and skipped; a document
/// with malformed frontmatter still produces a record with inferred
/// metadata. Only a failure to enumerate the source is an error.
pub struct Scanner {
    source: Box<dyn ContentSource>,
    resolver: MetadataResolver,
}

impl Scanner {
    /// Create a scanner over a content source with default metadata rules.
    #[must_use]
    pub fn new(source: impl ContentSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            resolver: MetadataResolver::default(),
        }
    }

    /// Use a custom metadata resolver for tag inference.
    #[must_use]
    pub fn with_resolver(mut self, resolver: MetadataResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Scan the source and partition records by top-level directory.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] if the source cannot be enumerated.
    pub fn scan(&self) -> Result<ScanResult, ScanError> {
        let mut result = ScanResult::default();

        for path in self.source.list()? {
            let raw = match self.source.read(&path) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "skipping unreadable document");
                    continue;
                }
            };
            let record = self.build_record(&path, &raw);

            if record.category == "root" {
                result.files.push(record);
            } else {
                let key = record.category.clone();
                result
                    .categories
                    .entry(key.clone())
                    .or_insert_with(|| CategoryEntry {
                        title: humanize(&key),
                        path: format!("/{key}"),
                        files: Vec::new(),
                    })
                    .files
                    .push(record);
            }
        }

        Ok(result)
    }

    fn build_record(&self, path: &str, raw: &str) -> FileRecord {
        let (frontmatter, body) = Frontmatter::split(raw);

        let title = explicit_title(&frontmatter)
            .or_else(|| first_h1(body).map(str::to_owned))
            .unwrap_or_else(|| humanize(stem_of(path)));

        let category = match path.split_once('/') {
            Some((dir, _)) if !dir.is_empty() => dir.to_lowercase(),
            _ => "root".to_owned(),
        };

        let priority = frontmatter
            .get("priority")
            .and_then(Value::as_i64)
            .unwrap_or(DEFAULT_SORT_PRIORITY);

        let tags = self.resolver.resolve(&frontmatter, path).tags;

        FileRecord {
            path: path.to_owned(),
            title,
            category,
            priority,
            tags,
            raw_frontmatter: frontmatter,
            body: body.to_owned(),
        }
    }
}

fn explicit_title(frontmatter: &Frontmatter) -> Option<String> {
    let title = frontmatter.get("title")?.as_str()?.trim();
    (!title.is_empty()).then(|| title.to_owned())
}

fn stem_of(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.rsplit_once('.').map_or(name, |(stem, _)| stem)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::source::MockSource;

    use super::*;

    fn scan(source: MockSource) -> ScanResult {
        Scanner::new(source).scan().unwrap()
    }

    #[test]
    fn test_scan_partitions_by_top_level_directory() {
        let result = scan(
            MockSource::new()
                .with_file("readme.md", "# Welcome")
                .with_file("dev/setup_guide.md", "# Setup")
                .with_file("dev/testing.md", "# Testing")
                .with_file("ops/runbook.md", "# Runbook"),
        );

        assert_eq!(result.files.len(), 1);
        assert_eq!(result.files[0].category, "root");
        assert_eq!(result.categories.len(), 2);
        assert_eq!(result.categories["dev"].files.len(), 2);
        assert_eq!(result.categories["dev"].title, "Dev");
        assert_eq!(result.categories["dev"].path, "/dev");
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_title_prefers_frontmatter() {
        let result = scan(MockSource::new().with_file(
            "guide.md",
            "---\ntitle: Custom Title\n---\n# Heading Title\n",
        ));
        assert_eq!(result.files[0].title, "Custom Title");
    }

    #[test]
    fn test_title_falls_back_to_h1_then_filename() {
        let result = scan(
            MockSource::new()
                .with_file("from_h1.md", "# Heading Title\n\nBody")
                .with_file("setup_guide.md", "no headings here"),
        );
        let titles: Vec<_> = result.files.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["Heading Title", "Setup Guide"]);
    }

    #[test]
    fn test_priority_from_frontmatter_integer() {
        let result = scan(
            MockSource::new()
                .with_file("a.md", "---\npriority: 1\n---\nbody")
                .with_file("b.md", "body")
                .with_file("c.md", "---\npriority: not a number\n---\nbody"),
        );
        let priorities: Vec<_> = result.files.iter().map(|f| f.priority).collect();
        assert_eq!(priorities, vec![1, 999, 999]);
    }

    #[test]
    fn test_malformed_frontmatter_still_produces_record() {
        let result = scan(MockSource::new().with_file(
            "done_plan.md",
            "---\ntitle: [broken\n---\n# Salvaged\n",
        ));
        assert_eq!(result.files.len(), 1);
        assert_eq!(result.files[0].title, "Salvaged");
        assert!(result.files[0].raw_frontmatter.is_empty());
    }

    #[test]
    fn test_tags_include_inferred_group() {
        let result = scan(MockSource::new().with_file("done_phase_1.md", "body"));
        let tags = &result.files[0].tags;
        assert!(tags.contains(&"done".to_owned()), "{tags:?}");
        assert!(tags.contains(&"phases".to_owned()), "{tags:?}");
    }

    #[test]
    fn test_body_excludes_frontmatter_block() {
        let result = scan(MockSource::new().with_file(
            "guide.md",
            "---\ntitle: Guide\n---\nBody only.",
        ));
        assert_eq!(result.files[0].body, "Body only.");
    }

    #[test]
    fn test_empty_source_is_empty_result() {
        let result = scan(MockSource::new());
        assert!(result.is_empty());
    }
}
