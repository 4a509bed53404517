//! Per-document records emitted by the scanner.

use docpipe_meta::Frontmatter;
use serde::Serialize;

/// One scanned document, immutable after creation.
#[derive(Clone, Debug, Serialize)]
pub struct FileRecord {
    /// Relative path within the content root (e.g. `"dev/setup_guide.md"`).
    pub path: String,
    /// Display title: frontmatter `title`, else first H1, else the
    /// humanized filename.
    pub title: String,
    /// Top-level directory of the path, `"root"` for files at the root.
    pub category: String,
    /// Numeric sort priority from frontmatter; lower sorts first.
    /// Documents without one sort last.
    pub priority: i64,
    /// Resolved tags (explicit plus inferred).
    pub tags: Vec<String>,
    /// Raw frontmatter, kept for downstream consumers.
    #[serde(skip)]
    pub raw_frontmatter: Frontmatter,
    /// Document body with the frontmatter block removed.
    #[serde(skip)]
    pub body: String,
}

/// Numeric priority assigned to documents without an explicit one.
pub(crate) const DEFAULT_SORT_PRIORITY: i64 = 999;

/// Convert a filename stem into a Title Case display string.
///
/// Underscores and hyphens become spaces; each word gets its first
/// letter upper-cased.
///
/// # Example
///
/// ```
/// assert_eq!(docpipe_scan::humanize("setup_guide"), "Setup Guide");
/// ```
#[must_use]
pub fn humanize(stem: &str) -> String {
    stem.replace(['_', '-'], " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Find the first ATX H1 line outside fenced code blocks.
pub(crate) fn first_h1(body: &str) -> Option<&str> {
    let mut in_fence = false;
    for line in body.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if !in_fence
            && let Some(text) = trimmed.strip_prefix("# ")
        {
            let text = text.trim();
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_humanize_underscores_and_hyphens() {
        assert_eq!(humanize("setup_guide"), "Setup Guide");
        assert_eq!(humanize("api-reference"), "Api Reference");
        assert_eq!(humanize("done_phase_1_summary"), "Done Phase 1 Summary");
    }

    #[test]
    fn test_humanize_empty_and_collapsed() {
        assert_eq!(humanize(""), "");
        assert_eq!(humanize("__a__b"), "A B");
    }

    #[test]
    fn test_first_h1_found() {
        let body = "intro text\n\n# The Title\n\nmore";
        assert_eq!(first_h1(body), Some("The Title"));
    }

    #[test]
    fn test_first_h1_skips_code_fences() {
        let body = "```\n# not a title\n```\n# Real Title";
        assert_eq!(first_h1(body), Some("Real Title"));
    }

    #[test]
    fn test_first_h1_ignores_deeper_headings() {
        let body = "## Section\n### Subsection";
        assert_eq!(first_h1(body), None);
    }
}
