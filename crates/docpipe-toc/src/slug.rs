//! Anchor slug generation with collision-safe suffixing.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| {
    // Unwrap is safe: the pattern is a literal
    #[allow(clippy::unwrap_used)]
    Regex::new(r"<[^>]*>").unwrap()
});

/// Fallback slug for text that normalizes to nothing.
const EMPTY_SLUG: &str = "section";

/// Normalize heading text into an anchor slug.
///
/// Lower-cases, strips HTML tags, drops characters outside
/// `[a-z0-9- ]`, collapses whitespace/hyphen runs to a single `-`, and
/// trims. Empty results map to `"section"` so a slug is never blank.
///
/// # Example
///
/// ```
/// assert_eq!(docpipe_toc::slugify("Getting Started!"), "getting-started");
/// assert_eq!(docpipe_toc::slugify("???"), "section");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let stripped = HTML_TAG.replace_all(text, " ");

    let mut slug = String::with_capacity(stripped.len());
    for c in stripped.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if (c == ' ' || c == '-') && !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
        // Anything else is dropped outright
    }
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        EMPTY_SLUG.to_owned()
    } else {
        slug.to_owned()
    }
}

/// Tracks issued slugs so duplicates get deterministic numeric suffixes.
///
/// One registry per document: suffix numbering is reproducible in
/// document order, never global.
#[derive(Debug, Default)]
pub struct SlugRegistry {
    seen: HashSet<String>,
}

impl SlugRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a unique id for `base`.
    ///
    /// The first caller gets `base`; later duplicates get `base-1`,
    /// `base-2`, and so on. The chosen id is recorded before returning.
    pub fn unique(&mut self, base: &str) -> String {
        if self.seen.insert(base.to_owned()) {
            return base.to_owned();
        }
        let mut n = 1;
        loop {
            let candidate = format!("{base}-{n}");
            if self.seen.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Getting Started"), "getting-started");
        assert_eq!(slugify("FAQ"), "faq");
    }

    #[test]
    fn test_slugify_collapses_separator_runs() {
        assert_eq!(slugify("What -- Really"), "what-really");
        assert_eq!(slugify("a   b"), "a-b");
    }

    #[test]
    fn test_slugify_drops_out_of_set_characters() {
        assert_eq!(slugify("don't panic"), "dont-panic");
        assert_eq!(slugify("a_b"), "ab");
    }

    #[test]
    fn test_slugify_strips_html_tags() {
        assert_eq!(slugify("Install <code>npm</code> now"), "install-npm-now");
    }

    #[test]
    fn test_slugify_trims_separators() {
        assert_eq!(slugify("--hello--"), "hello");
    }

    #[test]
    fn test_slugify_empty_maps_to_fallback() {
        assert_eq!(slugify(""), "section");
        assert_eq!(slugify("???"), "section");
        assert_eq!(slugify("   "), "section");
    }

    #[test]
    fn test_slugify_keeps_digits() {
        assert_eq!(slugify("Phase 2 Plan"), "phase-2-plan");
    }

    #[test]
    fn test_unique_suffixes_in_call_order() {
        let mut registry = SlugRegistry::new();
        assert_eq!(registry.unique("faq"), "faq");
        assert_eq!(registry.unique("faq"), "faq-1");
        assert_eq!(registry.unique("faq"), "faq-2");
        assert_eq!(registry.unique("other"), "other");
    }

    #[test]
    fn test_unique_skips_already_claimed_suffix() {
        let mut registry = SlugRegistry::new();
        assert_eq!(registry.unique("faq-1"), "faq-1");
        assert_eq!(registry.unique("faq"), "faq");
        // "faq-1" is taken, probing continues
        assert_eq!(registry.unique("faq"), "faq-2");
    }
}
