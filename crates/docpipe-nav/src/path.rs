//! Path and slug helpers.

/// Convert a relative content path to a leading-slash URL path.
///
/// Strips the extension; `index` maps to its parent directory, or `/`
/// at the root.
///
/// # Examples
///
/// ```
/// use docpipe_nav::file_path_to_url_path;
///
/// assert_eq!(file_path_to_url_path("dev/setup.md"), "/dev/setup");
/// assert_eq!(file_path_to_url_path("dev/index.md"), "/dev");
/// assert_eq!(file_path_to_url_path("index.md"), "/");
/// ```
#[must_use]
pub fn file_path_to_url_path(path: &str) -> String {
    let trimmed = path.trim().trim_start_matches('/');
    let without_ext = match trimmed.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => trimmed,
    };

    let part = if without_ext == "index" {
        ""
    } else {
        without_ext.strip_suffix("/index").unwrap_or(without_ext)
    };

    format!("/{part}")
}

/// Slugify a display title for use in URLs or anchors.
///
/// Same normalization as heading anchor ids.
#[must_use]
pub fn title_to_slug(title: &str) -> String {
    docpipe_toc::slugify(title)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_plain_file() {
        assert_eq!(file_path_to_url_path("guide.md"), "/guide");
        assert_eq!(file_path_to_url_path("dev/setup.md"), "/dev/setup");
        assert_eq!(file_path_to_url_path("a/b/c.md"), "/a/b/c");
    }

    #[test]
    fn test_index_maps_to_parent() {
        assert_eq!(file_path_to_url_path("index.md"), "/");
        assert_eq!(file_path_to_url_path("dev/index.md"), "/dev");
        assert_eq!(file_path_to_url_path("a/b/index.md"), "/a/b");
    }

    #[test]
    fn test_extension_agnostic() {
        assert_eq!(file_path_to_url_path("guide.markdown"), "/guide");
        assert_eq!(file_path_to_url_path("guide"), "/guide");
    }

    #[test]
    fn test_leading_slash_tolerated() {
        assert_eq!(file_path_to_url_path("/dev/setup.md"), "/dev/setup");
    }

    #[test]
    fn test_title_to_slug_matches_anchor_normalization() {
        assert_eq!(title_to_slug("Getting Started!"), "getting-started");
        assert_eq!(title_to_slug(""), "section");
    }
}
