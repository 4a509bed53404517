//! Filename inference rule tables.
//!
//! Filename-derived inference is a small set of ordered, composable
//! rules over underscore-delimited tokens: the group prefix rule plus
//! keyword tables for sub-group, priority, and status. The tables are
//! data, not code — callers swap in their own sets without touching
//! resolution order, and the shipped defaults are deliberately small.

/// Keyword tables used by filename inference.
///
/// Each table maps a filename token (matched case-insensitively against
/// the underscore-delimited tokens of the stem) to an inferred value.
/// Tokens are matched in table order; the first hit wins.
#[derive(Clone, Debug)]
pub struct InferenceRules {
    /// Token → sub-group name (e.g. `"security"` → `"security"`).
    pub sub_groups: Vec<(String, String)>,
    /// Tokens promoting a file to high priority.
    pub high_priority: Vec<String>,
    /// Tokens demoting a file to low priority.
    pub low_priority: Vec<String>,
    /// Substrings of the stem marking a file as archived.
    pub archived: Vec<String>,
}

impl Default for InferenceRules {
    fn default() -> Self {
        let own = |items: &[&str]| items.iter().map(|s| (*s).to_owned()).collect::<Vec<_>>();
        Self {
            sub_groups: [
                ("security", "security"),
                ("admin", "admin"),
                ("phase", "phases"),
                ("phases", "phases"),
                ("doc", "docs"),
                ("docs", "docs"),
            ]
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect(),
            high_priority: own(&["urgent", "critical"]),
            low_priority: own(&["minor", "low"]),
            archived: own(&["archive"]),
        }
    }
}

impl InferenceRules {
    /// Find the sub-group for a filename token, if any.
    #[must_use]
    pub fn sub_group_for(&self, token: &str) -> Option<&str> {
        let token = token.to_lowercase();
        self.sub_groups
            .iter()
            .find(|(keyword, _)| *keyword == token)
            .map(|(_, sub_group)| sub_group.as_str())
    }

    /// Check whether a token marks high priority.
    #[must_use]
    pub fn is_high_priority(&self, token: &str) -> bool {
        let token = token.to_lowercase();
        self.high_priority.iter().any(|k| *k == token)
    }

    /// Check whether a token marks low priority.
    #[must_use]
    pub fn is_low_priority(&self, token: &str) -> bool {
        let token = token.to_lowercase();
        self.low_priority.iter().any(|k| *k == token)
    }

    /// Check whether a stem contains an archival marker.
    #[must_use]
    pub fn is_archived(&self, stem: &str) -> bool {
        let stem = stem.to_lowercase();
        self.archived.iter().any(|k| stem.contains(k.as_str()))
    }
}
