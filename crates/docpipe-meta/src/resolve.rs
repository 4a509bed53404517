//! Hybrid metadata resolution.
//!
//! Every field of [`ResolvedMetadata`] goes through the same precedence
//! chain: explicit frontmatter value (correct type, non-blank) wins,
//! filename inference is next, a fixed default closes the chain. The
//! resolver never fails; garbage in means defaults out, with a soft
//! warning logged for wrong-typed fields.

use serde::{Deserialize, Serialize};

use crate::frontmatter::Frontmatter;
use crate::rules::InferenceRules;
use crate::value;

/// Publication status of a document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Actively published content.
    #[default]
    Live,
    /// Archived/deprecated content, kept for reference.
    Archived,
}

impl Status {
    /// Canonical lowercase token.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Archived => "archived",
        }
    }

    /// Normalize a status string, recognizing synonyms.
    ///
    /// Returns `None` for unrecognized values so the caller can fall
    /// through to filename inference.
    #[must_use]
    pub fn normalize(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "live" | "active" | "published" | "current" => Some(Self::Live),
            "archived" | "archive" | "inactive" | "deprecated" | "old" => Some(Self::Archived),
            _ => None,
        }
    }
}

/// Priority bucket of a document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Needs attention first.
    High,
    /// Normal priority.
    #[default]
    Medium,
    /// Can wait.
    Low,
}

impl Priority {
    /// Canonical lowercase token.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Sort rank: high sorts before medium sorts before low.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    /// Normalize a priority string, recognizing synonyms.
    ///
    /// Idempotent over canonical values; returns `None` for anything
    /// unrecognized so the caller can fall through to inference.
    #[must_use]
    pub fn normalize(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "high" | "critical" | "urgent" => Some(Self::High),
            "medium" | "normal" | "med" => Some(Self::Medium),
            "low" | "minor" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Fully resolved document metadata.
///
/// Produced by [`MetadataResolver::resolve`]; every field is guaranteed
/// to hold a valid, normalized value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMetadata {
    /// Group token: non-empty, lowercase. `"other"` when no signal exists.
    pub group: String,
    /// Optional second grouping level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_group: Option<String>,
    /// Publication status.
    pub status: Status,
    /// Priority bucket.
    pub priority: Priority,
    /// Navigation category.
    pub category: String,
    /// Tags: explicit valid entries first, then inferred, de-duplicated.
    /// Never empty (the group is always present).
    pub tags: Vec<String>,
}

/// Resolves raw frontmatter and file paths into [`ResolvedMetadata`].
///
/// Carries the [`InferenceRules`] keyword tables; construction is cheap
/// and the resolver is freely shareable across threads.
#[derive(Clone, Debug, Default)]
pub struct MetadataResolver {
    rules: InferenceRules,
}

impl MetadataResolver {
    /// Create a resolver with custom inference rules.
    #[must_use]
    pub fn new(rules: InferenceRules) -> Self {
        Self { rules }
    }

    /// Access the active rule tables.
    #[must_use]
    pub fn rules(&self) -> &InferenceRules {
        &self.rules
    }

    /// Resolve the group for a document.
    ///
    /// Explicit valid frontmatter wins; otherwise the filename prefix
    /// rule applies; `"other"` is the terminal fallback.
    #[must_use]
    pub fn determine_group(&self, frontmatter: &Frontmatter, path: &str) -> String {
        if let Some(explicit) = value::non_blank_str(frontmatter.get("group")) {
            return explicit.to_lowercase();
        }
        if frontmatter.get("group").is_some() {
            tracing::warn!(path = %path, "frontmatter group has invalid type, inferring from filename");
        }
        infer_group_from_filename(path)
    }

    /// Resolve a document's full metadata.
    ///
    /// Degrades gracefully for empty or whitespace-only paths: the
    /// result has `group = "other"`, default status and priority, and a
    /// non-empty tags list. Never fails.
    #[must_use]
    pub fn resolve(&self, frontmatter: &Frontmatter, path: &str) -> ResolvedMetadata {
        let stem = file_stem(path);
        let tokens = stem.map(stem_tokens).unwrap_or_default();

        let group = self.determine_group(frontmatter, path);
        let sub_group = self.resolve_sub_group(frontmatter, &tokens);
        let status = self.resolve_status(frontmatter, stem);
        let priority = self.resolve_priority(frontmatter, &tokens);
        let category = resolve_category(frontmatter, path);
        let tags = self.resolve_tags(frontmatter, &group, sub_group.as_deref(), &tokens, stem);

        ResolvedMetadata {
            group,
            sub_group,
            status,
            priority,
            category,
            tags,
        }
    }

    fn resolve_sub_group(&self, frontmatter: &Frontmatter, tokens: &[&str]) -> Option<String> {
        if let Some(explicit) = value::non_blank_str(frontmatter.get("sub_group")) {
            return Some(explicit.to_lowercase());
        }
        // Only interior tokens carry sub-group signal: the first token is
        // the group prefix and the last names the document itself
        // (done_admin.md is the admin plan, not an "admin" sub-group).
        tokens
            .get(1..tokens.len().saturating_sub(1))
            .unwrap_or_default()
            .iter()
            .find_map(|token| self.rules.sub_group_for(token))
            .map(str::to_owned)
    }

    fn resolve_status(&self, frontmatter: &Frontmatter, stem: Option<&str>) -> Status {
        if let Some(raw) = value::non_blank_str(frontmatter.get("status"))
            && let Some(status) = Status::normalize(raw)
        {
            return status;
        }
        match stem {
            Some(stem) if self.rules.is_archived(stem) => Status::Archived,
            _ => Status::default(),
        }
    }

    fn resolve_priority(&self, frontmatter: &Frontmatter, tokens: &[&str]) -> Priority {
        if let Some(raw) = value::non_blank_str(frontmatter.get("priority"))
            && let Some(priority) = Priority::normalize(raw)
        {
            return priority;
        }
        if tokens.iter().any(|t| self.rules.is_high_priority(t)) {
            Priority::High
        } else if tokens.iter().any(|t| self.rules.is_low_priority(t)) {
            Priority::Low
        } else {
            Priority::default()
        }
    }

    fn resolve_tags(
        &self,
        frontmatter: &Frontmatter,
        group: &str,
        sub_group: Option<&str>,
        tokens: &[&str],
        stem: Option<&str>,
    ) -> Vec<String> {
        let mut tags = value::string_list(frontmatter.get("tags")).unwrap_or_default();

        // Inferred tags follow explicit ones
        tags.push(group.to_owned());
        if let Some(sub) = sub_group {
            tags.push(sub.to_owned());
        }
        for token in tokens {
            if self.rules.is_high_priority(token) || self.rules.is_low_priority(token) {
                tags.push(token.to_lowercase());
            }
        }
        if stem.is_some_and(|s| self.rules.is_archived(s)) {
            tags.push("archived".to_owned());
        }

        dedup_preserving_order(tags)
    }
}

/// Infer a group from the filename prefix rule.
///
/// If the stem contains `_` and does not start with `_`, the substring
/// before the first `_` (lowercased) is the group; otherwise `"other"`.
/// A trailing underscore is treated the same as an internal one.
#[must_use]
pub fn infer_group_from_filename(path: &str) -> String {
    let Some(stem) = file_stem(path) else {
        return "other".to_owned();
    };
    if stem.starts_with('_') {
        return "other".to_owned();
    }
    match stem.split_once('_') {
        Some((prefix, _)) if !prefix.is_empty() => prefix.to_lowercase(),
        _ => "other".to_owned(),
    }
}

/// Extract the filename stem (last path segment, extension stripped).
///
/// Returns `None` for empty/whitespace-only paths and for stems that
/// end up empty (e.g. dotfiles).
fn file_stem(path: &str) -> Option<&str> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return None;
    }
    let name = trimmed.rsplit('/').next().unwrap_or(trimmed);
    let stem = match name.rsplit_once('.') {
        Some((stem, _ext)) => stem,
        None => name,
    };
    (!stem.is_empty()).then_some(stem)
}

/// Split a stem into non-empty underscore-delimited tokens.
fn stem_tokens(stem: &str) -> Vec<&str> {
    stem.split('_').filter(|t| !t.is_empty()).collect()
}

fn resolve_category(frontmatter: &Frontmatter, path: &str) -> String {
    if let Some(explicit) = value::non_blank_str(frontmatter.get("category")) {
        return explicit.to_lowercase();
    }
    // First directory component of the path, if nested
    let trimmed = path.trim().trim_start_matches('/');
    match trimmed.split_once('/') {
        Some((dir, _)) if !dir.is_empty() => dir.to_lowercase(),
        _ => "general".to_owned(),
    }
}

fn dedup_preserving_order(tags: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tags.into_iter().filter(|t| seen.insert(t.clone())).collect()
}
