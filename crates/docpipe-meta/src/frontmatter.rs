//! Frontmatter block splitting and YAML parsing.
//!
//! Frontmatter is a leading `---\n...\n---\n` block parsed as a
//! string-keyed map. Malformed YAML yields an empty map rather than a
//! failure: a document with broken frontmatter still flows through the
//! pipeline with inferred metadata.

use serde_yaml::{Mapping, Value};

use crate::MetadataError;

/// Raw frontmatter: a string-keyed map of arbitrary YAML values.
///
/// Field values are kept untyped; per-field validation happens during
/// resolution (see [`MetadataResolver`](crate::MetadataResolver)), so a
/// `group: 123` entry is carried here and rejected there.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frontmatter(Mapping);

impl Frontmatter {
    /// Create an empty frontmatter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse YAML content into frontmatter.
    ///
    /// Empty or malformed content yields an empty map; a YAML document
    /// that is valid but not a mapping (e.g. a bare list) does too.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Self::default();
        }

        match serde_yaml::from_str::<Value>(trimmed) {
            Ok(Value::Mapping(map)) => Self(map),
            Ok(_) => {
                tracing::warn!("frontmatter is not a mapping, ignoring");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "malformed frontmatter YAML, ignoring");
                Self::default()
            }
        }
    }

    /// Parse YAML content, reporting malformed input.
    ///
    /// Like [`parse`](Self::parse) but surfaces the YAML error for
    /// callers that log per-document warnings themselves.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Parse`] if the YAML is malformed.
    pub fn try_parse(content: &str) -> Result<Self, MetadataError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        match serde_yaml::from_str::<Value>(trimmed) {
            Ok(Value::Mapping(map)) => Ok(Self(map)),
            Ok(_) => Ok(Self::default()),
            Err(e) => Err(MetadataError::Parse(format!("Invalid YAML: {e}"))),
        }
    }

    /// Split a document into frontmatter and body.
    ///
    /// The frontmatter delimiter convention is a leading `---` line
    /// closed by the next `---` line. Documents without a leading
    /// delimiter (or with an unterminated block) are all body.
    #[must_use]
    pub fn split(document: &str) -> (Self, &str) {
        let Some(rest) = document.strip_prefix("---\n").or_else(|| {
            document
                .strip_prefix("---\r\n")
                .or_else(|| (document == "---").then_some(""))
        }) else {
            return (Self::default(), document);
        };

        // Find the closing delimiter line
        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == "---" {
                let yaml = &rest[..offset];
                let body = &rest[offset + line.len()..];
                return (Self::parse(yaml), body);
            }
            offset += line.len();
        }

        // Unterminated block: treat the whole document as body
        (Self::default(), document)
    }

    /// Look up a raw value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Check whether any fields are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over string-keyed entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().filter_map(|(k, v)| Some((k.as_str()?, v)))
    }
}

impl From<Mapping> for Frontmatter {
    fn from(map: Mapping) -> Self {
        Self(map)
    }
}
