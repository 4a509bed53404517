//! Frontmatter parsing and hybrid metadata resolution.
//!
//! Documents carry optional YAML frontmatter whose fields may be absent,
//! blank, or the wrong type entirely. This crate resolves every field
//! through the same three-step chain:
//!
//! 1. Explicit frontmatter value, if present, correctly typed, and
//!    non-blank after trimming.
//! 2. Filename-derived inference (underscore prefix, keyword tables).
//! 3. A fixed default.
//!
//! The result is a [`ResolvedMetadata`] record that is never partially
//! invalid: every field holds a normalized value regardless of input.
//! Malformed YAML, wrong-typed fields, and empty paths all degrade to
//! defaults with a soft warning; nothing in this crate returns an error
//! to the caller during resolution.
//!
//! # Example
//!
//! ```
//! use docpipe_meta::{Frontmatter, MetadataResolver};
//!
//! let resolver = MetadataResolver::default();
//! let (frontmatter, _body) = Frontmatter::split("---\npriority: URGENT\n---\nbody");
//! let meta = resolver.resolve(&frontmatter, "done_phase_1_summary.md");
//!
//! assert_eq!(meta.group, "done");
//! assert_eq!(meta.priority.as_str(), "high");
//! ```

mod frontmatter;
mod resolve;
mod rules;
mod value;

pub use frontmatter::Frontmatter;
pub use resolve::{MetadataResolver, Priority, ResolvedMetadata, Status, infer_group_from_filename};
pub use rules::InferenceRules;

/// Error type for metadata operations.
///
/// Resolution itself never fails; this covers explicit parse requests
/// where the caller wants to distinguish malformed YAML.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// YAML parsing error.
    #[error("{0}")]
    Parse(String),
}
