//! Table-of-contents generation for markdown documents.
//!
//! The pipeline turns one markdown document into final HTML plus a
//! navigable TOC:
//!
//! 1. [`slugify`]/[`SlugRegistry`] generate collision-safe anchor ids,
//!    deterministic per document.
//! 2. [`extract_toc`] pulls headings (AST path preferred), honors
//!    `{#id .class key="value"}` attribute blocks, and builds the
//!    nested/flat TOC views.
//! 3. [`TocGenerator::process_document`] renders through the pluggable
//!    [`Renderer`], injects missing anchor ids (skipping code blocks),
//!    and replaces the first occurrence of each TOC placeholder marker
//!    with the matching fragment variant.
//!
//! Rendering and TOC extraction share the same slug normalization, so
//! anchor ids never diverge between the HTML and the TOC.
//!
//! # Example
//!
//! ```
//! use docpipe_toc::{ProcessOptions, PulldownRenderer, TocGenerator};
//!
//! let generator = TocGenerator::new(PulldownRenderer::new());
//! let doc = generator
//!     .process_document("<!-- TOC -->\n\n# Guide\n\n## Setup\n", &ProcessOptions::default())
//!     .unwrap();
//!
//! assert!(doc.html.contains(r##"<a href="#setup">Setup</a>"##));
//! ```

mod generator;
mod heading;
mod inject;
mod placeholder;
mod render;
mod renderer;
mod slug;

pub use generator::{ProcessError, ProcessOptions, ProcessedDocument, TocGenerator};
pub use heading::{
    ExtractOptions, FlatTocEntry, Heading, TocExtraction, TocNode, build_toc_tree, extract,
    extract_from_text, extract_toc,
};
pub use inject::{InjectOptions, inject_ids};
pub use placeholder::replace_placeholders;
pub use render::{TocPlacement, TocRenderContext, TocTemplate, TocVariant, render_toc};
pub use renderer::{PulldownRenderer, RenderError, Rendered, Renderer};
pub use slug::{SlugRegistry, slugify};
