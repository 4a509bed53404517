//! The per-document processing pipeline.
//!
//! `process_document` runs a fixed sequence: split frontmatter, resolve
//! metadata, extract headings, render, inject anchor ids, resolve
//! placeholders. Malformed frontmatter degrades to inferred metadata;
//! a renderer failure is the only terminal error. Results are cached
//! verbatim under a content hash when a cache bucket is attached.

use docpipe_cache::{CacheBucket, CacheBucketExt};
use docpipe_meta::{Frontmatter, MetadataResolver, ResolvedMetadata};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::heading::{ExtractOptions, TocExtraction, extract_toc};
use crate::inject::{InjectOptions, inject_ids};
use crate::placeholder::replace_placeholders;
use crate::render::{TocRenderContext, TocTemplate, render_toc};
use crate::renderer::{RenderError, Renderer};

/// Call-site options for one `process_document` run.
///
/// Unset options fall back to the document's frontmatter (`toc`,
/// `toc_title`, `toc_max_level`), then to defaults.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ProcessOptions {
    /// Relative document path, used for metadata resolution.
    pub path: Option<String>,
    /// Force TOC placeholder resolution on or off.
    pub toc: Option<bool>,
    /// TOC title rendered above the entries.
    pub toc_title: Option<String>,
    /// Deepest heading level included in the TOC.
    pub toc_max_level: Option<u8>,
    /// Insert `#` anchor links into headings.
    pub anchor_links: bool,
}

/// Fully processed document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProcessedDocument {
    /// Final HTML with anchor ids injected and placeholders resolved.
    pub html: String,
    /// Extracted TOC (headings, tree, flat views).
    pub toc: TocExtraction,
    /// Resolved document metadata.
    pub metadata: ResolvedMetadata,
    /// Asset URLs referenced by the document.
    pub assets: Vec<String>,
}

/// Error from `process_document`.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// The rendering collaborator failed; the document is not published.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Runs the document pipeline against a pluggable renderer.
pub struct TocGenerator {
    renderer: Box<dyn Renderer>,
    resolver: MetadataResolver,
    cache: Option<Box<dyn CacheBucket>>,
    template: Option<Box<TocTemplate>>,
}

impl TocGenerator {
    /// Create a generator over a renderer with default metadata rules.
    #[must_use]
    pub fn new(renderer: impl Renderer + 'static) -> Self {
        Self {
            renderer: Box::new(renderer),
            resolver: MetadataResolver::default(),
            cache: None,
            template: None,
        }
    }

    /// Attach a cache bucket for processed results.
    #[must_use]
    pub fn with_cache(mut self, bucket: Box<dyn CacheBucket>) -> Self {
        self.cache = Some(bucket);
        self
    }

    /// Use a custom metadata resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: MetadataResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Override the default TOC markup.
    #[must_use]
    pub fn with_template(
        mut self,
        template: impl Fn(&[crate::heading::TocNode], &TocRenderContext) -> String
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.template = Some(Box::new(template));
        self
    }

    /// Process one document end to end.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::Render`] if the renderer cannot produce
    /// HTML; every other input problem degrades to defaults.
    pub fn process_document(
        &self,
        markdown: &str,
        opts: &ProcessOptions,
    ) -> Result<ProcessedDocument, ProcessError> {
        let etag = content_etag(markdown, opts);
        let cache_key = opts.path.as_deref().unwrap_or("document");
        if let Some(bucket) = &self.cache
            && let Some(cached) = bucket.get_json::<ProcessedDocument>(cache_key, &etag)
        {
            return Ok(cached);
        }

        let (frontmatter, body) = Frontmatter::split(markdown);
        let path = opts.path.as_deref().unwrap_or("");
        let metadata = self.resolver.resolve(&frontmatter, path);
        let merged = merge_options(opts, &frontmatter);

        let toc = extract_toc(
            body,
            ExtractOptions {
                max_level: merged.max_level,
                ..ExtractOptions::default()
            },
        );

        let rendered = self.renderer.render(body)?;
        let mut html = inject_ids(
            &rendered.html,
            &toc.headings,
            InjectOptions {
                anchor_links: opts.anchor_links,
            },
        );

        if merged.toc_enabled {
            html = replace_placeholders(&html, |placement| {
                let ctx = TocRenderContext {
                    title: merged.title.clone(),
                    placement: placement.clone(),
                };
                match &self.template {
                    Some(template) => template(&toc.tree, &ctx),
                    None => render_toc(&toc.tree, &ctx),
                }
            });
        }

        let document = ProcessedDocument {
            html,
            toc,
            metadata,
            assets: rendered.assets,
        };
        if let Some(bucket) = &self.cache {
            bucket.set_json(cache_key, &etag, &document);
        }
        Ok(document)
    }
}

struct MergedOptions {
    toc_enabled: bool,
    title: Option<String>,
    max_level: u8,
}

/// Merge call-site options over frontmatter TOC fields over defaults.
fn merge_options(opts: &ProcessOptions, frontmatter: &Frontmatter) -> MergedOptions {
    let fm_toc = frontmatter.get("toc").and_then(serde_yaml::Value::as_bool);
    let fm_title = frontmatter
        .get("toc_title")
        .and_then(serde_yaml::Value::as_str)
        .map(str::to_owned);
    let fm_max = frontmatter.get("toc_max_level").and_then(|value| {
        let level = value
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .filter(|n| (1..=6).contains(n));
        if level.is_none() {
            tracing::warn!(?value, "ignoring toc_max_level outside 1..=6");
        }
        level
    });

    MergedOptions {
        toc_enabled: opts.toc.or(fm_toc).unwrap_or(true),
        title: opts.toc_title.clone().or(fm_title),
        max_level: opts
            .toc_max_level
            .or(fm_max)
            .unwrap_or(ExtractOptions::default().max_level),
    }
}

/// Content hash over markdown and options, hex-encoded.
fn content_etag(markdown: &str, opts: &ProcessOptions) -> String {
    let mut hasher = Sha256::new();
    hasher.update(markdown.as_bytes());
    if let Ok(opts_json) = serde_json::to_vec(opts) {
        hasher.update(&opts_json);
    }
    hex::encode(hasher.finalize())
}
