//! TOC fragment rendering.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::heading::TocNode;

/// Which TOC fragment a placeholder asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TocVariant {
    /// Block-level TOC (`<!-- TOC -->`).
    Standard,
    /// Compact inline TOC (`<!-- TOC inline -->`).
    Inline,
    /// Sidebar TOC (`<!-- TOC sidebar -->` or a `[TOC ...]` directive).
    Sidebar,
}

impl TocVariant {
    fn css_class(self) -> &'static str {
        match self {
            Self::Standard => "toc",
            Self::Inline => "toc toc-inline",
            Self::Sidebar => "toc toc-sidebar",
        }
    }
}

/// Fully resolved placement of one TOC fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocPlacement {
    /// Requested variant.
    pub variant: TocVariant,
    /// Sidebar position from a `[TOC position="..."]` directive.
    pub position: Option<String>,
    /// Sticky flag from a `[TOC sticky="..."]` directive.
    pub sticky: bool,
}

impl TocPlacement {
    /// Placement for a bare marker of the given variant.
    #[must_use]
    pub fn of(variant: TocVariant) -> Self {
        Self {
            variant,
            position: None,
            sticky: false,
        }
    }
}

/// Context handed to a custom TOC template.
#[derive(Clone, Debug)]
pub struct TocRenderContext {
    /// TOC title, if configured.
    pub title: Option<String>,
    /// Placement the fragment is rendered for.
    pub placement: TocPlacement,
}

/// Caller-supplied override for the TOC markup.
pub type TocTemplate = dyn Fn(&[TocNode], &TocRenderContext) -> String + Send + Sync;

/// Render the default TOC markup for a tree.
///
/// Produces a `<nav>` wrapper with nested `<ul>` lists; entries link to
/// the heading anchors by id. Empty trees render an empty string.
#[must_use]
pub fn render_toc(tree: &[TocNode], ctx: &TocRenderContext) -> String {
    if tree.is_empty() {
        return String::new();
    }

    let mut html = String::with_capacity(256);
    let mut class = ctx.placement.variant.css_class().to_owned();
    if let Some(position) = &ctx.placement.position {
        // Non-default positions become a modifier class
        let _ = write!(class, " toc-{position}");
    }
    if ctx.placement.sticky {
        class.push_str(" toc-sticky");
    }

    let _ = write!(html, r#"<nav class="{class}" aria-label="Table of contents">"#);
    if let Some(title) = &ctx.title {
        let _ = write!(html, r#"<p class="toc-title">{}</p>"#, escape_html(title));
    }
    render_list(tree, &mut html);
    html.push_str("</nav>");
    html
}

fn render_list(nodes: &[TocNode], html: &mut String) {
    html.push_str("<ul>");
    for node in nodes {
        let _ = write!(
            html,
            r##"<li><a href="#{}">{}</a>"##,
            node.id,
            escape_html(&node.display_text)
        );
        if !node.children.is_empty() {
            render_list(&node.children, html);
        }
        html.push_str("</li>");
    }
    html.push_str("</ul>");
}

/// Escape text for safe inclusion in HTML.
pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
