//! Placeholder marker detection and replacement.
//!
//! Recognized markers, each replaced at most once per document:
//! `<!-- TOC -->`, `<!-- TOC inline -->`, `<!-- TOC sidebar -->`, and
//! the `[TOC position="..." sticky="..."]` directive.

use std::sync::LazyLock;

use regex::Regex;

use crate::render::{TocPlacement, TocVariant};

// Attribute values match in raw form or with quotes escaped to &quot;,
// since markdown renderers escape the directive when it reaches the
// HTML as paragraph text.
static TOC_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r#"\[TOC((?:\s+[A-Za-z_-]+=(?:"[^"]*"|&quot;[^&]*&quot;))*)\s*\]"#).unwrap()
});

static DIRECTIVE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r#"([A-Za-z_-]+)=(?:"([^"]*)"|&quot;([^&]*)&quot;)"#).unwrap()
});

const MARKER_STANDARD: &str = "<!-- TOC -->";
const MARKER_INLINE: &str = "<!-- TOC inline -->";
const MARKER_SIDEBAR: &str = "<!-- TOC sidebar -->";

/// Replace the first occurrence of each marker type in `html`.
///
/// `render` is invoked once per marker type actually present, with the
/// resolved placement. Later occurrences of the same marker type are
/// left verbatim.
pub fn replace_placeholders(html: &str, render: impl Fn(&TocPlacement) -> String) -> String {
    // Longer comment markers first so "<!-- TOC -->" cannot shadow them
    let mut html = replace_comment_marker(html, MARKER_INLINE, TocVariant::Inline, &render);
    html = replace_comment_marker(&html, MARKER_SIDEBAR, TocVariant::Sidebar, &render);
    html = replace_comment_marker(&html, MARKER_STANDARD, TocVariant::Standard, &render);
    replace_directive(&html, &render)
}

fn replace_comment_marker(
    html: &str,
    marker: &str,
    variant: TocVariant,
    render: &impl Fn(&TocPlacement) -> String,
) -> String {
    if html.contains(marker) {
        html.replacen(marker, &render(&TocPlacement::of(variant)), 1)
    } else {
        html.to_owned()
    }
}

fn replace_directive(html: &str, render: &impl Fn(&TocPlacement) -> String) -> String {
    let Some(caps) = TOC_DIRECTIVE.captures(html) else {
        return html.to_owned();
    };

    let attrs = caps.get(1).map_or("", |m| m.as_str());
    let placement = parse_directive(attrs);

    let Some(full) = caps.get(0) else {
        return html.to_owned();
    };
    let mut result = String::with_capacity(html.len());
    result.push_str(&html[..full.start()]);
    result.push_str(&render(&placement));
    result.push_str(&html[full.end()..]);
    result
}

fn parse_directive(attrs: &str) -> TocPlacement {
    let mut placement = TocPlacement::of(TocVariant::Sidebar);
    for caps in DIRECTIVE_ATTR.captures_iter(attrs) {
        let key = caps.get(1).map_or("", |m| m.as_str());
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map_or("", |m| m.as_str());
        match key {
            "position" if value == "inline" => {
                placement.variant = TocVariant::Inline;
                placement.position = None;
            }
            "position" => placement.position = Some(value.to_owned()),
            "sticky" => placement.sticky = value == "true",
            _ => {}
        }
    }
    placement
}
