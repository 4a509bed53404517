//! Heading extraction and TOC tree construction.
//!
//! Two extraction paths produce the same [`Heading`] records: the AST
//! path walks pulldown-cmark events (preferred), the text path scans
//! raw lines and is the fallback for pre-rendered or partial input.
//! Both honor trailing attribute blocks (`{#id .class key="value"}`)
//! and feed a per-document [`SlugRegistry`] in document order so anchor
//! ids are deterministic.

use std::sync::LazyLock;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::slug::{SlugRegistry, slugify};

static ATX_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^(#{1,6})\s+(.*)$").unwrap()
});

static INLINE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap()
});

/// One extracted heading.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level 1-6.
    pub level: u8,
    /// Literal heading text with inline markup and attribute block removed.
    pub text: String,
    /// Text used when rendering TOC entries; `data-toc` overrides `text`.
    pub display_text: String,
    /// Unique anchor id (explicit `#id` or generated slug).
    pub id: String,
    /// 1-based source line of the heading.
    pub line: usize,
}

/// Level filter for extraction.
#[derive(Clone, Copy, Debug)]
pub struct ExtractOptions {
    /// Lowest level included (inclusive).
    pub min_level: u8,
    /// Highest level included (inclusive).
    pub max_level: u8,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            min_level: 1,
            max_level: 4,
        }
    }
}

/// One node of the TOC tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocNode {
    /// Heading level 1-6.
    pub level: u8,
    /// Literal heading text.
    pub text: String,
    /// Text rendered in the TOC.
    pub display_text: String,
    /// Anchor id the TOC entry links to.
    pub id: String,
    /// Child headings nested under this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TocNode>,
}

impl From<&Heading> for TocNode {
    fn from(h: &Heading) -> Self {
        Self {
            level: h.level,
            text: h.text.clone(),
            display_text: h.display_text.clone(),
            id: h.id.clone(),
            children: Vec::new(),
        }
    }
}

/// Flattened TOC entry, in pre-order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatTocEntry {
    /// Heading level 1-6.
    pub level: u8,
    /// Text rendered in the TOC.
    pub display_text: String,
    /// Anchor id.
    pub id: String,
}

/// Headings plus both tree and flat TOC views of them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocExtraction {
    /// All extracted headings, in document order.
    pub headings: Vec<Heading>,
    /// Nested TOC tree.
    pub tree: Vec<TocNode>,
    /// Pre-order traversal of `tree`, for next/previous navigation.
    pub flat: Vec<FlatTocEntry>,
}

/// Parsed trailing attribute block.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct AttrBlock {
    /// Explicit anchor id from `#id`.
    pub id: Option<String>,
    /// TOC display label from `data-toc="..."`.
    pub display_text: Option<String>,
}

/// Split a trailing `{#id .class key="value"}` block off heading text.
///
/// Returns the cleaned text and the parsed block. Text without a
/// trailing block comes back unchanged with an empty block.
pub(crate) fn parse_attr_block(text: &str) -> (String, AttrBlock) {
    let trimmed = text.trim_end();
    let Some(stripped) = trimmed.strip_suffix('}') else {
        return (trimmed.to_owned(), AttrBlock::default());
    };
    let Some(open) = stripped.rfind('{') else {
        return (trimmed.to_owned(), AttrBlock::default());
    };

    let body = &stripped[open + 1..];
    let clean = stripped[..open].trim_end().to_owned();

    let mut block = AttrBlock::default();
    for token in attr_tokens(body) {
        if let Some(id) = token.strip_prefix('#') {
            if block.id.is_none() && !id.is_empty() {
                block.id = Some(id.to_owned());
            }
        } else if token.starts_with('.') {
            // Classes are accepted and ignored
        } else if let Some((key, value)) = token.split_once('=') {
            let value = value.trim_matches('"');
            if key == "data-toc" && !value.is_empty() {
                block.display_text = Some(value.to_owned());
            }
        }
    }

    (clean, block)
}

/// Split an attribute block body into tokens, keeping quoted values intact.
fn attr_tokens(body: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = None;
    let mut in_quotes = false;

    for (i, c) in body.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if let Some(s) = start.take() {
                    tokens.push(&body[s..i]);
                }
            }
            _ => {
                if start.is_none() {
                    start = Some(i);
                }
            }
        }
    }
    if let Some(s) = start {
        tokens.push(&body[s..]);
    }
    tokens
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// Extract headings by walking the markdown AST.
///
/// Inline emphasis, code, and link markup is reduced to plain text;
/// literal angle-bracket syntax (e.g. `<.form>`) survives as text.
/// Empty input yields an empty list, never an error.
#[must_use]
pub fn extract(markdown: &str, opts: ExtractOptions) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut registry = SlugRegistry::new();
    let mut current: Option<(u8, String, usize)> = None;

    let parser = Parser::new_ext(markdown, parser_options());
    for (event, range) in parser.into_offset_iter() {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some((level_to_num(level), String::new(), range.start));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, text, offset)) = current.take() {
                    let line = line_of(markdown, offset);
                    push_heading(&mut headings, &mut registry, level, &text, line, opts);
                }
            }
            Event::Text(t) | Event::Code(t) | Event::InlineHtml(t) => {
                if let Some((_, buf, _)) = current.as_mut() {
                    buf.push_str(&t);
                }
            }
            _ => {}
        }
    }

    headings
}

/// Extract headings by scanning raw lines.
///
/// Fallback for input that should not go through a full parse. Skips
/// heading-like lines inside fenced code blocks and strips inline
/// emphasis/code/link markup from the captured text.
#[must_use]
pub fn extract_from_text(markdown: &str, opts: ExtractOptions) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut registry = SlugRegistry::new();
    let mut in_fence = false;

    for (i, line) in markdown.lines().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(caps) = ATX_HEADING.captures(trimmed) {
            // Capture groups 1 and 2 always exist when the regex matches
            let level = caps
                .get(1)
                .map_or(0, |m| u8::try_from(m.as_str().len()).unwrap_or(6));
            let text = strip_inline_markup(caps.get(2).map_or("", |m| m.as_str()));
            push_heading(&mut headings, &mut registry, level, &text, i + 1, opts);
        }
    }

    headings
}

fn push_heading(
    headings: &mut Vec<Heading>,
    registry: &mut SlugRegistry,
    level: u8,
    text: &str,
    line: usize,
    opts: ExtractOptions,
) {
    let (clean, block) = parse_attr_block(text);
    let base = block.id.unwrap_or_else(|| slugify(&clean));
    // Every heading claims its id, filtered or not, so anchor ids line
    // up with renderers that emit ids for all levels
    let id = registry.unique(&base);
    if level < opts.min_level || level > opts.max_level {
        return;
    }
    let display_text = block.display_text.unwrap_or_else(|| clean.clone());
    headings.push(Heading {
        level,
        text: clean,
        display_text,
        id,
        line,
    });
}

fn strip_inline_markup(text: &str) -> String {
    let text = INLINE_LINK.replace_all(text, "$1");
    text.replace("**", "").replace(['*', '`'], "")
}

pub(crate) fn level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn line_of(markdown: &str, offset: usize) -> usize {
    markdown[..offset].bytes().filter(|b| *b == b'\n').count() + 1
}

/// Build a nested TOC tree from headings in document order.
///
/// Single left-to-right pass over an ancestor stack: each heading
/// becomes a child of the deepest ancestor with a strictly smaller
/// level. Skipped levels are tolerated without fabricating nodes.
#[must_use]
pub fn build_toc_tree(headings: &[Heading]) -> Vec<TocNode> {
    let mut roots: Vec<TocNode> = Vec::new();
    let mut stack: Vec<TocNode> = Vec::new();

    for heading in headings {
        let node = TocNode::from(heading);
        while stack.last().is_some_and(|top| top.level >= node.level) {
            attach_top(&mut stack, &mut roots);
        }
        stack.push(node);
    }
    while !stack.is_empty() {
        attach_top(&mut stack, &mut roots);
    }

    roots
}

fn attach_top(stack: &mut Vec<TocNode>, roots: &mut Vec<TocNode>) {
    if let Some(done) = stack.pop() {
        match stack.last_mut() {
            Some(parent) => parent.children.push(done),
            None => roots.push(done),
        }
    }
}

/// Extract headings plus tree and flat TOC views in one call.
#[must_use]
pub fn extract_toc(markdown: &str, opts: ExtractOptions) -> TocExtraction {
    let headings = extract(markdown, opts);
    let tree = build_toc_tree(&headings);
    let flat = flatten(&tree);
    TocExtraction {
        headings,
        tree,
        flat,
    }
}

fn flatten(tree: &[TocNode]) -> Vec<FlatTocEntry> {
    let mut flat = Vec::new();
    for node in tree {
        flatten_into(node, &mut flat);
    }
    flat
}

fn flatten_into(node: &TocNode, flat: &mut Vec<FlatTocEntry>) {
    flat.push(FlatTocEntry {
        level: node.level,
        display_text: node.display_text.clone(),
        id: node.id.clone(),
    });
    for child in &node.children {
        flatten_into(child, flat);
    }
}
