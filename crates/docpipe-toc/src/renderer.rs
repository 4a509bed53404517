//! Markdown rendering collaborator.
//!
//! [`TocGenerator`](crate::TocGenerator) delegates markdown-to-HTML
//! conversion through the [`Renderer`] trait so hosts can plug in their
//! own engine. The bundled [`PulldownRenderer`] emits heading ids with
//! the same slug normalization the extractor uses, so ids never diverge
//! between rendered HTML and TOC entries.

use std::fmt::Write;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::heading::{level_to_num, parse_attr_block};
use crate::render::escape_html;
use crate::slug::{SlugRegistry, slugify};

/// Output of one render call.
#[derive(Clone, Debug, Default)]
pub struct Rendered {
    /// Rendered HTML.
    pub html: String,
    /// Referenced asset URLs (image sources), in document order.
    pub assets: Vec<String>,
}

/// Error from the rendering collaborator.
///
/// The one terminal condition in the pipeline: a document whose
/// renderer fails is not published, and no partial HTML is returned.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The rendering backend could not produce HTML.
    #[error("renderer failed: {0}")]
    Backend(String),
}

/// Markdown-to-HTML conversion seam.
pub trait Renderer: Send + Sync {
    /// Render markdown to HTML.
    ///
    /// Heading ids in the output must follow the same slug strategy as
    /// [`slugify`] so TOC anchors resolve.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if no HTML can be produced at all.
    fn render(&self, markdown: &str) -> Result<Rendered, RenderError>;
}

/// Default renderer backed by pulldown-cmark.
///
/// Covers the common document shapes (paragraphs, headings with slug
/// ids, emphasis, code blocks, lists, links, images, blockquotes);
/// GFM extensions are enabled.
#[derive(Debug, Default)]
pub struct PulldownRenderer;

impl PulldownRenderer {
    /// Create the default renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for PulldownRenderer {
    fn render(&self, markdown: &str) -> Result<Rendered, RenderError> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut out = String::with_capacity(markdown.len() * 2);
        let mut assets = Vec::new();
        let mut registry = SlugRegistry::new();

        // Heading content is buffered so the id can be computed from the
        // full text before the opening tag is written
        let mut heading: Option<(u8, String, String)> = None; // level, text, html

        for event in parser {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    heading = Some((level_to_num(level), String::new(), String::new()));
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((level, text, html)) = heading.take() {
                        let (clean_text, block) = parse_attr_block(&text);
                        let (clean_html, _) = parse_attr_block(&html);
                        let base = block.id.unwrap_or_else(|| slugify(&clean_text));
                        let id = registry.unique(&base);
                        let _ = write!(
                            out,
                            r#"<h{level} id="{id}">{}</h{level}>"#,
                            clean_html.trim()
                        );
                    }
                }
                Event::Start(Tag::Paragraph) => out.push_str("<p>"),
                Event::End(TagEnd::Paragraph) => out.push_str("</p>"),
                Event::Start(Tag::Emphasis) => push_inline(&mut heading, &mut out, "<em>"),
                Event::End(TagEnd::Emphasis) => push_inline(&mut heading, &mut out, "</em>"),
                Event::Start(Tag::Strong) => push_inline(&mut heading, &mut out, "<strong>"),
                Event::End(TagEnd::Strong) => push_inline(&mut heading, &mut out, "</strong>"),
                Event::Start(Tag::Strikethrough) => push_inline(&mut heading, &mut out, "<s>"),
                Event::End(TagEnd::Strikethrough) => push_inline(&mut heading, &mut out, "</s>"),
                Event::Start(Tag::BlockQuote(_)) => out.push_str("<blockquote>"),
                Event::End(TagEnd::BlockQuote(_)) => out.push_str("</blockquote>"),
                Event::Start(Tag::List(Some(1))) => out.push_str("<ol>"),
                Event::Start(Tag::List(Some(n))) => {
                    let _ = write!(out, r#"<ol start="{n}">"#);
                }
                Event::Start(Tag::List(None)) => out.push_str("<ul>"),
                Event::End(TagEnd::List(true)) => out.push_str("</ol>"),
                Event::End(TagEnd::List(false)) => out.push_str("</ul>"),
                Event::Start(Tag::Item) => out.push_str("<li>"),
                Event::End(TagEnd::Item) => out.push_str("</li>"),
                Event::Start(Tag::Link { dest_url, .. }) => {
                    let tag = format!(r#"<a href="{}">"#, escape_html(&dest_url));
                    push_inline(&mut heading, &mut out, &tag);
                }
                Event::End(TagEnd::Link) => push_inline(&mut heading, &mut out, "</a>"),
                Event::Start(Tag::Image { dest_url, .. }) => {
                    assets.push(dest_url.to_string());
                    let _ = write!(out, r#"<img src="{}" alt=""#, escape_html(&dest_url));
                }
                Event::End(TagEnd::Image) => out.push_str("\">"),
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) if !info.is_empty() => {
                            info.split_whitespace().next().map(str::to_owned)
                        }
                        _ => None,
                    };
                    match lang {
                        Some(lang) => {
                            let _ = write!(
                                out,
                                r#"<pre><code class="language-{}">"#,
                                escape_html(&lang)
                            );
                        }
                        None => out.push_str("<pre><code>"),
                    }
                }
                Event::End(TagEnd::CodeBlock) => out.push_str("</code></pre>"),
                Event::Text(text) => {
                    if let Some((_, buf, html)) = heading.as_mut() {
                        buf.push_str(&text);
                        html.push_str(&escape_html(&text));
                    } else {
                        out.push_str(&escape_html(&text));
                    }
                }
                Event::Code(code) => {
                    if let Some((_, buf, html)) = heading.as_mut() {
                        buf.push_str(&code);
                        let _ = write!(html, "<code>{}</code>", escape_html(&code));
                    } else {
                        let _ = write!(out, "<code>{}</code>", escape_html(&code));
                    }
                }
                Event::Html(html) | Event::InlineHtml(html) => out.push_str(&html),
                Event::SoftBreak => out.push('\n'),
                Event::HardBreak => out.push_str("<br>"),
                Event::Rule => out.push_str("<hr>"),
                Event::TaskListMarker(checked) => {
                    out.push_str(if checked {
                        r#"<input type="checkbox" checked disabled>"#
                    } else {
                        r#"<input type="checkbox" disabled>"#
                    });
                }
                _ => {}
            }
        }

        Ok(Rendered { html: out, assets })
    }
}

fn push_inline(heading: &mut Option<(u8, String, String)>, out: &mut String, content: &str) {
    if let Some((_, _, html)) = heading.as_mut() {
        html.push_str(content);
    } else {
        out.push_str(content);
    }
}
