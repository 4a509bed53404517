//! Anchor id injection into rendered HTML.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::heading::Heading;

static HEADING_TAG: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"<h([1-6])((?:\s[^>]*)?)>").unwrap()
});

static CODE_REGION: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"(?s)<pre\b.*?</pre>|<code\b.*?</code>").unwrap()
});

/// Injection behavior flags.
#[derive(Clone, Copy, Debug, Default)]
pub struct InjectOptions {
    /// Also insert a `#` anchor link inside each heading that gets an id.
    pub anchor_links: bool,
}

/// Inject `id` attributes onto heading tags that lack one.
///
/// Heading tags are matched to `headings` in document order by level;
/// tags inside `<pre>`/`<code>` regions are left alone. Tags that
/// already carry an id keep it (they still consume their heading so the
/// pairing stays aligned), but anchor links are inserted either way
/// when requested. Levels outside the extracted range are untouched.
#[must_use]
pub fn inject_ids(html: &str, headings: &[Heading], opts: InjectOptions) -> String {
    let code_regions: Vec<(usize, usize)> = CODE_REGION
        .find_iter(html)
        .map(|m| (m.start(), m.end()))
        .collect();

    let mut consumed = vec![false; headings.len()];
    let mut result = String::with_capacity(html.len() + headings.len() * 16);
    let mut last_end = 0;

    for caps in HEADING_TAG.captures_iter(html) {
        let Some(full) = caps.get(0) else { continue };
        if code_regions
            .iter()
            .any(|(s, e)| full.start() >= *s && full.start() < *e)
        {
            continue;
        }

        let level: u8 = caps
            .get(1)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        let Some(index) = next_heading(headings, &consumed, level) else {
            continue;
        };
        consumed[index] = true;

        let attrs = caps.get(2).map_or("", |m| m.as_str());
        let has_id = attrs.contains("id=");
        if has_id && !opts.anchor_links {
            continue;
        }

        result.push_str(&html[last_end..full.start()]);
        let id = &headings[index].id;
        if has_id {
            result.push_str(full.as_str());
        } else {
            let _ = write!(result, r#"<h{level} id="{id}"{attrs}>"#);
        }
        if opts.anchor_links {
            let _ = write!(
                result,
                r##"<a class="heading-anchor" href="#{id}" aria-hidden="true">#</a>"##
            );
        }
        last_end = full.end();
    }

    result.push_str(&html[last_end..]);
    result
}

fn next_heading(headings: &[Heading], consumed: &[bool], level: u8) -> Option<usize> {
    headings
        .iter()
        .enumerate()
        .position(|(i, h)| !consumed[i] && h.level == level)
}
