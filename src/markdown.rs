//! Markdown to XHTML fragment rendering.
//!
//! Chapters are rendered with `pulldown-cmark`, whose HTML writer already emits
//! self-closing void elements (`<br />`, `<img ... />`), so the output drops
//! straight into an XHTML document. Passes over the event stream point local
//! image references at the archive's image directory, turn raw HTML into
//! markup that stays well-formed, and resolve soft breaks according to the
//! book's language and the configured break style.
//!
//! Raw HTML is kept only when it is a single void element (`<br>`, `<hr>`,
//! `<img ...>`, `<wbr>`), which is rewritten in XHTML form. Comments are
//! dropped. Anything else is shown as literal text, since a lone start or end
//! tag cannot be checked for balance one event at a time.

use crate::cjk::{ends_with_cjk, starts_with_cjk};
use percent_encoding::percent_decode_str;
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag};
use std::collections::HashSet;

/// How a soft break (a single newline inside a paragraph) is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreakStyle {
    /// A literal newline, which readers display as a space
    #[default]
    Newline,
    /// A visible `<br />` line break
    LineBreak,
}

impl BreakStyle {
    pub fn from_line_breaks(line_breaks: bool) -> BreakStyle {
        if line_breaks {
            BreakStyle::LineBreak
        } else {
            BreakStyle::Newline
        }
    }
}

/// Everything the renderer needs besides the Markdown text itself.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Soft breaks between two CJK characters are dropped for Chinese books
    pub chinese: bool,
    pub breaks: BreakStyle,
    /// File names of images stored in the archive; references to them are
    /// rewritten to point into the image directory
    pub local_images: HashSet<String>,
}

impl RenderOptions {
    pub fn new(language: Option<&str>, breaks: BreakStyle) -> RenderOptions {
        RenderOptions {
            chinese: is_chinese(language),
            breaks,
            local_images: HashSet::new(),
        }
    }

    pub fn with_local_images<I, S>(mut self, images: I) -> RenderOptions
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.local_images = images.into_iter().map(Into::into).collect();
        self
    }
}

/// Whether a language tag designates Chinese, judged by its primary subtag.
pub fn is_chinese(language: Option<&str>) -> bool {
    language
        .and_then(|tag| tag.split(['-', '_']).next())
        .is_some_and(|primary| primary.trim().eq_ignore_ascii_case("zh"))
}

fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Render a Markdown document to an XHTML fragment.
pub fn render(source: &str, options: &RenderOptions) -> String {
    let events = Parser::new_ext(source, parser_options())
        .map(|event| rewrite_image(event, options))
        .filter_map(|event| rewrite_raw_html(event, options))
        .collect::<Vec<_>>();
    let events = resolve_soft_breaks(events, options);

    let mut html = String::with_capacity(source.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut html, events.into_iter());
    html
}

/// Strip inline markup from a heading's text, e.g. `Hello *World*` becomes
/// `Hello World`.
///
/// The text is parsed as the content of a heading, so block markers such as
/// `1.` or `-` at its start stay literal.
pub fn plain_text(inline: &str) -> String {
    let heading = format!("# {inline}");
    Parser::new_ext(&heading, parser_options())
        .fold(String::new(), |mut text, event| {
            if let Event::Text(t) | Event::Code(t) = event {
                text.push_str(&t);
            }
            text
        })
}

/// Point references to archived images at `../images/<name>`, since chapter
/// documents live one directory below the content root.
fn rewrite_image<'a>(event: Event<'a>, options: &RenderOptions) -> Event<'a> {
    match event {
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => {
            let dest_url = match local_image_name(&dest_url, options) {
                Some(name) => CowStr::from(format!("../images/{name}")),
                None => dest_url,
            };
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            })
        }
        event => event,
    }
}

/// Images are archived by file name alone, so a reference is matched on the
/// last path component of its decoded destination.
fn local_image_name(dest_url: &str, options: &RenderOptions) -> Option<String> {
    if dest_url.contains("://") || dest_url.starts_with("data:") {
        return None;
    }
    let decoded = percent_decode_str(dest_url).decode_utf8().ok()?;
    let name = decoded.rsplit(['/', '\\']).next()?;
    options
        .local_images
        .contains(name)
        .then(|| name.to_string())
}

const VOID_ELEMENTS: [&str; 4] = ["br", "hr", "img", "wbr"];

fn rewrite_raw_html<'a>(event: Event<'a>, options: &RenderOptions) -> Option<Event<'a>> {
    match event {
        Event::Html(html) => raw_html(html, options, Event::Html),
        Event::InlineHtml(html) => raw_html(html, options, Event::InlineHtml),
        event => Some(event),
    }
}

fn raw_html<'a>(
    html: CowStr<'a>,
    options: &RenderOptions,
    kind: fn(CowStr<'a>) -> Event<'a>,
) -> Option<Event<'a>> {
    let trimmed = html.trim();
    if trimmed.is_empty() {
        return Some(kind(html));
    }
    if trimmed.starts_with("<!--") && trimmed.ends_with("-->") {
        return None;
    }
    match void_element(trimmed, options) {
        Some(tag) => {
            let trailing = &html[html.trim_end().len()..];
            Some(kind(CowStr::from(format!("{tag}{trailing}"))))
        }
        None => Some(Event::Text(html)),
    }
}

/// Rewrite a single void element tag as XHTML, or `None` if `tag` is anything
/// else or its attributes cannot be read.
fn void_element(tag: &str, options: &RenderOptions) -> Option<String> {
    let inner = tag.strip_prefix('<')?.strip_suffix('>')?;
    let inner = inner.strip_suffix('/').unwrap_or(inner);
    let name_len = inner
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(inner.len());
    let name = inner[..name_len].to_ascii_lowercase();
    if !VOID_ELEMENTS.contains(&name.as_str()) {
        return None;
    }

    let mut xhtml = format!("<{name}");
    for (key, value) in html_attributes(&inner[name_len..])? {
        let value = html_escape::decode_html_entities(&value).into_owned();
        let value = match (name.as_str(), key.as_str()) {
            ("img", "src") => match local_image_name(&value, options) {
                Some(image) => format!("../images/{image}"),
                None => value,
            },
            _ => value,
        };
        xhtml.push_str(&format!(
            r#" {key}="{}""#,
            html_escape::encode_double_quoted_attribute(&value)
        ));
    }
    xhtml.push_str(" />");
    Some(xhtml)
}

/// Parse `key="value"`, `key='value'`, `key=value` and bare `key` attributes.
fn html_attributes(mut rest: &str) -> Option<Vec<(String, String)>> {
    let mut attributes: Vec<(String, String)> = Vec::new();
    loop {
        let trimmed = rest.trim_start();
        if trimmed.is_empty() {
            return Some(attributes);
        }
        if trimmed.len() == rest.len() {
            // attributes must be separated by whitespace
            return None;
        }
        let key_len = trimmed
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':')))
            .unwrap_or(trimmed.len());
        if key_len == 0 {
            return None;
        }
        let key = trimmed[..key_len].to_ascii_lowercase();
        let after_key = trimmed[key_len..].trim_start();

        let (value, remaining) = match after_key.strip_prefix('=') {
            Some(value) => {
                let value = value.trim_start();
                match value.chars().next() {
                    Some(quote @ ('"' | '\'')) => {
                        let end = value[1..].find(quote)? + 1;
                        (value[1..end].to_string(), &value[end + 1..])
                    }
                    Some(_) => {
                        let end = value.find(char::is_whitespace).unwrap_or(value.len());
                        (value[..end].to_string(), &value[end..])
                    }
                    None => return None,
                }
            }
            None => (key.clone(), &trimmed[key_len..]),
        };
        if attributes.iter().any(|(existing, _)| *existing == key) {
            return None;
        }
        attributes.push((key, value));
        rest = remaining;
    }
}

/// Apply the soft-break policy to every soft break, looking only at the text
/// events directly on either side of it.
fn resolve_soft_breaks<'a>(events: Vec<Event<'a>>, options: &RenderOptions) -> Vec<Event<'a>> {
    let mut resolved: Vec<Event<'a>> = Vec::with_capacity(events.len());
    let mut events = events.into_iter().peekable();

    while let Some(event) = events.next() {
        if !matches!(event, Event::SoftBreak) {
            resolved.push(event);
            continue;
        }

        if options.chinese {
            let before = matches!(resolved.last(), Some(Event::Text(text)) if ends_with_cjk(text));
            let after = matches!(events.peek(), Some(Event::Text(text)) if starts_with_cjk(text));
            if before && after {
                continue;
            }
        }

        resolved.push(match options.breaks {
            BreakStyle::Newline => Event::SoftBreak,
            BreakStyle::LineBreak => Event::HardBreak,
        });
    }

    resolved
}
