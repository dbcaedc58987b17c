use crate::markdown::plain_text;
use std::path::PathBuf;

/// One Markdown document of the book, in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    /// The Markdown file the chapter was read from
    pub source_path: PathBuf,
    /// The file name without its `.md` extension, used as the chapter's label
    pub stem: String,
    /// The raw Markdown text
    pub source: String,
    /// Title from the first level-1 heading, if any
    pub title: Option<String>,
    /// File name of the image sharing the chapter's base name, if any
    pub companion: Option<String>,
}

impl Chapter {
    pub fn new<P, S>(source_path: P, stem: S, source: String, companion: Option<String>) -> Chapter
    where
        P: Into<PathBuf>,
        S: ToString,
    {
        Chapter {
            source_path: source_path.into(),
            stem: stem.to_string(),
            title: extract_title(&source),
            source,
            companion,
        }
    }

    /// Path of the rendered chapter relative to the archive's content root.
    pub fn rendered_path(&self) -> String {
        format!("text/{}.xhtml", self.stem)
    }

    /// Navigation label: the file-derived name, followed by the title when
    /// the chapter has one.
    pub fn label(&self) -> String {
        match &self.title {
            Some(title) => format!("{}: {}", self.stem, title),
            None => self.stem.clone(),
        }
    }

    /// The companion image to prepend to the rendered chapter. Companions the
    /// text already mentions are left where the author put them.
    pub fn injected_companion(&self) -> Option<&str> {
        self.companion
            .as_deref()
            .filter(|name| !self.source.contains(name))
    }
}

/// Find the first ATX level-1 heading anywhere in the document and return its
/// text without inline markup.
pub fn extract_title(source: &str) -> Option<String> {
    source.lines().find_map(heading_text)
}

fn heading_text(line: &str) -> Option<String> {
    // up to three spaces of indentation are allowed before the marker
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return None;
    }
    let rest = line[indent..].strip_prefix('#')?;
    if !rest.starts_with([' ', '\t']) {
        return None;
    }

    let text = strip_closing_sequence(rest.trim());
    let text = plain_text(text);
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Remove an optional closing sequence of `#`s, e.g. `Title ##`.
fn strip_closing_sequence(text: &str) -> &str {
    let without = text.trim_end_matches('#');
    if without.len() == text.len() {
        text
    } else if without.is_empty() {
        without
    } else if without.ends_with([' ', '\t']) {
        without.trim_end()
    } else {
        text
    }
}
