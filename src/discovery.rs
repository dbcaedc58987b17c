//! Chapter and image discovery in the book directory.
//!
//! Only the top level of the directory is scanned. Markdown files become
//! chapters in file-name order, and each chapter picks up at most one
//! companion image sharing its base name. Every other image is only carried
//! into the book when it is the cover or when some chapter mentions it.

use crate::book::{BuildContext, Chapter, Image, ImageRole};
use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};
use std::collections::BTreeSet;
use std::path::Path;

/// Companion image extensions, in order of preference.
pub const COMPANION_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Top-level files of the book directory, split by kind.
#[derive(Debug, Default)]
pub struct Entries {
    /// Markdown file names, sorted ascending
    pub markdown: Vec<String>,
    /// Image file names
    pub images: BTreeSet<String>,
}

struct Matchers {
    markdown: GlobMatcher,
    images: GlobMatcher,
}

impl Matchers {
    fn new() -> Result<Matchers> {
        let images = format!("*.{{{}}}", COMPANION_EXTENSIONS.join(","));
        Ok(Matchers {
            markdown: Glob::new("*.md")
                .with_context(|| "Failed to build Markdown pattern")?
                .compile_matcher(),
            images: Glob::new(&images)
                .with_context(|| "Failed to build image pattern")?
                .compile_matcher(),
        })
    }
}

/// List and classify the files in `root`. Anything that is neither Markdown
/// nor an image is ignored.
pub fn list_entries(root: &Path) -> Result<Entries> {
    let matchers = Matchers::new()?;
    let mut entries = Entries::default();

    let dir = std::fs::read_dir(root)
        .with_context(|| format!("Failed to list directory: {}", root.display()))?;
    for entry in dir {
        let entry =
            entry.with_context(|| format!("Failed to list directory: {}", root.display()))?;
        let is_file = entry
            .file_type()
            .map(|t| t.is_file())
            .unwrap_or_default();
        if !is_file {
            continue;
        }

        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(name) => {
                log::warn!("Skipping file with a non UTF-8 name: {name:?}");
                continue;
            }
        };

        if matchers.markdown.is_match(&name) {
            if name.len() > ".md".len() {
                entries.markdown.push(name);
            }
        } else if matchers.images.is_match(&name) {
            entries.images.insert(name);
        }
    }

    entries.markdown.sort();
    Ok(entries)
}

/// Find the companion image for a chapter stem, trying extensions in order.
pub fn companion_for(stem: &str, images: &BTreeSet<String>) -> Option<String> {
    COMPANION_EXTENSIONS
        .iter()
        .map(|ext| format!("{stem}.{ext}"))
        .find(|candidate| images.contains(candidate))
}

/// Discover every chapter and image of the book rooted at `context.root`.
pub fn discover(context: &mut BuildContext) -> Result<()> {
    let root = context.root.clone();
    let entries = list_entries(&root)?;
    log::debug!(
        "Found {} Markdown file(s) and {} image(s) in {}",
        entries.markdown.len(),
        entries.images.len(),
        root.display()
    );

    let cover = context.metadata.cover_image.clone();
    if root.join(&cover).is_file() {
        context.add_image(Image::load(&root, &cover, ImageRole::Cover)?);
    } else {
        log::warn!(
            "Cover image `{cover}` not found in {}, the cover page will show the title only",
            root.display()
        );
    }

    for file_name in &entries.markdown {
        let path = root.join(file_name);
        let source = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read chapter: {}", path.display()))?;
        let stem = file_name.strip_suffix(".md").unwrap_or(file_name);

        let companion = companion_for(stem, &entries.images);
        if let Some(companion) = &companion {
            context.add_image(Image::load(&root, companion, ImageRole::Companion)?);
        }

        let chapter = Chapter::new(path, stem, source, companion);
        log::debug!(
            "Chapter {} (title: {}, companion: {})",
            chapter.stem,
            chapter.title.as_deref().unwrap_or("none"),
            chapter.companion.as_deref().unwrap_or("none"),
        );
        context.add_chapter(chapter);
    }

    for file_name in &entries.images {
        if context.has_image(file_name) {
            continue;
        }
        let referenced = context
            .chapters
            .iter()
            .any(|chapter| chapter.source.contains(file_name.as_str()));
        if referenced {
            context.add_image(Image::load(&root, file_name, ImageRole::Inline)?);
        } else {
            log::debug!("Skipping unreferenced image {file_name}");
        }
    }

    Ok(())
}
