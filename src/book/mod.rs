mod chapter;
pub use chapter::*;

mod image;
pub use image::*;

mod metadata;
pub use metadata::*;

#[cfg(test)]
pub mod test_helpers;

use crate::markdown::{BreakStyle, RenderOptions};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use uuid::Uuid;

/// Identifier and timestamp shared by every document of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identifiers {
    pub uuid: Uuid,
    pub generated: DateTime<Utc>,
}

impl Identifiers {
    pub fn generate() -> Identifiers {
        Identifiers {
            uuid: Uuid::new_v4(),
            generated: Utc::now(),
        }
    }

    /// The book's unique identifier, `uuid:<id>`.
    pub fn identifier(&self) -> String {
        format!("uuid:{}", self.uuid)
    }

    /// The generation time in the `CCYY-MM-DDThh:mm:ssZ` form EPUB expects.
    pub fn timestamp(&self) -> String {
        self.generated.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

/// Everything we need to know to assemble one book
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// The directory the book is read from
    pub root: PathBuf,
    pub metadata: Metadata,
    pub ids: Identifiers,
    pub breaks: BreakStyle,
    /// Chapters in reading order
    pub chapters: Vec<Chapter>,
    /// Images in the order they were registered, unique by file name
    pub images: Vec<Image>,
}

impl BuildContext {
    pub fn new<P: Into<PathBuf>>(root: P, metadata: Metadata, breaks: BreakStyle) -> BuildContext {
        BuildContext {
            root: root.into(),
            metadata,
            ids: Identifiers::generate(),
            breaks,
            chapters: Vec::default(),
            images: Vec::default(),
        }
    }

    pub fn add_chapter(&mut self, chapter: Chapter) -> &mut Self {
        self.chapters.push(chapter);
        self
    }

    /// Register an image. An image with the same file name keeps its place
    /// and takes whichever role ranks higher.
    pub fn add_image(&mut self, image: Image) -> &mut Self {
        match self
            .images
            .iter()
            .position(|existing| existing.file_name == image.file_name)
        {
            Some(index) => {
                let existing = &mut self.images[index];
                existing.role = existing.role.max(image.role);
            }
            None => self.images.push(image),
        }
        self
    }

    pub fn has_image(&self, file_name: &str) -> bool {
        self.images.iter().any(|image| image.file_name == file_name)
    }

    pub fn cover_image(&self) -> Option<&Image> {
        self.images
            .iter()
            .find(|image| image.role == ImageRole::Cover)
    }

    /// Language tag for the documents, `en` when the metadata names none.
    pub fn language(&self) -> &str {
        self.metadata
            .language
            .as_deref()
            .filter(|lang| !lang.trim().is_empty())
            .unwrap_or("en")
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::new(self.metadata.language.as_deref(), self.breaks)
            .with_local_images(self.images.iter().map(|image| image.file_name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(title: &str) -> Metadata {
        Metadata {
            title: title.to_string(),
            author: None,
            language: None,
            cover_image: DEFAULT_COVER.to_string(),
            description: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn identifiers_are_formatted_for_epub() {
        let ids = Identifiers::generate();
        assert!(ids.identifier().starts_with("uuid:"));
        assert_eq!(ids.identifier().len(), "uuid:".len() + 36);
        let timestamp = ids.timestamp();
        assert_eq!(timestamp.len(), "2024-01-01T00:00:00Z".len());
        assert!(timestamp.ends_with('Z'));
    }

    #[test]
    fn images_are_unique_by_file_name() {
        let mut context = BuildContext::new(".", metadata("Book"), BreakStyle::Newline);
        context
            .add_image(Image::new("cover.jpg", vec![1], ImageRole::Inline))
            .add_image(Image::new("ch1.png", vec![2], ImageRole::Companion))
            .add_image(Image::new("cover.jpg", vec![1], ImageRole::Cover));

        assert_eq!(context.images.len(), 2);
        assert_eq!(context.images[0].file_name, "cover.jpg");
        assert_eq!(context.images[0].role, ImageRole::Cover);
        assert_eq!(
            context.cover_image().map(|i| i.file_name.as_str()),
            Some("cover.jpg")
        );
    }

    #[test]
    fn lower_roles_do_not_demote_images() {
        let mut context = BuildContext::new(".", metadata("Book"), BreakStyle::Newline);
        context
            .add_image(Image::new("ch1.png", vec![2], ImageRole::Companion))
            .add_image(Image::new("ch1.png", vec![2], ImageRole::Inline));
        assert_eq!(context.images[0].role, ImageRole::Companion);
    }

    #[test]
    fn language_falls_back_to_english() {
        let mut context = BuildContext::new(".", metadata("Book"), BreakStyle::Newline);
        assert_eq!(context.language(), "en");
        context.metadata.language = Some("zh".to_string());
        assert_eq!(context.language(), "zh");
        assert!(context.render_options().chinese);
    }
}
