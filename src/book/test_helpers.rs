use super::{BuildContext, Chapter, Image, ImageRole, Metadata};
use crate::markdown::BreakStyle;

/// A small book held entirely in memory: two chapters, a cover and one
/// companion image.
pub fn sample_context() -> BuildContext {
    let metadata = Metadata {
        title: "Tales <of> Rust & Co".to_string(),
        author: Some("Ann \"A.\" Author".to_string()),
        language: Some("en".to_string()),
        cover_image: "cover.jpg".to_string(),
        description: Some("Short stories".to_string()),
        tags: vec!["fiction".to_string(), "rust".to_string()],
    };

    let mut context = BuildContext::new("/books/tales", metadata, BreakStyle::Newline);
    context
        .add_chapter(Chapter::new(
            "/books/tales/a.md",
            "a",
            "# Alpha\n\nFirst chapter.\n".to_string(),
            None,
        ))
        .add_chapter(Chapter::new(
            "/books/tales/b.md",
            "b",
            "No heading here.\n".to_string(),
            Some("b.png".to_string()),
        ))
        .add_image(Image::new("cover.jpg", b"jpeg".to_vec(), ImageRole::Cover))
        .add_image(Image::new("b.png", b"png".to_vec(), ImageRole::Companion));
    context
}
