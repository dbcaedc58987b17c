//! Cover page rendering for EPUB.
//!
//! Shows the cover image at a fixed size. Books whose cover file is missing
//! get the title as a heading instead, so the page still exists for the spine
//! and the landmarks.

use super::xhtml_page;
use crate::book::BuildContext;
use crate::sinks::epub::labels::Labels;
use crate::sinks::epub::layout::{href, STYLESHEET_PATH};
use crate::sinks::epub::xml::Element;

pub const COVER_WIDTH: u32 = 600;
pub const COVER_HEIGHT: u32 = 800;

/// Render the cover page as XHTML.
pub fn render(context: &BuildContext) -> String {
    let labels = Labels::for_language(context.language());

    let content = match context.cover_image() {
        Some(image) => Element::new("img")
            .attr("src", href(&image.archive_path()))
            .attr("alt", labels.cover)
            .attr("width", COVER_WIDTH)
            .attr("height", COVER_HEIGHT),
        None => Element::with_text("h1", &context.metadata.title),
    };

    xhtml_page(
        context.language(),
        labels.cover,
        STYLESHEET_PATH,
        Element::new("body").child(Element::new("div").attr("class", "cover").child(content)),
    )
}
