//! The legacy NCX table of contents (`toc.ncx`) for EPUB 2 readers.
//!
//! Carries the same chapter entries, in the same order and with the same
//! labels, as the navigation document. The document title is the book's own
//! title.

use crate::book::BuildContext;
use crate::sinks::epub::layout::href;
use crate::sinks::epub::xml::Element;

const NCX_NS: &str = "http://www.daisy.org/z3986/2005/ncx/";
const NCX_DOCTYPE: &str = r#"<!DOCTYPE ncx PUBLIC "-//NISO//DTD ncx 2005-1//EN" "http://www.daisy.org/z3986/2005/ncx-2005-1.dtd">"#;

fn meta(name: &str, content: &str) -> Element {
    Element::new("meta").attr("name", name).attr("content", content)
}

pub fn render(context: &BuildContext) -> String {
    let head = Element::new("head")
        .child(meta("dtb:uid", &context.ids.identifier()))
        .child(meta("dtb:depth", "1"))
        .child(meta("dtb:totalPageCount", "0"))
        .child(meta("dtb:maxPageNumber", "0"));

    let nav_points = context.chapters.iter().enumerate().map(|(i, chapter)| {
        let play_order = i + 1;
        Element::new("navPoint")
            .attr("id", format!("navpoint-{play_order}"))
            .attr("playOrder", play_order)
            .child(Element::new("navLabel").child(Element::with_text("text", chapter.label())))
            .child(Element::new("content").attr("src", href(&chapter.rendered_path())))
    });

    Element::new("ncx")
        .attr("xmlns", NCX_NS)
        .attr("version", "2005-1")
        .attr("xml:lang", context.language())
        .child(head)
        .child(
            Element::new("docTitle")
                .child(Element::with_text("text", &context.metadata.title)),
        )
        .child(Element::new("navMap").children(nav_points))
        .to_document(Some(NCX_DOCTYPE))
}
