//! The EPUB 3 navigation document (`nav.xhtml`).
//!
//! Lists the cover, the title page and every chapter in reading order, plus a
//! hidden landmarks block that lets readers jump to the cover and to the
//! table of contents itself.

use super::xhtml_page;
use crate::book::BuildContext;
use crate::sinks::epub::labels::Labels;
use crate::sinks::epub::layout::{href, COVER_PATH, NAV_PATH, STYLESHEET_PATH, TITLE_PAGE_PATH};
use crate::sinks::epub::xml::Element;

/// Fragment id of the table of contents inside the navigation document.
pub const TOC_ID: &str = "toc";

fn entry(href: String, label: &str) -> Element {
    Element::new("li").child(Element::with_text("a", label).attr("href", href))
}

pub fn render(context: &BuildContext) -> String {
    let labels = Labels::for_language(context.language());

    let entries = [
        entry(href(COVER_PATH), labels.cover),
        entry(href(TITLE_PAGE_PATH), labels.title_page),
    ]
    .into_iter()
    .chain(
        context
            .chapters
            .iter()
            .map(|chapter| entry(href(&chapter.rendered_path()), &chapter.label())),
    );

    let toc = Element::new("nav")
        .attr("epub:type", "toc")
        .attr("id", TOC_ID)
        .attr("class", "toc")
        .child(Element::with_text("h1", labels.contents))
        .child(Element::new("ol").children(entries));

    let landmarks = Element::new("nav")
        .attr("epub:type", "landmarks")
        .attr("hidden", "hidden")
        .child(Element::with_text("h2", labels.landmarks))
        .child(
            Element::new("ol")
                .child(
                    Element::new("li").child(
                        Element::with_text("a", labels.cover)
                            .attr("epub:type", "cover")
                            .attr("href", href(COVER_PATH)),
                    ),
                )
                .child(
                    Element::new("li").child(
                        Element::with_text("a", labels.contents)
                            .attr("epub:type", "toc")
                            .attr("href", format!("{}#{TOC_ID}", href(NAV_PATH))),
                    ),
                ),
        );

    xhtml_page(
        context.language(),
        labels.contents,
        STYLESHEET_PATH,
        Element::new("body").child(toc).child(landmarks),
    )
}
