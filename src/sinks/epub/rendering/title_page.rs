//! Title page: a small table naming the book, its author, where it was built
//! from and when.

use super::xhtml_page;
use crate::book::BuildContext;
use crate::sinks::epub::labels::Labels;
use crate::sinks::epub::layout::STYLESHEET_PATH;
use crate::sinks::epub::xml::Element;

fn row(label: &str, value: &str) -> Element {
    Element::new("tr")
        .child(Element::with_text("th", label))
        .child(Element::with_text("td", value))
}

pub fn render(context: &BuildContext) -> String {
    let labels = Labels::for_language(context.language());
    let metadata = &context.metadata;
    let generated = context
        .ids
        .generated
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string();
    let source = context.root.display().to_string();

    let table = Element::new("table")
        .child(row(labels.title, &metadata.title))
        .child(row(
            labels.author,
            metadata.author.as_deref().unwrap_or(labels.unknown),
        ))
        .child(row(labels.source, &source))
        .child(row(labels.generated, &generated));

    xhtml_page(
        context.language(),
        labels.title_page,
        STYLESHEET_PATH,
        Element::new("body").child(
            Element::new("div")
                .attr("class", "title-page")
                .child(Element::with_text("h1", &metadata.title))
                .child(table),
        ),
    )
}
