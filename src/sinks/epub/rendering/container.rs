//! `META-INF/container.xml`, which points readers at the package document.

use crate::sinks::epub::layout::{archive_path, PACKAGE_PATH};
use crate::sinks::epub::xml::Element;

const CONTAINER_NS: &str = "urn:oasis:names:tc:opendocument:xmlns:container";

pub fn render() -> String {
    Element::new("container")
        .attr("version", "1.0")
        .attr("xmlns", CONTAINER_NS)
        .child(
            Element::new("rootfiles").child(
                Element::new("rootfile")
                    .attr("full-path", archive_path(PACKAGE_PATH))
                    .attr("media-type", "application/oebps-package+xml"),
            ),
        )
        .to_document(None)
}
