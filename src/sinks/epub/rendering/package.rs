//! The package document (`content.opf`): metadata, manifest, spine and guide.

use crate::book::BuildContext;
use crate::sinks::epub::labels::Labels;
use crate::sinks::epub::layout::{href, Manifest, COVER_PATH, NAV_PATH};
use crate::sinks::epub::xml::Element;

const OPF_NS: &str = "http://www.idpf.org/2007/opf";
const DC_NS: &str = "http://purl.org/dc/elements/1.1/";

/// Id of the `dc:identifier` element named by `unique-identifier`.
const BOOK_ID: &str = "book-id";

pub fn render(context: &BuildContext, manifest: &Manifest) -> String {
    let language = context.language();
    Element::new("package")
        .attr("xmlns", OPF_NS)
        .attr("version", "3.0")
        .attr("unique-identifier", BOOK_ID)
        .attr("xml:lang", language)
        .child(render_metadata(context, manifest))
        .child(render_manifest(manifest))
        .child(render_spine(manifest))
        .child(render_guide(context))
        .to_document(None)
}

fn render_metadata(context: &BuildContext, manifest: &Manifest) -> Element {
    let metadata = &context.metadata;
    let timestamp = context.ids.timestamp();

    let mut element = Element::new("metadata")
        .attr("xmlns:dc", DC_NS)
        .child(Element::with_text("dc:identifier", context.ids.identifier()).attr("id", BOOK_ID))
        .child(Element::with_text("dc:title", &metadata.title));
    if let Some(author) = &metadata.author {
        element = element.child(Element::with_text("dc:creator", author));
    }
    element = element
        .child(Element::with_text("dc:language", context.language()))
        .child(Element::with_text("dc:date", &timestamp))
        .child(Element::with_text("meta", &timestamp).attr("property", "dcterms:modified"));
    if let Some(description) = &metadata.description {
        element = element.child(Element::with_text("dc:description", description));
    }
    element = element.children(
        metadata
            .tags
            .iter()
            .map(|tag| Element::with_text("dc:subject", tag)),
    );
    if let Some(cover) = manifest.cover_image_id() {
        element = element.child(Element::new("meta").attr("name", "cover").attr("content", cover));
    }
    element
}

fn render_manifest(manifest: &Manifest) -> Element {
    Element::new("manifest").children(manifest.items().iter().map(|item| {
        let element = Element::new("item")
            .attr("id", &item.id)
            .attr("href", item.href())
            .attr("media-type", item.media_type);
        match item.properties {
            Some(properties) => element.attr("properties", properties),
            None => element,
        }
    }))
}

fn render_spine(manifest: &Manifest) -> Element {
    Element::new("spine")
        .attr("toc", manifest.ncx_id())
        .children(
            manifest
                .spine()
                .iter()
                .map(|id| Element::new("itemref").attr("idref", id)),
        )
}

fn render_guide(context: &BuildContext) -> Element {
    let labels = Labels::for_language(context.language());
    Element::new("guide")
        .child(
            Element::new("reference")
                .attr("type", "toc")
                .attr("title", labels.contents)
                .attr("href", href(NAV_PATH)),
        )
        .child(
            Element::new("reference")
                .attr("type", "cover")
                .attr("title", labels.cover)
                .attr("href", href(COVER_PATH)),
        )
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{attribute_values, elements};
    use super::*;
    use crate::book::test_helpers::sample_context;
    use std::collections::HashSet;

    fn sample() -> (BuildContext, String) {
        let context = sample_context();
        let manifest = Manifest::for_book(&context);
        let opf = render(&context, &manifest);
        (context, opf)
    }

    #[test]
    fn metadata_block_carries_book_metadata() {
        let (context, opf) = sample();
        assert!(opf.contains(&format!(
            r#"<dc:identifier id="book-id">uuid:{}</dc:identifier>"#,
            context.ids.uuid
        )));
        assert!(opf.contains("<dc:title>Tales &lt;of&gt; Rust &amp; Co</dc:title>"));
        assert!(opf.contains("<dc:creator>Ann \"A.\" Author</dc:creator>"));
        assert!(opf.contains("<dc:language>en</dc:language>"));
        assert!(opf.contains(&format!("<dc:date>{}</dc:date>", context.ids.timestamp())));
        assert!(opf.contains("<dc:description>Short stories</dc:description>"));
        assert!(opf.contains(r#"<meta name="cover" content="images_cover_jpg"/>"#));
    }

    #[test]
    fn renders_one_subject_per_tag() {
        let (_, opf) = sample();
        let subjects: Vec<_> = opf
            .lines()
            .filter(|line| line.contains("<dc:subject>"))
            .map(str::trim)
            .collect();
        assert_eq!(
            subjects,
            vec!["<dc:subject>fiction</dc:subject>", "<dc:subject>rust</dc:subject>"]
        );
    }

    #[test]
    fn manifest_has_one_unique_item_per_file() {
        let (_, opf) = sample();
        let ids = attribute_values(&opf, "item", "id");
        let hrefs = attribute_values(&opf, "item", "href");
        assert_eq!(
            hrefs,
            vec![
                "nav.xhtml",
                "cover.xhtml",
                "title_page.xhtml",
                "toc.ncx",
                "stylesheet.css",
                "text/a.xhtml",
                "text/b.xhtml",
                "images/cover.jpg",
                "images/b.png",
            ]
        );
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn spine_reads_cover_title_nav_then_chapters() {
        let (_, opf) = sample();
        let spine = attribute_values(&opf, "itemref", "idref");
        assert_eq!(
            spine,
            vec![
                "cover_xhtml",
                "title_page_xhtml",
                "nav_xhtml",
                "text_a_xhtml",
                "text_b_xhtml",
            ]
        );

        let ids: HashSet<_> = attribute_values(&opf, "item", "id").into_iter().collect();
        assert!(spine.iter().all(|idref| ids.contains(idref)));
        assert!(opf.contains(r#"<spine toc="toc_ncx">"#));
    }

    #[test]
    fn marks_nav_and_cover_image_properties() {
        let (_, opf) = sample();
        let items = elements(&opf)
            .into_iter()
            .filter(|(name, _)| name == "item")
            .collect::<Vec<_>>();
        let properties = |href: &str| {
            items
                .iter()
                .find(|(_, attrs)| attrs.get("href").map(String::as_str) == Some(href))
                .and_then(|(_, attrs)| attrs.get("properties").cloned())
        };
        assert_eq!(properties("nav.xhtml").as_deref(), Some("nav"));
        assert_eq!(properties("images/cover.jpg").as_deref(), Some("cover-image"));
        assert_eq!(properties("images/b.png"), None);
    }

    #[test]
    fn guide_references_nav_and_cover() {
        let (_, opf) = sample();
        assert_eq!(
            attribute_values(&opf, "reference", "href"),
            vec!["nav.xhtml", "cover.xhtml"]
        );
    }

    #[test]
    fn book_without_cover_or_author_omits_them() {
        let mut context = sample_context();
        context.images.clear();
        context.metadata.author = None;
        context.metadata.tags.clear();
        let manifest = Manifest::for_book(&context);
        let opf = render(&context, &manifest);
        assert!(!opf.contains("dc:creator"));
        assert!(!opf.contains("dc:subject"));
        assert!(!opf.contains(r#"name="cover""#));
        assert!(!opf.contains("cover-image"));
    }
}
