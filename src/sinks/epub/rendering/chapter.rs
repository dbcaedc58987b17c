//! Chapter documents: the rendered Markdown wrapped in an XHTML page.

use super::xhtml_page;
use crate::book::{BuildContext, Chapter, Image};
use crate::markdown::{self, RenderOptions};
use crate::sinks::epub::layout::{href, STYLESHEET_PATH};
use crate::sinks::epub::xml::Element;

/// Render one chapter. Chapter documents sit in `text/`, so references to
/// the stylesheet and images climb one directory.
pub fn render(context: &BuildContext, chapter: &Chapter, options: &RenderOptions) -> String {
    let fragment = markdown::render(&chapter.source, options);

    let mut body = Element::new("body");
    if let Some(companion) = chapter.injected_companion() {
        let src = context
            .images
            .iter()
            .find(|image| image.file_name == companion)
            .map(Image::archive_path)
            .unwrap_or_else(|| format!("images/{companion}"));
        body = body.child(
            Element::new("p").attr("class", "companion").child(
                Element::new("img")
                    .attr("src", format!("../{}", href(&src)))
                    .attr("alt", &chapter.stem),
            ),
        );
    }
    let body = body.raw(fragment);

    let title = chapter.title.as_deref().unwrap_or(&chapter.stem);
    xhtml_page(
        context.language(),
        title,
        &format!("../{STYLESHEET_PATH}"),
        body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::test_helpers::sample_context;

    #[test]
    fn prepends_unreferenced_companion_image() {
        let context = sample_context();
        let chapter = &context.chapters[1];
        let page = render(&context, chapter, &context.render_options());

        let image = page
            .find(r#"<img src="../images/b.png" alt="b"/>"#)
            .expect("companion image injected");
        let text = page.find("No heading here.").expect("chapter text rendered");
        assert!(image < text);
    }

    #[test]
    fn referenced_companion_is_not_injected_twice() {
        let mut context = sample_context();
        context.chapters[1].source = "Look: ![art](b.png)\n".to_string();
        let chapter = &context.chapters[1];
        let page = render(&context, chapter, &context.render_options());

        assert_eq!(page.matches("<img").count(), 1);
        assert!(page.contains(r#"src="../images/b.png""#));
        assert!(!page.contains(r#"class="companion""#));
    }

    #[test]
    fn title_and_stylesheet_links() {
        let context = sample_context();
        let page = render(&context, &context.chapters[0], &context.render_options());
        assert!(page.contains("<title>Alpha</title>"));
        assert!(page.contains(r#"href="../stylesheet.css""#));
        assert!(page.contains("<h1>Alpha</h1>"));

        let page = render(&context, &context.chapters[1], &context.render_options());
        assert!(page.contains("<title>b</title>"));
    }
}
