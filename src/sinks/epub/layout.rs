//! Where things live inside the EPUB and how manifest items are named.

use crate::book::{BuildContext, ImageRole};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::collections::HashSet;

/// Directory holding the package document and everything it references.
pub const CONTENT_ROOT: &str = "EPUB";

pub const CONTAINER_PATH: &str = "META-INF/container.xml";
pub const PACKAGE_PATH: &str = "content.opf";
pub const NAV_PATH: &str = "nav.xhtml";
pub const COVER_PATH: &str = "cover.xhtml";
pub const TITLE_PAGE_PATH: &str = "title_page.xhtml";
pub const NCX_PATH: &str = "toc.ncx";
pub const STYLESHEET_PATH: &str = "stylesheet.css";

pub const XHTML_MEDIA_TYPE: &str = "application/xhtml+xml";
pub const NCX_MEDIA_TYPE: &str = "application/x-dtbncx+xml";
pub const CSS_MEDIA_TYPE: &str = "text/css";

/// Characters that cannot appear unescaped in a relative URL path.
const HREF_UNSAFE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Full archive path of a file under the content root.
pub fn archive_path(path: &str) -> String {
    format!("{CONTENT_ROOT}/{path}")
}

/// Percent-encode a content-root-relative path for use as an href.
pub fn href(path: &str) -> String {
    utf8_percent_encode(path, HREF_UNSAFE).to_string()
}

/// Derive an item id from a path: every character that is not an ASCII
/// letter or digit becomes `_`.
pub fn item_id(path: &str) -> String {
    path.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestItem {
    pub id: String,
    /// Path relative to the content root, not yet encoded
    pub path: String,
    pub media_type: &'static str,
    pub properties: Option<&'static str>,
}

impl ManifestItem {
    pub fn href(&self) -> String {
        href(&self.path)
    }
}

/// Every file the package document declares, with unique ids, plus the
/// reading order built from them.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    items: Vec<ManifestItem>,
    ids: HashSet<String>,
    spine: Vec<String>,
    ncx: String,
    cover_image: Option<String>,
}

impl Manifest {
    /// The manifest of a book: structural documents, then chapters in reading
    /// order, then images. The spine lists the cover, the title page, the
    /// navigation document and then every chapter.
    pub fn for_book(context: &BuildContext) -> Manifest {
        let mut manifest = Manifest::default();
        let nav = manifest.add(NAV_PATH, XHTML_MEDIA_TYPE, Some("nav")).to_string();
        let cover = manifest.add(COVER_PATH, XHTML_MEDIA_TYPE, None).to_string();
        let title_page = manifest
            .add(TITLE_PAGE_PATH, XHTML_MEDIA_TYPE, None)
            .to_string();
        manifest.ncx = manifest.add(NCX_PATH, NCX_MEDIA_TYPE, None).to_string();
        manifest.add(STYLESHEET_PATH, CSS_MEDIA_TYPE, None);

        manifest.spine = vec![cover, title_page, nav];
        for chapter in &context.chapters {
            let id = manifest
                .add(&chapter.rendered_path(), XHTML_MEDIA_TYPE, None)
                .to_string();
            manifest.spine.push(id);
        }

        for image in &context.images {
            let is_cover = image.role == ImageRole::Cover;
            let id = manifest
                .add(
                    &image.archive_path(),
                    image.media_type,
                    is_cover.then_some("cover-image"),
                )
                .to_string();
            if is_cover {
                manifest.cover_image = Some(id);
            }
        }
        manifest
    }

    /// Add an item and return its id. Ids that would collide with an
    /// earlier item get a numeric suffix.
    pub fn add(
        &mut self,
        path: &str,
        media_type: &'static str,
        properties: Option<&'static str>,
    ) -> &str {
        let base = item_id(path);
        let mut id = base.clone();
        let mut suffix = 2;
        while self.ids.contains(&id) {
            id = format!("{base}_{suffix}");
            suffix += 1;
        }
        self.ids.insert(id.clone());
        self.items.push(ManifestItem {
            id,
            path: path.to_string(),
            media_type,
            properties,
        });
        &self.items[self.items.len() - 1].id
    }

    pub fn items(&self) -> &[ManifestItem] {
        &self.items
    }

    /// Id of the item stored at `path`.
    #[cfg(test)]
    pub fn id_of(&self, path: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.path == path)
            .map(|item| item.id.as_str())
    }

    /// Item ids in reading order.
    pub fn spine(&self) -> &[String] {
        &self.spine
    }

    pub fn ncx_id(&self) -> &str {
        &self.ncx
    }

    pub fn cover_image_id(&self) -> Option<&str> {
        self.cover_image.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_replace_non_alphanumerics() {
        assert_eq!(item_id("text/ch-1.xhtml"), "text_ch_1_xhtml");
        assert_eq!(item_id("images/第一.png"), "images____png");
        assert_eq!(item_id("nav.xhtml"), "nav_xhtml");
    }

    #[test]
    fn colliding_ids_get_suffixes() {
        let mut manifest = Manifest::default();
        assert_eq!(manifest.add("text/a-b.xhtml", XHTML_MEDIA_TYPE, None), "text_a_b_xhtml");
        assert_eq!(manifest.add("text/a_b.xhtml", XHTML_MEDIA_TYPE, None), "text_a_b_xhtml_2");
        assert_eq!(manifest.add("text/a b.xhtml", XHTML_MEDIA_TYPE, None), "text_a_b_xhtml_3");
        assert_eq!(manifest.id_of("text/a_b.xhtml"), Some("text_a_b_xhtml_2"));
    }

    #[test]
    fn hrefs_are_percent_encoded() {
        assert_eq!(href("text/ch1.xhtml"), "text/ch1.xhtml");
        assert_eq!(href("images/my pic.png"), "images/my%20pic.png");
        assert_eq!(href("text/50%#1.xhtml"), "text/50%25%231.xhtml");
    }

    #[test]
    fn archive_paths_live_under_content_root() {
        assert_eq!(archive_path(NAV_PATH), "EPUB/nav.xhtml");
    }
}
