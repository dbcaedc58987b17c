//! Fixed captions used by the generated pages, in the book's language.

use crate::markdown::is_chinese;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub cover: &'static str,
    pub title_page: &'static str,
    pub contents: &'static str,
    pub landmarks: &'static str,
    pub title: &'static str,
    pub author: &'static str,
    pub source: &'static str,
    pub generated: &'static str,
    pub unknown: &'static str,
}

const ENGLISH: Labels = Labels {
    cover: "Cover",
    title_page: "Title Page",
    contents: "Table of Contents",
    landmarks: "Landmarks",
    title: "Title",
    author: "Author",
    source: "Source",
    generated: "Generated",
    unknown: "Unknown",
};

const CHINESE: Labels = Labels {
    cover: "封面",
    title_page: "书名页",
    contents: "目录",
    landmarks: "导航",
    title: "书名",
    author: "作者",
    source: "来源",
    generated: "生成时间",
    unknown: "未知",
};

impl Labels {
    pub fn for_language(language: &str) -> Labels {
        if is_chinese(Some(language)) {
            CHINESE
        } else {
            ENGLISH
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_labels_by_language() {
        assert_eq!(Labels::for_language("en").cover, "Cover");
        assert_eq!(Labels::for_language("fr").contents, "Table of Contents");
        assert_eq!(Labels::for_language("zh-CN").contents, "目录");
    }
}
