//! EPUB output configuration.

use std::path::{Path, PathBuf};

/// EPUB output configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub struct EPUB {
    /// Output EPUB file path
    pub outfile: PathBuf,
}

impl EPUB {
    /// Write the book for `title` into `dir`, as `book-<title>.epub`.
    pub fn for_title(dir: &Path, title: &str) -> EPUB {
        EPUB {
            outfile: dir.join(output_file_name(title)),
        }
    }
}

/// Name of the output file for a book title. Characters that would leave the
/// output directory or are invalid in file names are replaced with `_`.
pub fn output_file_name(title: &str) -> String {
    let title: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("book-{title}.epub")
}

/// Statistics from rendering an EPUB, used for user feedback.
pub struct RenderStats {
    /// Number of chapters in the EPUB
    pub chapter_count: usize,
    /// Number of images copied into the EPUB
    pub image_count: usize,
    /// Size of the written file in bytes
    pub total_bytes: u64,
}
