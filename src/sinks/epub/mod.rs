//! EPUB generation for Markdown books.
//!
//! This module converts a [`BuildContext`](crate::book::BuildContext) into an
//! EPUB 3 ebook with:
//! - Cover page showing the cover image, or the title when there is none
//! - Title page with the book's details
//! - Navigation document and legacy NCX table of contents
//! - One XHTML document per Markdown chapter, in file name order
//!
//! The package document also carries an EPUB 2 guide and cover meta so older
//! readers find the same cover and contents.

mod archive;
mod config;
mod labels;
mod layout;
mod rendering;
mod styles;
mod xml;

pub use config::EPUB;
