//! EPUB rendering orchestration.
//!
//! Coordinates the generation of all EPUB components. Chapters are rendered
//! first, then images are copied, then the structural documents are built
//! from the finished chapter and image lists. Everything lands in an
//! in-memory [`Archive`]; the archive is checked against the manifest,
//! finalized into a zip exactly once and written to disk in one step.

mod chapter;
mod container;
mod cover;
mod nav;
mod ncx;
mod package;
mod title_page;

use super::archive::{write_atomically, Archive, ArchiveWriter, EpubZip};
use super::config::{RenderStats, EPUB};
use super::layout::{
    archive_path, Manifest, CONTAINER_PATH, COVER_PATH, NAV_PATH, NCX_PATH, PACKAGE_PATH,
    STYLESHEET_PATH, TITLE_PAGE_PATH,
};
use super::styles::STYLESHEET;
use super::xml::Element;
use crate::book::BuildContext;
use anyhow::{ensure, Context, Result};
use indicatif::ProgressBar;

const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";
const OPS_NS: &str = "http://www.idpf.org/2007/ops";

impl EPUB {
    /// Render the book to an EPUB file.
    ///
    /// Returns statistics about the generated EPUB.
    pub fn render(&self, context: &BuildContext, progress: &ProgressBar) -> Result<RenderStats> {
        let archive = assemble(context, progress)?;

        progress.set_message("Packaging EPUB...");
        let bytes = EpubZip
            .finalize(&archive)
            .with_context(|| "Failed to generate EPUB file")?;
        write_atomically(&self.outfile, &bytes)
            .with_context(|| format!("Failed to write EPUB file: {}", self.outfile.display()))?;

        progress.finish_with_message("EPUB generated");

        Ok(RenderStats {
            chapter_count: context.chapters.len(),
            image_count: context.images.len(),
            total_bytes: bytes.len() as u64,
        })
    }
}

/// Build every entry of the book in memory.
pub fn assemble(context: &BuildContext, progress: &ProgressBar) -> Result<Archive> {
    let mut archive = Archive::new();
    archive.add(CONTAINER_PATH, container::render());

    let options = context.render_options();
    for chapter in &context.chapters {
        progress.set_message(format!("Rendering {}...", chapter.source_path.display()));
        let xhtml = chapter::render(context, chapter, &options);
        archive.add(archive_path(&chapter.rendered_path()), xhtml);
        progress.inc(1);
    }

    for image in &context.images {
        archive.add(archive_path(&image.archive_path()), image.bytes.clone());
    }

    let manifest = Manifest::for_book(context);
    archive
        .add(archive_path(PACKAGE_PATH), package::render(context, &manifest))
        .add(archive_path(NAV_PATH), nav::render(context))
        .add(archive_path(COVER_PATH), cover::render(context))
        .add(archive_path(TITLE_PAGE_PATH), title_page::render(context))
        .add(archive_path(NCX_PATH), ncx::render(context))
        .add(archive_path(STYLESHEET_PATH), STYLESHEET);

    for item in manifest.items() {
        ensure!(
            archive.contains(&archive_path(&item.path)),
            "Manifest item `{}` has no archive entry at {}",
            item.id,
            archive_path(&item.path)
        );
    }

    Ok(archive)
}

/// Wrap a body element in a complete XHTML document.
fn xhtml_page(language: &str, title: &str, stylesheet: &str, body: Element) -> String {
    Element::new("html")
        .attr("xmlns", XHTML_NS)
        .attr("xmlns:epub", OPS_NS)
        .attr("lang", language)
        .attr("xml:lang", language)
        .child(
            Element::new("head")
                .child(Element::new("meta").attr("charset", "UTF-8"))
                .child(Element::with_text("title", title))
                .child(
                    Element::new("link")
                        .attr("rel", "stylesheet")
                        .attr("type", "text/css")
                        .attr("href", stylesheet),
                ),
        )
        .child(body)
        .to_document(Some("<!DOCTYPE html>"))
}
