//! The in-memory archive and its single finalize step.
//!
//! Generators add named entries to an [`Archive`] while the book is built.
//! Nothing touches the disk until [`ArchiveWriter::finalize`] turns the
//! complete entry set into one binary blob, which [`write_atomically`] then
//! moves into place so a failed run never leaves a half-written book behind.

use anyhow::{Context, Result};
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// MIME type of an EPUB container, stored as the first entry of the zip.
pub const EPUB_MIMETYPE: &str = "application/epub+zip";

/// Ordered mapping from archive path to contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Archive {
    entries: Vec<(String, Vec<u8>)>,
}

impl Archive {
    pub fn new() -> Archive {
        Archive::default()
    }

    /// Add an entry. Adding a path twice replaces the earlier contents but
    /// keeps its position.
    pub fn add<P: ToString, B: Into<Vec<u8>>>(&mut self, path: P, bytes: B) -> &mut Self {
        let path = path.to_string();
        let bytes = bytes.into();
        log::debug!("Adding {path} ({} bytes)", bytes.len());
        match self.entries.iter().position(|(p, _)| *p == path) {
            Some(index) => self.entries[index].1 = bytes,
            None => self.entries.push((path, bytes)),
        }
        self
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.iter().any(|(p, _)| p == path)
    }

    #[cfg(test)]
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, bytes)| bytes.as_slice())
    }

    #[cfg(test)]
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(p, _)| p.as_str())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Serializes a complete archive into its binary form.
pub trait ArchiveWriter {
    fn finalize(&self, archive: &Archive) -> Result<Vec<u8>>;
}

/// Writes an EPUB zip: `mimetype` first and stored, everything else
/// deflated.
#[derive(Debug, Clone, Copy, Default)]
pub struct EpubZip;

impl ArchiveWriter for EpubZip {
    fn finalize(&self, archive: &Archive) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        let stored = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .unix_permissions(0o644);
        let deflated = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        zip.start_file("mimetype", stored)
            .with_context(|| "Failed to start mimetype entry")?;
        zip.write_all(EPUB_MIMETYPE.as_bytes())
            .with_context(|| "Failed to write mimetype entry")?;

        for (path, bytes) in &archive.entries {
            if path == "mimetype" {
                continue;
            }
            zip.start_file(path.as_str(), deflated)
                .with_context(|| format!("Failed to start archive entry: {path}"))?;
            zip.write_all(bytes)
                .with_context(|| format!("Failed to write archive entry: {path}"))?;
        }

        let cursor = zip
            .finish()
            .with_context(|| "Failed to finish EPUB archive")?;
        Ok(cursor.into_inner())
    }
}

/// Mode of a newly written output file.
#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o644;

/// Write `bytes` to `path` through a temporary file in the same directory, so
/// readers see either the previous file or the complete new one. A replaced
/// file keeps its permissions; a new one is created `0644`.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::Builder::new()
        .prefix(".mdepub-")
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    if let Some(permissions) = output_permissions(path) {
        file.as_file()
            .set_permissions(permissions)
            .with_context(|| format!("Failed to set permissions for {}", path.display()))?;
    }
    file.write_all(bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    file.as_file()
        .sync_all()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    file.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to move output into place: {}", path.display()))?;
    Ok(())
}

#[cfg(unix)]
fn output_permissions(path: &Path) -> Option<std::fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(match std::fs::metadata(path) {
        Ok(existing) => existing.permissions(),
        Err(_) => std::fs::Permissions::from_mode(OUTPUT_MODE),
    })
}

#[cfg(not(unix))]
fn output_permissions(path: &Path) -> Option<std::fs::Permissions> {
    std::fs::metadata(path).ok().map(|existing| existing.permissions())
}
