use anyhow::{Context, Result};
use std::path::Path;

/// Why an image ended up in the book. When the same file plays several roles,
/// the greatest one is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ImageRole {
    /// Referenced from the body of some chapter
    Inline,
    /// Shares its base name with a chapter
    Companion,
    /// The cover named in the book metadata
    Cover,
}

/// A binary asset copied verbatim into the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// File name of the image, which is also its name inside the archive
    pub file_name: String,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
    pub role: ImageRole,
}

impl Image {
    pub fn new<S: ToString>(file_name: S, bytes: Vec<u8>, role: ImageRole) -> Image {
        let file_name = file_name.to_string();
        Image {
            media_type: media_type(&file_name),
            file_name,
            bytes,
            role,
        }
    }

    /// Read an image relative to the book's root directory.
    pub fn load(root: &Path, name: &str, role: ImageRole) -> Result<Image> {
        let path = root.join(name);
        let bytes = std::fs::read(&path)
            .with_context(|| format!("Failed to read image: {}", path.display()))?;
        let file_name = Path::new(name)
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| name.to_string());
        Ok(Image::new(file_name, bytes, role))
    }

    /// Path of the image relative to the archive's content root.
    pub fn archive_path(&self) -> String {
        format!("images/{}", self.file_name)
    }
}

/// Determine MIME type from file extension.
pub fn media_type(file_name: &str) -> &'static str {
    match Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
