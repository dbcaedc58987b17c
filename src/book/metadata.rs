//! Book-level metadata and the `metadata.json` sidecar.
//!
//! Every field resolves through the same layers, highest precedence first:
//! the sidecar file, the command line, the configuration files, then a
//! hard-coded fallback. The first run in a directory writes the resolved
//! values to the sidecar so later runs read back exactly the same book; the
//! sidecar is never rewritten once it exists.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;

/// Name of the sidecar file in the book directory.
pub const METADATA_FILE: &str = "metadata.json";

/// Cover image used when nothing else names one.
pub const DEFAULT_COVER: &str = "cover.jpg";

/// Resolved book metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Language tag, e.g. `en` or `zh`. Drives the soft-break policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub cover_image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// The sidecar as written by a user: any field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
struct SidecarMetadata {
    title: Option<String>,
    author: Option<String>,
    language: Option<String>,
    cover_image: Option<String>,
    description: Option<String>,
    tags: Option<Vec<String>>,
}

/// Values from the command line, already merged over configuration defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub title: Option<String>,
    pub author: Option<String>,
    pub language: Option<String>,
    pub cover_image: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl Metadata {
    /// Load the sidecar from `root`, or synthesize and persist it if it is
    /// missing.
    pub fn resolve(root: &Path, overrides: &Overrides) -> Result<Metadata> {
        let path = root.join(METADATA_FILE);
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let sidecar: SidecarMetadata = serde_json::from_str(&contents)
                    .with_context(|| format!("Failed to parse {}", path.display()))?;
                log::debug!("Loaded book metadata from {}", path.display());
                Ok(Metadata::from_layers(sidecar, overrides, root))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let metadata = Metadata::from_layers(SidecarMetadata::default(), overrides, root);
                metadata.save(&path)?;
                log::info!("Wrote book metadata to {}", path.display());
                Ok(metadata)
            }
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn from_layers(sidecar: SidecarMetadata, overrides: &Overrides, root: &Path) -> Metadata {
        let overrides = overrides.clone();
        Metadata {
            title: sidecar
                .title
                .or(overrides.title)
                .unwrap_or_else(|| directory_name(root)),
            author: sidecar.author.or(overrides.author),
            language: sidecar.language.or(overrides.language),
            cover_image: sidecar
                .cover_image
                .or(overrides.cover_image)
                .unwrap_or_else(|| DEFAULT_COVER.to_string()),
            description: sidecar.description.or(overrides.description),
            tags: sidecar.tags.or(overrides.tags).unwrap_or_default(),
        }
    }

    /// Write the metadata as 2-space indented JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize metadata")?;
        contents.push('\n');
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// Name of the directory containing the book, used as the fallback title.
fn directory_name(root: &Path) -> String {
    root.canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|s| s.to_string_lossy().to_string()))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "Untitled".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book_dir(name: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let root = dir.path().join(name);
        std::fs::create_dir(&root).expect("can create book dir");
        (dir, root)
    }

    #[test]
    fn synthesizes_sidecar_with_fallbacks() {
        let (_dir, root) = book_dir("my-novel");
        let metadata = Metadata::resolve(&root, &Overrides::default()).expect("can resolve");

        assert_eq!(metadata.title, "my-novel");
        assert_eq!(metadata.cover_image, "cover.jpg");
        assert_eq!(metadata.author, None);
        assert!(metadata.tags.is_empty());

        let written = std::fs::read_to_string(root.join(METADATA_FILE)).expect("sidecar exists");
        assert_eq!(
            written,
            "{\n  \"title\": \"my-novel\",\n  \"cover_image\": \"cover.jpg\"\n}\n"
        );
    }

    #[test]
    fn synthesizes_sidecar_from_overrides() {
        let (_dir, root) = book_dir("book");
        let overrides = Overrides {
            title: Some("Moby Dick".to_string()),
            author: Some("Herman Melville".to_string()),
            language: Some("en".to_string()),
            cover_image: Some("whale.png".to_string()),
            description: Some("A whale of a tale".to_string()),
            tags: Some(vec!["sea".to_string(), "classic".to_string()]),
        };
        let metadata = Metadata::resolve(&root, &overrides).expect("can resolve");
        assert_eq!(metadata.title, "Moby Dick");
        assert_eq!(metadata.cover_image, "whale.png");
        assert_eq!(metadata.tags, vec!["sea", "classic"]);

        let reread: Metadata = serde_json::from_str(
            &std::fs::read_to_string(root.join(METADATA_FILE)).expect("sidecar exists"),
        )
        .expect("sidecar is valid json");
        assert_eq!(reread, metadata);
    }

    #[test]
    fn sidecar_wins_over_overrides_field_by_field() {
        let (_dir, root) = book_dir("book");
        std::fs::write(
            root.join(METADATA_FILE),
            r#"{ "title": "From Sidecar", "tags": [] }"#,
        )
        .expect("can write sidecar");

        let overrides = Overrides {
            title: Some("From CLI".to_string()),
            author: Some("CLI Author".to_string()),
            tags: Some(vec!["cli".to_string()]),
            ..Default::default()
        };
        let metadata = Metadata::resolve(&root, &overrides).expect("can resolve");
        assert_eq!(metadata.title, "From Sidecar");
        assert_eq!(metadata.author.as_deref(), Some("CLI Author"));
        assert!(metadata.tags.is_empty());
        assert_eq!(metadata.cover_image, "cover.jpg");
    }

    #[test]
    fn existing_sidecar_is_never_rewritten() {
        let (_dir, root) = book_dir("book");
        let original = "{\"title\":\"Compact\"}";
        std::fs::write(root.join(METADATA_FILE), original).expect("can write sidecar");

        let overrides = Overrides {
            author: Some("Someone".to_string()),
            ..Default::default()
        };
        Metadata::resolve(&root, &overrides).expect("can resolve");
        let after = std::fs::read_to_string(root.join(METADATA_FILE)).expect("sidecar exists");
        assert_eq!(after, original);
    }

    #[test]
    fn repeated_runs_are_reproducible() {
        let (_dir, root) = book_dir("book");
        let overrides = Overrides {
            author: Some("A. Writer".to_string()),
            ..Default::default()
        };
        let first = Metadata::resolve(&root, &overrides).expect("first run");
        let written = std::fs::read_to_string(root.join(METADATA_FILE)).expect("sidecar exists");

        let second = Metadata::resolve(&root, &Overrides::default()).expect("second run");
        let rewritten = std::fs::read_to_string(root.join(METADATA_FILE)).expect("sidecar exists");
        assert_eq!(first, second);
        assert_eq!(written, rewritten);
    }

    #[test]
    fn malformed_sidecar_is_fatal() {
        let (_dir, root) = book_dir("book");
        std::fs::write(root.join(METADATA_FILE), "{ not json").expect("can write sidecar");
        let err = Metadata::resolve(&root, &Overrides::default()).expect_err("must fail");
        assert!(format!("{err:#}").contains(METADATA_FILE));
    }
}
