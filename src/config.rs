//! User-level defaults loaded from JSON configuration files.

use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Defaults applied when neither the command line nor the book's sidecar
/// provides a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Defaults {
    pub default_author: Option<String>,
    pub default_cover: Option<String>,
    pub default_description: Option<String>,
    pub default_language: Option<String>,
    pub default_tags: Option<Vec<String>>,
    pub default_title: Option<String>,
    pub default_verbose: Option<bool>,
    /// Render soft line breaks as `<br />`
    pub default_line_breaks: Option<bool>,
}

impl Defaults {
    /// Layer `other` over `self`, field by field.
    pub fn merge(self, other: Defaults) -> Defaults {
        Defaults {
            default_author: other.default_author.or(self.default_author),
            default_cover: other.default_cover.or(self.default_cover),
            default_description: other.default_description.or(self.default_description),
            default_language: other.default_language.or(self.default_language),
            default_tags: other.default_tags.or(self.default_tags),
            default_title: other.default_title.or(self.default_title),
            default_verbose: other.default_verbose.or(self.default_verbose),
            default_line_breaks: other.default_line_breaks.or(self.default_line_breaks),
        }
    }

    pub fn verbose(&self) -> bool {
        self.default_verbose.unwrap_or(false)
    }

    pub fn line_breaks(&self) -> bool {
        self.default_line_breaks.unwrap_or(false)
    }
}

/// Configuration files in ascending precedence.
pub fn candidate_paths() -> Vec<PathBuf> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let xdg = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home.as_ref().map(|home| home.join(".config")));

    let mut paths = vec![PathBuf::from("/etc/mdepub.json")];
    if let Some(home) = &home {
        paths.push(home.join(".mdepub.json"));
    }
    if let Some(xdg) = xdg {
        paths.push(xdg.join("mdepub").join("config.json"));
    }
    paths
}

/// Load and merge every readable configuration file. Missing files are
/// skipped; unreadable or malformed ones are reported and skipped.
pub fn load<P: AsRef<Path>>(paths: &[P]) -> Defaults {
    paths
        .iter()
        .filter_map(|path| load_file(path.as_ref()))
        .fold(Defaults::default(), Defaults::merge)
}

fn load_file(path: &Path) -> Option<Defaults> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            log::warn!("Skipping configuration {}: {e}", path.display());
            return None;
        }
    };
    match serde_json::from_str(&contents) {
        Ok(defaults) => {
            log::debug!("Loaded configuration from {}", path.display());
            Some(defaults)
        }
        Err(e) => {
            log::warn!("Skipping malformed configuration {}: {e}", path.display());
            None
        }
    }
}
