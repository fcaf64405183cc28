use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::toc::LinkStyle;

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "readme-toc.toml";

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Prefix for every generated link
    pub base_url: String,
    pub tree_path: PathBuf,
    pub doc_path: PathBuf,
    pub start_marker: String,
    pub end_marker: String,
    pub links: LinksConfig,
    pub tree: TreeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://ckgod.github.io/ManifestAndroid/".to_string(),
            tree_path: PathBuf::from("Writerside/mi.tree"),
            doc_path: PathBuf::from("README.md"),
            start_marker: "<!-- TOC_START -->".to_string(),
            end_marker: "<!-- TOC_END -->".to_string(),
            links: LinksConfig::default(),
            tree: TreeConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LinksConfig {
    pub source_extension: String,
    pub published_extension: String,
    pub lowercase: bool,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            source_extension: "md".to_string(),
            published_extension: "html".to_string(),
            lowercase: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TreeConfig {
    /// Element name of topic entries in the tree file
    pub element: String,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            element: "toc-element".to_string(),
        }
    }
}

impl Config {
    /// The defaults shipped in `default_config.toml`, which mirror `Default`.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Parse config from TOML text, layered over the shipped defaults.
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self> {
        let to_error = |source| Error::Config {
            path: origin.to_path_buf(),
            source,
        };
        let mut merged: toml::Table = DEFAULT_CONFIG.parse().unwrap_or_default();
        let overlay: toml::Table = content.parse().map_err(to_error)?;
        merge_tables(&mut merged, overlay);
        toml::Value::Table(merged).try_into().map_err(to_error)
    }

    /// Load config from a TOML file that must exist.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml(&content, path)
    }

    /// Load `path` if it exists, or return the compiled defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => {
                let config = Self::from_toml(&content, path)?;
                tracing::debug!(path = %path.display(), "Loaded config");
                Ok(config)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::compiled_default())
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }

    pub fn link_style(&self) -> LinkStyle {
        LinkStyle {
            base_url: self.base_url.clone(),
            source_extension: self.links.source_extension.clone(),
            published_extension: self.links.published_extension.clone(),
            lowercase: self.links.lowercase,
        }
    }

    /// Log settings that are accepted but probably unintended.
    pub fn warn_suspicious(&self) {
        if !self.base_url.is_empty() && !self.base_url.ends_with('/') {
            tracing::warn!(
                base_url = %self.base_url,
                "base_url does not end with '/', links will be joined without a separator"
            );
        }
        if self.start_marker == self.end_marker {
            tracing::warn!(marker = %self.start_marker, "start and end markers are identical");
        }
    }
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(nested) => match base.get_mut(&key) {
                Some(toml::Value::Table(existing)) => merge_tables(existing, nested),
                _ => {
                    base.insert(key, toml::Value::Table(nested));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiled_default_matches_shipped_file() {
        let config = Config::compiled_default();
        assert_eq!(config.base_url, "https://ckgod.github.io/ManifestAndroid/");
        assert_eq!(config.tree_path, PathBuf::from("Writerside/mi.tree"));
        assert_eq!(config.doc_path, PathBuf::from("README.md"));
        assert_eq!(config.start_marker, "<!-- TOC_START -->");
        assert_eq!(config.end_marker, "<!-- TOC_END -->");
        assert!(config.links.lowercase);
        assert_eq!(config.tree.element, "toc-element");
    }

    #[test]
    fn test_default_agrees_with_shipped_file() {
        let shipped: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(shipped, Config::default());
        assert_eq!(Config::compiled_default(), Config::default());
    }

    #[test]
    fn test_from_toml_partial() {
        let toml = r#"
base_url = "https://example.com/docs/"

[links]
lowercase = false
"#;
        let config = Config::from_toml(toml, Path::new("test.toml")).unwrap();
        assert_eq!(config.base_url, "https://example.com/docs/");
        assert!(!config.links.lowercase);
        assert_eq!(config.links.published_extension, "html");
        assert_eq!(config.doc_path, PathBuf::from("README.md"));
        assert_eq!(config.end_marker, "<!-- TOC_END -->");
    }

    #[test]
    fn test_from_toml_rejects_bad_types() {
        let err = Config::from_toml("base_url = 3", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default(Path::new("definitely/not/here.toml")).unwrap();
        assert_eq!(config, Config::compiled_default());
    }

    #[test]
    fn test_load_missing_file_is_source_not_found() {
        let err = Config::load(Path::new("definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, Error::SourceNotFound { .. }));
    }

    #[test]
    fn test_merge_keeps_shipped_defaults() {
        let mut base: toml::Table = DEFAULT_CONFIG.parse().unwrap();
        let overlay: toml::Table = "doc_path = \"docs/INDEX.md\"\n[links]\nlowercase = false"
            .parse()
            .unwrap();
        merge_tables(&mut base, overlay);
        let config: Config = toml::Value::Table(base).try_into().unwrap();

        assert_eq!(config.doc_path, PathBuf::from("docs/INDEX.md"));
        assert!(!config.links.lowercase);
        assert_eq!(config.links.source_extension, "md");
        assert_eq!(config.base_url, "https://ckgod.github.io/ManifestAndroid/");
    }

    #[test]
    fn test_link_style_follows_config() {
        let config = Config {
            base_url: "https://example.com/".to_string(),
            ..Config::default()
        };
        assert_eq!(
            config.link_style().url_for("Intro.md"),
            "https://example.com/intro.html"
        );
    }
}
