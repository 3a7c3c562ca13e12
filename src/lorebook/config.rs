use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "lorebook.json";
pub const DEFAULT_DATASET_FILE: &str = "properties.json";
const DEFAULT_PEEK_LINES: usize = 3;

/// Site configuration, stored next to the dataset in `lorebook.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteConfig {
    /// File name of the dataset document inside the site root.
    #[serde(default = "default_dataset_file")]
    pub dataset_file: String,

    /// Lines shown at each end of a peeked content page.
    #[serde(default = "default_peek_lines")]
    pub peek_lines: usize,
}

fn default_dataset_file() -> String {
    DEFAULT_DATASET_FILE.to_string()
}

fn default_peek_lines() -> usize {
    DEFAULT_PEEK_LINES
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            dataset_file: default_dataset_file(),
            peek_lines: default_peek_lines(),
        }
    }
}

impl SiteConfig {
    /// Load config from the site root, or return defaults if not found.
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self> {
        let config_path = root.as_ref().join(CONFIG_FILENAME);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&config_path)?;
        let config: SiteConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config into the site root.
    pub fn save<P: AsRef<Path>>(&self, root: P) -> Result<()> {
        let root = root.as_ref();
        if !root.exists() {
            fs::create_dir_all(root)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(root.join(CONFIG_FILENAME), content)?;
        Ok(())
    }
}

/// Resolves the site root from a starting directory, once at startup.
/// Walks up the ancestors looking for a config file or a dataset
/// document, the way a site hosted under a sub-path anchors all of its
/// links to one detected prefix.
pub fn discover_root(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        if dir.join(CONFIG_FILENAME).is_file() || dir.join(DEFAULT_DATASET_FILE).is_file() {
            return Some(dir.to_path_buf());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.dataset_file, "properties.json");
        assert_eq!(config.peek_lines, 3);
    }

    #[test]
    fn load_missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::load(dir.path()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig {
            dataset_file: "world.json".to_string(),
            peek_lines: 5,
        };
        config.save(dir.path()).unwrap();
        assert_eq!(SiteConfig::load(dir.path()).unwrap(), config);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"dataset_file": "world.json"}"#,
        )
        .unwrap();
        let config = SiteConfig::load(dir.path()).unwrap();
        assert_eq!(config.dataset_file, "world.json");
        assert_eq!(config.peek_lines, 3);
    }

    #[test]
    fn discover_walks_up_to_the_dataset() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(DEFAULT_DATASET_FILE), "{}").unwrap();
        let nested = dir.path().join("characters/deep");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(
            discover_root(&nested),
            Some(dir.path().to_path_buf())
        );
    }

    #[test]
    fn discover_without_site_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("empty");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(discover_root(&nested), None);
    }
}
