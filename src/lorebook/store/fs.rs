use super::DatasetSource;
use crate::error::{LorebookError, Result};
use crate::model::Dataset;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// A site root on disk: the dataset document plus content pages stored at
/// their normalized paths (`characters/dent.html`).
pub struct FileSource {
    root: PathBuf,
    dataset_file: String,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            dataset_file: crate::config::DEFAULT_DATASET_FILE.to_string(),
        }
    }

    pub fn with_dataset_file(mut self, name: &str) -> Self {
        self.dataset_file = name.to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.root.join(&self.dataset_file)
    }

    /// Normalized paths are always relative and must stay inside the site
    /// root.
    fn page_path(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes {
            return Err(LorebookError::Store(format!(
                "Invalid page path: {}",
                path
            )));
        }
        Ok(self.root.join(relative))
    }
}

impl DatasetSource for FileSource {
    fn load(&self) -> Result<Dataset> {
        let text = fs::read_to_string(self.dataset_path()).map_err(|e| {
            LorebookError::Store(format!(
                "Cannot read {}: {}",
                self.dataset_path().display(),
                e
            ))
        })?;
        Dataset::from_json(&text)
    }

    fn read_page(&self, path: &str) -> Result<String> {
        let full = self.page_path(path)?;
        if !full.is_file() {
            return Err(LorebookError::PageNotFound(path.to_string()));
        }
        Ok(fs::read_to_string(full)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("properties.json"),
            r#"{"characters": {"Dent": {"description": "hero"}}, "locations": {}}"#,
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("characters")).unwrap();
        fs::write(
            dir.path().join("characters/dent.html"),
            "<p>So long</p>",
        )
        .unwrap();
        dir
    }

    #[test]
    fn loads_dataset_from_root() {
        let dir = site();
        let source = FileSource::new(dir.path());
        let dataset = source.load().unwrap();
        assert_eq!(dataset.total_entries(), 1);
    }

    #[test]
    fn missing_dataset_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileSource::new(dir.path()).load().is_err());
    }

    #[test]
    fn malformed_dataset_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("properties.json"), "not json").unwrap();
        assert!(FileSource::new(dir.path()).load().is_err());
    }

    #[test]
    fn reads_pages_and_reports_missing_ones() {
        let dir = site();
        let source = FileSource::new(dir.path());
        assert_eq!(
            source.read_page("characters/dent.html").unwrap(),
            "<p>So long</p>"
        );
        assert!(matches!(
            source.read_page("characters/zaphod.html"),
            Err(LorebookError::PageNotFound(_))
        ));
    }

    #[test]
    fn rejects_escaping_paths() {
        let dir = site();
        let source = FileSource::new(dir.path());
        assert!(source.read_page("../etc/passwd").is_err());
        assert!(source.read_page("/etc/passwd").is_err());
    }

    #[test]
    fn custom_dataset_file_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("world.json"), r#"{"characters": {}}"#).unwrap();
        let source = FileSource::new(dir.path()).with_dataset_file("world.json");
        assert!(source.load().is_ok());
    }
}
