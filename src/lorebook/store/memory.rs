use super::DatasetSource;
use crate::error::{LorebookError, Result};
use crate::model::Dataset;
use std::collections::HashMap;

/// In-memory source for tests: a dataset value plus a page map.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    dataset: Dataset,
    pages: HashMap<String, String>,
}

impl InMemorySource {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            pages: HashMap::new(),
        }
    }

    pub fn with_page(mut self, path: &str, content: &str) -> Self {
        self.pages.insert(path.to_string(), content.to_string());
        self
    }
}

impl DatasetSource for InMemorySource {
    fn load(&self) -> Result<Dataset> {
        Ok(self.dataset.clone())
    }

    fn read_page(&self, path: &str) -> Result<String> {
        self.pages
            .get(path)
            .cloned()
            .ok_or_else(|| LorebookError::PageNotFound(path.to_string()))
    }
}

/// A source whose load always fails, for fatal-initialization tests.
#[cfg(any(test, feature = "test_utils"))]
#[derive(Debug, Default)]
pub struct FailingSource;

#[cfg(any(test, feature = "test_utils"))]
impl DatasetSource for FailingSource {
    fn load(&self) -> Result<Dataset> {
        Err(LorebookError::Store("dataset unavailable".to_string()))
    }

    fn read_page(&self, path: &str) -> Result<String> {
        Err(LorebookError::PageNotFound(path.to_string()))
    }
}
