//! Dataset backends.
//!
//! The dataset and the per-entry content pages come from a single
//! read-only source, abstracted behind [`DatasetSource`] so the core can
//! be exercised without a filesystem:
//!
//! - [`fs::FileSource`]: production, a site root directory holding the
//!   dataset document and the content pages at their normalized paths.
//! - [`memory::InMemorySource`]: tests, a dataset value plus a page map.
//!
//! A source is consulted exactly twice per concern: once for the dataset
//! at startup (a failure there is the fatal initialization error) and once
//! per explorer navigation for a content page (a failure there is
//! recoverable and rendered inline).

use crate::error::Result;
use crate::model::Dataset;

pub mod fs;
pub mod memory;

pub trait DatasetSource {
    /// Load and parse the dataset document.
    fn load(&self) -> Result<Dataset>;

    /// Read one content page by its normalized path.
    fn read_page(&self, path: &str) -> Result<String>;
}
