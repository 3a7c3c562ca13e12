//! The render collaborator seam.
//!
//! The core never paints anything itself. It computes data (filtered
//! mappings, resolved entries, marker lists) and hands it to a [`Renderer`].
//! The terminal client implements this trait for real output; tests use
//! [`RecordingRenderer`] to assert on what the core asked for.
//!
//! A renderer also describes the document surface it stands for: which
//! optional containers exist (a missing container means "skip that render
//! step", never an error), whether the surface holds all logical pages at
//! once, and the document's file name when it does not.

use crate::model::{Dataset, Entry};
use crate::router::Page;
use indexmap::IndexMap;

/// Optional mount points a document surface may or may not provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    CharactersGrid,
    LocationsGrid,
    FileTree,
    SearchStats,
    MapMarkers,
}

pub trait Renderer {
    /// Whether the given mount point exists on this surface.
    fn has_container(&self, container: Container) -> bool;

    /// True when the surface holds every logical page as a togglable
    /// container. Checked once at startup for mode detection.
    fn has_page_containers(&self) -> bool;

    /// The current document's file name, for page identity when the
    /// surface is a single standalone document.
    fn document_name(&self) -> &str;

    /// Mark one page active and every other page inactive, including
    /// navigation-link highlighting.
    fn set_active_page(&mut self, page: &Page);

    /// Paint a card grid. `highlight` carries the active search term, if
    /// any, for match emphasis.
    fn render_card_grid(
        &mut self,
        category: &str,
        container: Container,
        items: &IndexMap<String, Entry>,
        highlight: Option<&str>,
    );

    /// Paint the explorer file tree for the whole dataset.
    fn render_file_tree(&mut self, dataset: &Dataset);

    /// Paint one resolved entry with its loaded content document.
    fn render_content(&mut self, key: &str, category: &str, entry: &Entry, content: &str);

    /// Paint an inline error in the content area.
    fn render_error(&mut self, message: &str);

    /// Paint map markers for the given positioned locations.
    fn render_map_markers(&mut self, locations: &IndexMap<String, Entry>);

    /// Update the search summary line. An empty string clears it.
    fn render_search_stats(&mut self, text: &str);
}

/// What a [`RecordingRenderer`] saw, in call order.
#[cfg(any(test, feature = "test_utils"))]
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    ActivePage(Page),
    CardGrid {
        category: String,
        keys: Vec<String>,
        highlight: Option<String>,
    },
    FileTree {
        categories: Vec<String>,
    },
    Content {
        key: String,
        category: String,
    },
    Error(String),
    MapMarkers {
        keys: Vec<String>,
    },
    SearchStats(String),
}

/// Test renderer that records every call and pretends to be whatever
/// surface the test configures.
#[cfg(any(test, feature = "test_utils"))]
pub struct RecordingRenderer {
    containers: Vec<Container>,
    document: String,
    spa: bool,
    pub events: Vec<RenderEvent>,
}

#[cfg(any(test, feature = "test_utils"))]
impl RecordingRenderer {
    /// A single-document surface holding every page container.
    pub fn spa() -> Self {
        Self {
            containers: vec![
                Container::CharactersGrid,
                Container::LocationsGrid,
                Container::FileTree,
                Container::SearchStats,
                Container::MapMarkers,
            ],
            document: "index.html".to_string(),
            spa: true,
            events: Vec::new(),
        }
    }

    /// A standalone document with just the given mount points.
    pub fn document(name: &str, containers: &[Container]) -> Self {
        Self {
            containers: containers.to_vec(),
            document: name.to_string(),
            spa: false,
            events: Vec::new(),
        }
    }

    pub fn count<F: Fn(&RenderEvent) -> bool>(&self, pred: F) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

#[cfg(any(test, feature = "test_utils"))]
impl Renderer for RecordingRenderer {
    fn has_container(&self, container: Container) -> bool {
        self.containers.contains(&container)
    }

    fn has_page_containers(&self) -> bool {
        self.spa
    }

    fn document_name(&self) -> &str {
        &self.document
    }

    fn set_active_page(&mut self, page: &Page) {
        self.events.push(RenderEvent::ActivePage(page.clone()));
    }

    fn render_card_grid(
        &mut self,
        category: &str,
        _container: Container,
        items: &IndexMap<String, Entry>,
        highlight: Option<&str>,
    ) {
        self.events.push(RenderEvent::CardGrid {
            category: category.to_string(),
            keys: items.keys().cloned().collect(),
            highlight: highlight.map(|t| t.to_string()),
        });
    }

    fn render_file_tree(&mut self, dataset: &Dataset) {
        self.events.push(RenderEvent::FileTree {
            categories: dataset.categories.keys().cloned().collect(),
        });
    }

    fn render_content(&mut self, key: &str, category: &str, _entry: &Entry, _content: &str) {
        self.events.push(RenderEvent::Content {
            key: key.to_string(),
            category: category.to_string(),
        });
    }

    fn render_error(&mut self, message: &str) {
        self.events.push(RenderEvent::Error(message.to_string()));
    }

    fn render_map_markers(&mut self, locations: &IndexMap<String, Entry>) {
        self.events.push(RenderEvent::MapMarkers {
            keys: locations.keys().cloned().collect(),
        });
    }

    fn render_search_stats(&mut self, text: &str) {
        self.events.push(RenderEvent::SearchStats(text.to_string()));
    }
}
