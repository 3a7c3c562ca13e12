//! Search and filter over the dataset.
//!
//! Three independent predicates (free-text search, tag, location) are
//! AND-ed over every entry of a category. Results are recomputed from
//! scratch on every state change; the dataset is small and a full pass is
//! simpler to reason about than incremental bookkeeping. Result order is
//! always dataset insertion order.

use crate::model::{self, Dataset, Entry};
use crate::render::{Container, Renderer};
use indexmap::IndexMap;

/// Current predicate selections. Empty string means "not active".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Case-insensitive substring over key, description, author and tags.
    pub search: String,
    /// Exact match against an entry's tag set.
    pub tag: String,
    /// Exact match against a character's location back-reference.
    pub location: String,
}

impl FilterState {
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || !self.tag.is_empty() || !self.location.is_empty()
    }
}

/// A typed filter-change message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterMessage {
    Search(String),
    ClearSearch,
    Tag(String),
    ClearTag,
    Location(String),
    ClearLocation,
    Reset,
}

fn matches(key: &str, entry: &Entry, category: &str, state: &FilterState) -> bool {
    if !state.search.is_empty() {
        let haystack = format!(
            "{} {} {} {}",
            key,
            entry.description,
            entry.author,
            entry.tags.join(" ")
        )
        .to_lowercase();
        if !haystack.contains(&state.search.to_lowercase()) {
            return false;
        }
    }

    if !state.tag.is_empty() && !entry.tags.iter().any(|t| t == &state.tag) {
        return false;
    }

    if !state.location.is_empty()
        && category == model::CHARACTERS
        && entry.location.as_deref() != Some(state.location.as_str())
    {
        return false;
    }

    true
}

/// All entries of `category` passing every active predicate, in dataset
/// order. Unknown categories yield an empty mapping.
pub fn filter_category(
    dataset: &Dataset,
    category: &str,
    state: &FilterState,
) -> IndexMap<String, Entry> {
    let mut filtered = IndexMap::new();
    if let Some(entries) = dataset.category(category) {
        for (key, entry) in entries {
            if matches(key, entry, category, state) {
                filtered.insert(key.clone(), entry.clone());
            }
        }
    }
    filtered
}

/// The summary line for the current result counts: empty when no filter is
/// active, "No results found" when active filters match nothing, otherwise
/// "Found: ..." with singular/plural counts and zero parts omitted.
pub fn stats_line(characters: usize, locations: usize, state: &FilterState) -> String {
    if !state.is_active() {
        return String::new();
    }
    if characters + locations == 0 {
        return "No results found".to_string();
    }
    let mut parts = Vec::new();
    if characters > 0 {
        parts.push(format!(
            "{} character{}",
            characters,
            if characters == 1 { "" } else { "s" }
        ));
    }
    if locations > 0 {
        parts.push(format!(
            "{} location{}",
            locations,
            if locations == 1 { "" } else { "s" }
        ));
    }
    format!("Found: {}", parts.join(", "))
}

/// The selectable filter values a client can offer: every tag from both
/// categories and every location (location keys plus character
/// back-references), each sorted and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub tags: Vec<String>,
    pub locations: Vec<String>,
}

impl FilterOptions {
    pub fn collect(dataset: &Dataset) -> Self {
        let mut tags = std::collections::BTreeSet::new();
        let mut locations = std::collections::BTreeSet::new();

        if let Some(characters) = dataset.category(model::CHARACTERS) {
            for entry in characters.values() {
                tags.extend(entry.tags.iter().cloned());
                if let Some(location) = &entry.location {
                    locations.insert(location.clone());
                }
            }
        }
        if let Some(location_entries) = dataset.category(model::LOCATIONS) {
            for (key, entry) in location_entries {
                locations.insert(key.clone());
                tags.extend(entry.tags.iter().cloned());
            }
        }

        Self {
            tags: tags.into_iter().collect(),
            locations: locations.into_iter().collect(),
        }
    }
}

/// Owns the filter state and drives re-rendering on every change.
#[derive(Debug, Default)]
pub struct FilterEngine {
    state: FilterState,
}

impl FilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Applies one message, recomputes both canonical categories, repaints
    /// the grids that exist on the surface and updates the summary line.
    /// Returns the summary line.
    pub fn apply<R: Renderer>(
        &mut self,
        message: FilterMessage,
        dataset: &Dataset,
        renderer: &mut R,
    ) -> String {
        match message {
            FilterMessage::Search(term) => self.state.search = term,
            FilterMessage::ClearSearch => self.state.search.clear(),
            FilterMessage::Tag(tag) => self.state.tag = tag,
            FilterMessage::ClearTag => self.state.tag.clear(),
            FilterMessage::Location(location) => self.state.location = location,
            FilterMessage::ClearLocation => self.state.location.clear(),
            FilterMessage::Reset => self.state = FilterState::default(),
        }

        let characters = filter_category(dataset, model::CHARACTERS, &self.state);
        let locations = filter_category(dataset, model::LOCATIONS, &self.state);

        let highlight = if self.state.search.is_empty() {
            None
        } else {
            Some(self.state.search.as_str())
        };
        if renderer.has_container(Container::CharactersGrid) {
            renderer.render_card_grid(
                model::CHARACTERS,
                Container::CharactersGrid,
                &characters,
                highlight,
            );
        }
        if renderer.has_container(Container::LocationsGrid) {
            renderer.render_card_grid(
                model::LOCATIONS,
                Container::LocationsGrid,
                &locations,
                highlight,
            );
        }

        let stats = stats_line(characters.len(), locations.len(), &self.state);
        if renderer.has_container(Container::SearchStats) {
            renderer.render_search_stats(&stats);
        }
        stats
    }
}
