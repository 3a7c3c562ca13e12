//! Core data types: the dataset, its entries, and load-time validation.
//!
//! The dataset is a two-level mapping: category name (`"characters"`,
//! `"locations"`, possibly others) to entry key to [`Entry`]. It is parsed
//! once at startup and never mutated afterwards; everything else in the
//! library works off read-only views of it. Insertion order of both levels
//! is significant and preserved ([`IndexMap`]), because every derived view
//! (index, filter results, file tree) follows dataset order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The two canonical categories. Other categories may appear in a dataset
/// and are carried along, but cross-referencing and the location filter
/// only apply to these two.
pub const CHARACTERS: &str = "characters";
pub const LOCATIONS: &str = "locations";

/// A 2D map coordinate in percent of the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn in_bounds(&self) -> bool {
        (0.0..=100.0).contains(&self.x) && (0.0..=100.0).contains(&self.y)
    }
}

/// One character or location record.
///
/// All attributes are optional in the source document; missing ones
/// normalize to empty defaults here so the rest of the code never has to
/// probe for presence. `location` is only meaningful on characters,
/// `characters` and `position` only on locations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub author: String,

    /// The record's `type` attribute, shown on the content page.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Back-reference to a location entry key (characters only).
    #[serde(default)]
    pub location: Option<String>,

    /// Ordered character entry keys (locations only). May reference keys
    /// that do not exist; resolution skips those.
    #[serde(default)]
    pub characters: Vec<String>,

    /// Map coordinate (locations only). Locations without one simply do
    /// not appear on the map.
    #[serde(default)]
    pub position: Option<Position>,
}

/// The full dataset, category name to keyed entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    pub categories: IndexMap<String, IndexMap<String, Entry>>,
}

impl Dataset {
    /// Parses a dataset from its JSON document. A document that is not a
    /// mapping of mappings is rejected here, so downstream code can assume
    /// the shape.
    pub fn from_json(text: &str) -> crate::error::Result<Self> {
        let dataset: Dataset = serde_json::from_str(text)?;
        Ok(dataset)
    }

    pub fn category(&self, name: &str) -> Option<&IndexMap<String, Entry>> {
        self.categories.get(name)
    }

    pub fn entry(&self, category: &str, key: &str) -> Option<&Entry> {
        self.categories.get(category).and_then(|c| c.get(key))
    }

    pub fn total_entries(&self) -> usize {
        self.categories.values().map(|c| c.len()).sum()
    }

    /// The characters listed by a location, in the location's order,
    /// skipping references to keys that do not exist in the characters
    /// category.
    pub fn characters_in(&self, location_key: &str) -> IndexMap<String, Entry> {
        let mut resolved = IndexMap::new();
        let location = match self.entry(LOCATIONS, location_key) {
            Some(entry) => entry,
            None => return resolved,
        };
        let characters = match self.category(CHARACTERS) {
            Some(characters) => characters,
            None => return resolved,
        };
        for name in &location.characters {
            if let Some(entry) = characters.get(name) {
                resolved.insert(name.clone(), entry.clone());
            }
        }
        resolved
    }

    /// Locations that carry a map coordinate, in dataset order.
    pub fn positioned_locations(&self) -> IndexMap<String, Entry> {
        let mut positioned = IndexMap::new();
        if let Some(locations) = self.category(LOCATIONS) {
            for (key, entry) in locations {
                if entry.position.is_some() {
                    positioned.insert(key.clone(), entry.clone());
                }
            }
        }
        positioned
    }

    /// Reports every tolerated inconsistency: dangling cross-references in
    /// both directions and out-of-range map coordinates. None of these are
    /// fatal anywhere in the library; this exists so `doctor` can surface
    /// them.
    pub fn validate(&self) -> Vec<DatasetWarning> {
        let mut warnings = Vec::new();

        if let Some(characters) = self.category(CHARACTERS) {
            for (key, entry) in characters {
                if let Some(location) = &entry.location {
                    if self.entry(LOCATIONS, location).is_none() {
                        warnings.push(DatasetWarning::DanglingLocation {
                            character: key.clone(),
                            location: location.clone(),
                        });
                    }
                }
            }
        }

        if let Some(locations) = self.category(LOCATIONS) {
            for (key, entry) in locations {
                for name in &entry.characters {
                    if self.entry(CHARACTERS, name).is_none() {
                        warnings.push(DatasetWarning::DanglingCharacter {
                            location: key.clone(),
                            character: name.clone(),
                        });
                    }
                }
                if let Some(position) = &entry.position {
                    if !position.in_bounds() {
                        warnings.push(DatasetWarning::PositionOutOfRange {
                            location: key.clone(),
                            x: position.x,
                            y: position.y,
                        });
                    }
                }
            }
        }

        warnings
    }
}

/// A tolerated dataset inconsistency, reported by [`Dataset::validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetWarning {
    DanglingLocation { character: String, location: String },
    DanglingCharacter { location: String, character: String },
    PositionOutOfRange { location: String, x: f64, y: f64 },
}

impl std::fmt::Display for DatasetWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetWarning::DanglingLocation {
                character,
                location,
            } => write!(
                f,
                "character \"{}\" references unknown location \"{}\"",
                character, location
            ),
            DatasetWarning::DanglingCharacter {
                location,
                character,
            } => write!(
                f,
                "location \"{}\" lists unknown character \"{}\"",
                location, character
            ),
            DatasetWarning::PositionOutOfRange { location, x, y } => write!(
                f,
                "location \"{}\" has position ({}, {}) outside 0-100%",
                location, x, y
            ),
        }
    }
}
