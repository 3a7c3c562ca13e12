//! The derived path index and search-match segmentation.
//!
//! Every entry gets exactly one index record under its normalized path
//! `category/key.html` with the key lowercased. The original key casing is
//! kept in the record for display. The index is rebuilt from the dataset in
//! one pass (in practice once, right after load) and the router only ever
//! reads it.

use crate::model::{Dataset, Entry};
use indexmap::IndexMap;

/// One resolved index record.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    /// Entry key with its original casing.
    pub key: String,
    pub category: String,
    pub entry: Entry,
}

/// Normalized path to index record, in dataset order.
pub type PathIndex = IndexMap<String, IndexEntry>;

/// The normalized path for an entry.
pub fn entry_path(category: &str, key: &str) -> String {
    format!("{}/{}.html", category, key.to_lowercase())
}

/// Builds the flat lookup table for every (category, key, entry) triple.
///
/// Two keys in the same category differing only by case collide on the
/// normalized path; the later one wins, deterministically, because
/// iteration follows dataset insertion order.
pub fn build_index(dataset: &Dataset) -> PathIndex {
    let mut index = PathIndex::new();
    for (category, entries) in &dataset.categories {
        for (key, entry) in entries {
            index.insert(
                entry_path(category, key),
                IndexEntry {
                    key: key.clone(),
                    category: category.clone(),
                    entry: entry.clone(),
                },
            );
        }
    }
    index
}

/// A piece of text split around search matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchSegment {
    Plain(String),
    Match(String),
}

/// Splits `text` into plain and matched segments for every
/// case-insensitive occurrence of `term`. With no term, or no occurrence,
/// the whole text comes back as one plain segment.
pub fn highlight_segments(text: &str, term: &str) -> Vec<MatchSegment> {
    if term.is_empty() || text.is_empty() {
        return vec![MatchSegment::Plain(text.to_string())];
    }

    // Lowercasing can change byte lengths, so keep a byte-offset map from
    // the lowercased haystack back into the original.
    let mut lower = String::with_capacity(text.len());
    let mut offsets = Vec::with_capacity(text.len() + 1);
    for (byte_idx, ch) in text.char_indices() {
        for low in ch.to_lowercase() {
            for _ in 0..low.len_utf8() {
                offsets.push(byte_idx);
            }
            lower.push(low);
        }
    }
    offsets.push(text.len());

    let term_lower = term.to_lowercase();
    let mut segments = Vec::new();
    let mut cursor = 0;
    let mut search_from = 0;
    while let Some(found) = lower[search_from..].find(&term_lower) {
        let lower_start = search_from + found;
        let start = offsets[lower_start];
        let mut end = offsets[lower_start + term_lower.len()];
        if end <= start {
            // A match ending inside a multi-char lowercase expansion snaps
            // to the end of the originating character.
            let ch_len = text[start..].chars().next().map_or(0, |c| c.len_utf8());
            end = start + ch_len;
        }
        if start > cursor {
            segments.push(MatchSegment::Plain(text[cursor..start].to_string()));
        }
        segments.push(MatchSegment::Match(text[start..end].to_string()));
        cursor = end;
        search_from = lower_start + term_lower.len().max(1);
        if search_from >= lower.len() {
            break;
        }
    }
    if cursor < text.len() {
        segments.push(MatchSegment::Plain(text[cursor..].to_string()));
    }
    if segments.is_empty() {
        segments.push(MatchSegment::Plain(text.to_string()));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Dataset;

    fn sample() -> Dataset {
        Dataset::from_json(
            r#"{
                "characters": {
                    "Dent": {"description": "hero"},
                    "Marvin": {}
                },
                "locations": {
                    "ProtocolW": {"position": {"x": 1.0, "y": 2.0}}
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn one_record_per_entry() {
        let dataset = sample();
        let index = build_index(&dataset);
        assert_eq!(index.len(), dataset.total_entries());
        assert!(index.contains_key("characters/dent.html"));
        assert!(index.contains_key("characters/marvin.html"));
        assert!(index.contains_key("locations/protocolw.html"));
    }

    #[test]
    fn original_casing_preserved() {
        let index = build_index(&sample());
        let record = &index["locations/protocolw.html"];
        assert_eq!(record.key, "ProtocolW");
        assert_eq!(record.category, "locations");
    }

    #[test]
    fn index_follows_dataset_order() {
        let index = build_index(&sample());
        let paths: Vec<&String> = index.keys().collect();
        assert_eq!(
            paths,
            vec![
                "characters/dent.html",
                "characters/marvin.html",
                "locations/protocolw.html"
            ]
        );
    }

    #[test]
    fn build_is_idempotent() {
        let dataset = sample();
        assert_eq!(build_index(&dataset), build_index(&dataset));
    }

    #[test]
    fn case_collisions_last_write_wins() {
        let dataset = Dataset::from_json(
            r#"{"characters": {"Dent": {"description": "a"}, "DENT": {"description": "b"}}}"#,
        )
        .unwrap();
        let index = build_index(&dataset);
        assert_eq!(index.len(), 1);
        let record = &index["characters/dent.html"];
        assert_eq!(record.key, "DENT");
        assert_eq!(record.entry.description, "b");
    }

    #[test]
    fn highlight_finds_case_insensitive_matches() {
        let segments = highlight_segments("Dent of Protocol", "dent");
        assert_eq!(
            segments,
            vec![
                MatchSegment::Match("Dent".to_string()),
                MatchSegment::Plain(" of Protocol".to_string()),
            ]
        );
    }

    #[test]
    fn highlight_multiple_occurrences() {
        let segments = highlight_segments("aXbXc", "x");
        assert_eq!(
            segments,
            vec![
                MatchSegment::Plain("a".to_string()),
                MatchSegment::Match("X".to_string()),
                MatchSegment::Plain("b".to_string()),
                MatchSegment::Match("X".to_string()),
                MatchSegment::Plain("c".to_string()),
            ]
        );
    }

    #[test]
    fn highlight_without_term_is_plain() {
        assert_eq!(
            highlight_segments("abc", ""),
            vec![MatchSegment::Plain("abc".to_string())]
        );
        assert_eq!(
            highlight_segments("abc", "zz"),
            vec![MatchSegment::Plain("abc".to_string())]
        );
    }
}
