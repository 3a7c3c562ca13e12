//! The terminal surface: a [`Renderer`] that paints the wiki as text.
//!
//! A `TermRenderer` stands for one document. `browse()` builds the
//! all-pages surface used by the interactive session; `document()` builds
//! a standalone page with just the mount points that page carries, the
//! way each wiki page only includes the features it hosts.

use crate::cli::styles;
use indexmap::IndexMap;
use lorebook::index::{entry_path, highlight_segments, MatchSegment};
use lorebook::model::{Dataset, Entry};
use lorebook::peek::{preview, strip_tags};
use lorebook::render::{Container, Renderer};
use lorebook::router::Page;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const KEY_WIDTH: usize = 22;
const MAP_COLS: usize = 48;
const MAP_ROWS: usize = 12;

pub struct TermRenderer {
    containers: Vec<Container>,
    document: String,
    spa: bool,
    peek: Option<usize>,
}

impl TermRenderer {
    /// The interactive surface: one document holding every page.
    pub fn browse() -> Self {
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
            peek: None,
        }
    }

    /// A standalone document with the given mount points.
    pub fn document(name: &str, containers: &[Container]) -> Self {
        Self {
            containers: containers.to_vec(),
            document: name.to_string(),
            spa: false,
            peek: None,
        }
    }

    pub fn with_peek(mut self, lines: usize) -> Self {
        self.peek = Some(lines);
        self
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if current + w > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(ch);
        current += w;
    }
    result
}

/// Applies match emphasis to `text`, keeping the plain text's width.
fn emphasized(text: &str, highlight: Option<&str>) -> String {
    match highlight {
        None => text.to_string(),
        Some(term) => highlight_segments(text, term)
            .iter()
            .map(|segment| match segment {
                MatchSegment::Plain(s) => s.clone(),
                MatchSegment::Match(s) => styles::MATCH.apply_to(s).to_string(),
            })
            .collect(),
    }
}

impl Renderer for TermRenderer {
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
        println!();
        println!(
            "{}",
            styles::HEADING.apply_to(format!("══ {} ══", capitalize(page.id())))
        );
    }

    fn render_card_grid(
        &mut self,
        category: &str,
        _container: Container,
        items: &IndexMap<String, Entry>,
        highlight: Option<&str>,
    ) {
        println!();
        println!("{}", styles::TITLE.apply_to(capitalize(category)));
        if items.is_empty() {
            println!("  {}", styles::LINK.apply_to("No results found"));
            return;
        }
        for (key, entry) in items {
            let name = capitalize(key);
            let name_width = name.width();
            let padding = " ".repeat(KEY_WIDTH.saturating_sub(name_width));

            let tags = if entry.tags.is_empty() {
                String::new()
            } else {
                format!("[{}]", entry.tags.join(", "))
            };
            let available = LINE_WIDTH
                .saturating_sub(4 + KEY_WIDTH.max(name_width) + 2 + tags.width());
            let description = truncate_to_width(&entry.description, available);

            println!(
                "  ▪ {}{}  {} {}",
                emphasized(&name, highlight),
                padding,
                emphasized(&description, highlight),
                styles::LINK.apply_to(tags)
            );
        }
    }

    fn render_file_tree(&mut self, dataset: &Dataset) {
        println!();
        for (category, entries) in &dataset.categories {
            println!("{}/", styles::TITLE.apply_to(capitalize(category)));
            let last = entries.len().saturating_sub(1);
            for (i, key) in entries.keys().enumerate() {
                let branch = if i == last { "└─" } else { "├─" };
                let path = entry_path(category, key);
                println!(
                    "  {} {}  {}",
                    branch,
                    capitalize(key),
                    styles::LINK.apply_to(format!("#/explorer/{}", path))
                );
            }
        }
    }

    fn render_content(&mut self, key: &str, _category: &str, entry: &Entry, content: &str) {
        let dash = "—";
        let tags = entry
            .tags
            .iter()
            .filter(|t| !t.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");

        println!();
        println!("{}", styles::TITLE.apply_to(capitalize(key)));
        println!("{}", "─".repeat(32));
        println!("Type:    {}", entry.kind.as_deref().unwrap_or(dash));
        println!(
            "Author:  {}",
            if entry.author.is_empty() {
                dash
            } else {
                entry.author.as_str()
            }
        );
        println!(
            "Tags:    {}",
            if tags.is_empty() { dash } else { tags.as_str() }
        );
        println!();

        match self.peek {
            Some(window) => {
                let page = preview(content, window);
                for line in &page.head {
                    println!("  {}", line);
                }
                if page.is_truncated() {
                    println!(
                        "  {}",
                        styles::LINK
                            .apply_to(format!("… {} lines not shown …", page.hidden))
                    );
                    for line in &page.tail {
                        println!("  {}", line);
                    }
                }
            }
            None => {
                for line in strip_tags(content) {
                    println!("  {}", line);
                }
            }
        }
    }

    fn render_error(&mut self, message: &str) {
        println!();
        println!("{}", styles::ERROR.apply_to(message));
    }

    fn render_map_markers(&mut self, locations: &IndexMap<String, Entry>) {
        let mut grid = vec![vec!['·'; MAP_COLS]; MAP_ROWS];
        let mut legend = Vec::new();
        for (key, entry) in locations {
            let position = match &entry.position {
                Some(position) => position,
                None => continue,
            };
            let col = (position.x.clamp(0.0, 100.0) / 100.0 * (MAP_COLS - 1) as f64).round()
                as usize;
            let row = (position.y.clamp(0.0, 100.0) / 100.0 * (MAP_ROWS - 1) as f64).round()
                as usize;
            grid[row][col] = '◉';
            legend.push(format!(
                "{} {}  ({}%, {}%)  {}",
                styles::MARKER.apply_to("◉"),
                capitalize(key),
                position.x,
                position.y,
                styles::LINK.apply_to(format!("#/explorer/{}", entry_path("locations", key)))
            ));
        }

        println!();
        println!("┌{}┐", "─".repeat(MAP_COLS));
        for row in &grid {
            println!("│{}│", row.iter().collect::<String>());
        }
        println!("└{}┘", "─".repeat(MAP_COLS));
        for line in legend {
            println!("  {}", line);
        }
    }

    fn render_search_stats(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        println!();
        println!("{}", styles::STATS.apply_to(text));
    }
}
