//! The application facade.
//!
//! [`App`] owns everything a session needs: the loaded dataset, the
//! derived path index, the router, the filter engine, and the source and
//! renderer it was wired with. Construction runs the fixed initialization
//! sequence; afterwards the driver feeds it hash strings and filter
//! messages.
//!
//! The initialization order is a hard invariant: the dataset must be
//! resident before anything renders or filters, and the index must be
//! built before the router can resolve explorer paths.

use crate::error::Result;
use crate::filter::{FilterEngine, FilterMessage, FilterState};
use crate::index::{build_index, PathIndex};
use crate::model::{self, Dataset};
use crate::render::{Container, Renderer};
use crate::router::{Mode, NavIntent, NavOutcome, Page, RouteState, ViewRouter};
use crate::store::DatasetSource;

pub struct App<S: DatasetSource, R: Renderer> {
    source: S,
    renderer: R,
    dataset: Dataset,
    index: PathIndex,
    router: ViewRouter,
    filters: FilterEngine,
}

impl<S: DatasetSource, R: Renderer> App<S, R> {
    /// Loads the dataset (fatal on failure), builds the index, paints the
    /// initial views for whichever containers the surface provides, and
    /// detects the routing mode.
    pub fn init(source: S, mut renderer: R) -> Result<Self> {
        let dataset = source.load()?;
        let index = build_index(&dataset);

        if renderer.has_container(Container::CharactersGrid) {
            if let Some(characters) = dataset.category(model::CHARACTERS) {
                renderer.render_card_grid(
                    model::CHARACTERS,
                    Container::CharactersGrid,
                    characters,
                    None,
                );
            }
        }
        if renderer.has_container(Container::LocationsGrid) {
            if let Some(locations) = dataset.category(model::LOCATIONS) {
                renderer.render_card_grid(
                    model::LOCATIONS,
                    Container::LocationsGrid,
                    locations,
                    None,
                );
            }
        }
        if renderer.has_container(Container::FileTree) {
            renderer.render_file_tree(&dataset);
        }

        let mode = if renderer.has_page_containers() {
            Mode::Spa
        } else {
            Mode::MultiPage {
                document: Page::from_document_name(renderer.document_name()),
            }
        };

        Ok(Self {
            source,
            renderer,
            dataset,
            index,
            router: ViewRouter::new(mode),
            filters: FilterEngine::new(),
        })
    }

    /// Replays the current hash once to establish the starting state,
    /// covering a session that begins on a deep link.
    pub fn start(&mut self, initial_hash: &str) -> NavOutcome {
        self.navigate_hash(initial_hash)
    }

    pub fn navigate_hash(&mut self, hash: &str) -> NavOutcome {
        match NavIntent::parse(hash) {
            Some(intent) => self.navigate(intent),
            None => NavOutcome::Ignored,
        }
    }

    pub fn navigate(&mut self, intent: NavIntent) -> NavOutcome {
        self.router.navigate(
            intent,
            &self.dataset,
            &self.index,
            &self.source,
            &mut self.renderer,
        )
    }

    /// Applies a filter change and repaints; returns the summary line.
    pub fn update_filter(&mut self, message: FilterMessage) -> String {
        self.filters
            .apply(message, &self.dataset, &mut self.renderer)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn index(&self) -> &PathIndex {
        &self.index
    }

    pub fn mode(&self) -> &Mode {
        self.router.mode()
    }

    pub fn route_state(&self) -> Option<&RouteState> {
        self.router.state()
    }

    pub fn filter_state(&self) -> &FilterState {
        self.filters.state()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Container, RecordingRenderer, RenderEvent};
    use crate::router::NavOutcome;
    use crate::store::memory::{FailingSource, InMemorySource};

    fn sample() -> Dataset {
        Dataset::from_json(
            r#"{
                "characters": {
                    "Dent": {"description": "hero", "tags": ["hero"], "location": "ProtocolW"}
                },
                "locations": {
                    "ProtocolW": {"characters": ["Dent"], "position": {"x": 10.0, "y": 20.0}}
                }
            }"#,
        )
        .unwrap()
    }

    fn source(dataset: &Dataset) -> InMemorySource {
        InMemorySource::new(dataset.clone())
            .with_page("characters/dent.html", "<p>Mostly harmless</p>")
    }

    #[test]
    fn init_renders_grids_then_tree_in_order() {
        let dataset = sample();
        let app = App::init(source(&dataset), RecordingRenderer::spa()).unwrap();
        let kinds: Vec<&RenderEvent> = app.renderer().events.iter().collect();
        assert_eq!(kinds.len(), 3);
        assert!(matches!(kinds[0], RenderEvent::CardGrid { category, .. } if category == "characters"));
        assert!(matches!(kinds[1], RenderEvent::CardGrid { category, .. } if category == "locations"));
        assert!(matches!(kinds[2], RenderEvent::FileTree { .. }));
        assert_eq!(app.mode(), &Mode::Spa);
        assert_eq!(app.route_state(), None);
    }

    #[test]
    fn init_skips_absent_containers() {
        let dataset = sample();
        let renderer = RecordingRenderer::document("map.html", &[Container::MapMarkers]);
        let app = App::init(source(&dataset), renderer).unwrap();
        assert!(app.renderer().events.is_empty());
        assert_eq!(
            app.mode(),
            &Mode::MultiPage {
                document: Page::Map
            }
        );
    }

    #[test]
    fn init_fails_fatally_when_load_fails() {
        assert!(App::init(FailingSource, RecordingRenderer::spa()).is_err());
    }

    #[test]
    fn start_resolves_deep_link() {
        let dataset = sample();
        let mut app = App::init(source(&dataset), RecordingRenderer::spa()).unwrap();
        let outcome = app.start("#/explorer/characters/dent.html");
        assert_eq!(
            outcome,
            NavOutcome::ContentShown {
                path: "characters/dent.html".into()
            }
        );
        assert_eq!(
            app.route_state().map(|s| s.page.clone()),
            Some(Page::Explorer)
        );
    }

    #[test]
    fn start_with_empty_hash_lands_home() {
        let dataset = sample();
        let mut app = App::init(source(&dataset), RecordingRenderer::spa()).unwrap();
        assert_eq!(app.start(""), NavOutcome::PageShown(Page::Home));
    }

    #[test]
    fn hash_without_intent_is_ignored() {
        let dataset = sample();
        let mut app = App::init(source(&dataset), RecordingRenderer::spa()).unwrap();
        assert_eq!(app.navigate_hash("#/explorer/"), NavOutcome::Ignored);
    }

    #[test]
    fn filter_flows_through_to_renderer() {
        let dataset = sample();
        let mut app = App::init(source(&dataset), RecordingRenderer::spa()).unwrap();
        let stats = app.update_filter(FilterMessage::Tag("villain".into()));
        assert_eq!(stats, "No results found");
        assert!(app
            .renderer()
            .events
            .contains(&RenderEvent::SearchStats("No results found".into())));
    }
}
