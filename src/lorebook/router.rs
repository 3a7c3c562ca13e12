//! Navigation: hash parsing, page state, and the view router.
//!
//! Navigation intents arrive as hash-fragment strings in one of two
//! shapes: `#/explorer/<path>` opens a content page in the explorer, and
//! `#/<pageId>` activates a plain page (empty id defaults to `home`). The
//! router consumes parsed [`NavIntent`]s one at a time, each running to
//! completion, and reconciles them with the surface it runs on:
//!
//! - **Spa**: one surface holds every logical page; the router toggles
//!   which one is active.
//! - **MultiPage**: every logical page is its own document. Plain-page
//!   navigation belongs to the document loader, not the router; the
//!   router only recognizes its own document's identity, and answers an
//!   explorer intent on a foreign document with a [`NavOutcome::Redirect`]
//!   for the driver to replay after loading the explorer document.
//!
//! The mode is detected once at startup and never changes. A missing
//! explorer path is not an error: it renders an inline message and the
//! session stays usable.

use crate::index::PathIndex;
use crate::model::Dataset;
use crate::render::Renderer;
use crate::store::DatasetSource;

/// A logical page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    Map,
    Explorer,
    Other(String),
}

impl Page {
    pub fn from_id(id: &str) -> Page {
        match id {
            "" | "home" => Page::Home,
            "map" => Page::Map,
            "explorer" => Page::Explorer,
            other => Page::Other(other.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Page::Home => "home",
            Page::Map => "map",
            Page::Explorer => "explorer",
            Page::Other(id) => id,
        }
    }

    /// Page identity of a standalone document, from its file name.
    /// `index.html` (and an empty name) is the home document.
    pub fn from_document_name(name: &str) -> Page {
        let stem = name.strip_suffix(".html").unwrap_or(name);
        match stem {
            "" | "index" => Page::Home,
            other => Page::from_id(other),
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// A parsed navigation intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavIntent {
    /// Activate a plain page by id.
    Page(String),
    /// Open a content page in the explorer.
    Explorer(String),
}

impl NavIntent {
    /// Parses a hash fragment. `#/explorer/<path>` needs a non-empty path;
    /// a bare `#/explorer/` is ignored. Anything else is a plain page
    /// intent, with the empty hash defaulting to `home`.
    pub fn parse(hash: &str) -> Option<NavIntent> {
        if let Some(pos) = hash.find("/explorer/") {
            let path = &hash[pos + "/explorer/".len()..];
            if path.is_empty() {
                return None;
            }
            return Some(NavIntent::Explorer(path.to_string()));
        }
        let id = hash
            .strip_prefix('#')
            .unwrap_or(hash)
            .trim_start_matches('/');
        Some(NavIntent::Page(if id.is_empty() {
            "home".to_string()
        } else {
            id.to_string()
        }))
    }

    /// The hash fragment this intent round-trips to.
    pub fn to_hash(&self) -> String {
        match self {
            NavIntent::Page(id) => format!("#/{}", id),
            NavIntent::Explorer(path) => format!("#/explorer/{}", path),
        }
    }
}

/// How the router runs on its surface. Detected once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Spa,
    MultiPage { document: Page },
}

/// The resolved route: the active page and, on the explorer, the open
/// path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteState {
    pub page: Page,
    pub open_path: Option<String>,
}

/// What a navigation did, for drivers and tests. Renders have already
/// been requested by the time the outcome is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// A plain page was activated.
    PageShown(Page),
    /// An explorer path resolved and its content was rendered.
    ContentShown { path: String },
    /// The path was not in the index; an inline error was rendered.
    NotFound { path: String },
    /// The path resolved but its content page failed to load; an inline
    /// error was rendered.
    LoadFailed { path: String },
    /// MultiPage only: the driver must load the explorer document and
    /// replay this hash there.
    Redirect { hash: String },
    /// MultiPage only: plain-page navigation to another document, outside
    /// this router's authority.
    External { page: Page },
    /// The hash carried no intent.
    Ignored,
}

/// Owns the route state and decides what each navigation intent does.
pub struct ViewRouter {
    mode: Mode,
    state: Option<RouteState>,
    map_ready: bool,
}

impl ViewRouter {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            state: None,
            map_ready: false,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// `None` until the first navigation resolves.
    pub fn state(&self) -> Option<&RouteState> {
        self.state.as_ref()
    }

    pub fn map_initialized(&self) -> bool {
        self.map_ready
    }

    /// Activates a page on the surface and, on the first entry to the
    /// map, triggers the deferred marker render. The guard never resets,
    /// so re-entering the map is idempotent.
    fn show_page<R: Renderer>(&mut self, page: &Page, dataset: &Dataset, renderer: &mut R) {
        renderer.set_active_page(page);
        if *page == Page::Map && !self.map_ready {
            self.map_ready = true;
            renderer.render_map_markers(&dataset.positioned_locations());
        }
    }

    /// Processes one navigation intent to completion.
    pub fn navigate<S: DatasetSource, R: Renderer>(
        &mut self,
        intent: NavIntent,
        dataset: &Dataset,
        index: &PathIndex,
        source: &S,
        renderer: &mut R,
    ) -> NavOutcome {
        match intent {
            NavIntent::Explorer(path) => {
                if let Mode::MultiPage { document } = &self.mode {
                    if *document != Page::Explorer {
                        return NavOutcome::Redirect {
                            hash: NavIntent::Explorer(path).to_hash(),
                        };
                    }
                }
                self.show_page(&Page::Explorer, dataset, renderer);
                self.open(path, index, source, renderer)
            }
            NavIntent::Page(id) => {
                let page = Page::from_id(&id);
                if let Mode::MultiPage { document } = &self.mode {
                    if *document != page {
                        return NavOutcome::External { page };
                    }
                }
                self.show_page(&page, dataset, renderer);
                self.state = Some(RouteState {
                    page: page.clone(),
                    open_path: None,
                });
                NavOutcome::PageShown(page)
            }
        }
    }

    fn open<S: DatasetSource, R: Renderer>(
        &mut self,
        path: String,
        index: &PathIndex,
        source: &S,
        renderer: &mut R,
    ) -> NavOutcome {
        let found = match index.get(&path) {
            Some(found) => found,
            None => {
                renderer.render_error("File not found");
                self.state = Some(RouteState {
                    page: Page::Explorer,
                    open_path: None,
                });
                return NavOutcome::NotFound { path };
            }
        };
        match source.read_page(&path) {
            Ok(content) => {
                renderer.render_content(&found.key, &found.category, &found.entry, &content);
                self.state = Some(RouteState {
                    page: Page::Explorer,
                    open_path: Some(path.clone()),
                });
                NavOutcome::ContentShown { path }
            }
            Err(_) => {
                renderer.render_error(&format!("Error loading {}", found.key));
                self.state = Some(RouteState {
                    page: Page::Explorer,
                    open_path: None,
                });
                NavOutcome::LoadFailed { path }
            }
        }
    }
}
