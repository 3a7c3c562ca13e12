use clap::Parser;
use colored::Colorize;
use lorebook::api::App;
use lorebook::config::{self, SiteConfig, CONFIG_FILENAME};
use lorebook::error::{LorebookError, Result};
use lorebook::filter::{filter_category, stats_line, FilterMessage, FilterOptions, FilterState};
use lorebook::model;
use lorebook::render::{Container, Renderer};
use lorebook::router::{NavOutcome, Page};
use lorebook::store::fs::FileSource;
use lorebook::store::DatasetSource;
use std::io::{BufRead, Write};
use std::path::PathBuf;

mod args;
mod cli;

use args::{Cli, Commands};
use cli::print;
use cli::render::TermRenderer;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        eprintln!(
            "{}",
            "Check the site root and dataset, then try again.".dimmed()
        );
        std::process::exit(1);
    }
}

struct AppContext {
    root: PathBuf,
    config: SiteConfig,
    verbose: bool,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Browse { hash }) => handle_browse(&ctx, hash),
        Some(Commands::Show { page }) => handle_show(&ctx, &page),
        Some(Commands::Open { path, peek }) => handle_open(&ctx, &path, peek),
        Some(Commands::Search {
            term,
            tag,
            location,
            list_filters,
        }) => handle_search(&ctx, term, tag, location, list_filters),
        Some(Commands::Tree) => handle_tree(&ctx),
        Some(Commands::Doctor) => handle_doctor(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::Init) => handle_init(&ctx),
        None => handle_show(&ctx, "home"),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let root = match &cli.root {
        Some(root) => root.clone(),
        None => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            config::discover_root(&cwd).unwrap_or(cwd)
        }
    };
    let config = SiteConfig::load(&root).unwrap_or_default();
    Ok(AppContext {
        root,
        config,
        verbose: cli.verbose,
    })
}

fn file_source(ctx: &AppContext) -> FileSource {
    FileSource::new(ctx.root.clone()).with_dataset_file(&ctx.config.dataset_file)
}

/// Mount points each standalone page document carries.
fn containers_for(page: &Page) -> Vec<Container> {
    match page {
        Page::Home => vec![
            Container::CharactersGrid,
            Container::LocationsGrid,
            Container::SearchStats,
        ],
        Page::Map => vec![Container::MapMarkers],
        Page::Explorer => vec![Container::FileTree],
        Page::Other(_) => Vec::new(),
    }
}

fn document_name(page: &Page) -> String {
    match page {
        Page::Home => "index.html".to_string(),
        other => format!("{}.html", other.id()),
    }
}

fn handle_show(ctx: &AppContext, page_id: &str) -> Result<()> {
    let page = Page::from_id(page_id);
    let renderer = TermRenderer::document(&document_name(&page), &containers_for(&page));
    if ctx.verbose {
        print::info("Loading dataset...");
    }
    let mut app = App::init(file_source(ctx), renderer)?;
    if ctx.verbose {
        print::info(&format!("Indexed {} entries.", app.index().len()));
    }
    app.start(&format!("#/{}", page.id()));
    Ok(())
}

/// Accepts `characters/Dent` as well as the normalized
/// `characters/dent.html`.
fn normalize_path(input: &str) -> String {
    if input.ends_with(".html") {
        return input.to_string();
    }
    match input.split_once('/') {
        Some((category, key)) => lorebook::index::entry_path(category, key),
        None => input.to_string(),
    }
}

fn handle_open(ctx: &AppContext, path: &str, peek: bool) -> Result<()> {
    let path = normalize_path(path);
    let hash = format!("#/explorer/{}", path);

    // Entry links are activated on the home document. An explorer intent
    // there leaves the router's authority as a redirect; the driver loads
    // the explorer document and replays the carried hash, like any
    // cross-document navigation.
    let mut origin = App::init(file_source(ctx), TermRenderer::document("index.html", &[]))?;
    let hash = match origin.navigate_hash(&hash) {
        NavOutcome::Redirect { hash } => hash,
        _ => hash,
    };

    let mut renderer = TermRenderer::document("explorer.html", &[Container::FileTree]);
    if peek {
        renderer = renderer.with_peek(ctx.config.peek_lines);
    }
    let mut app = App::init(file_source(ctx), renderer)?;
    let outcome = app.start(&hash);

    if let NavOutcome::ContentShown { path } = outcome {
        if let Some(found) = app.index().get(&path) {
            if found.category == model::LOCATIONS {
                let residents = app.dataset().characters_in(&found.key);
                print::print_residents(&residents);
            }
        }
    }
    Ok(())
}

fn handle_search(
    ctx: &AppContext,
    term: Option<String>,
    tag: Option<String>,
    location: Option<String>,
    list_filters: bool,
) -> Result<()> {
    let dataset = file_source(ctx).load()?;
    if list_filters {
        print::print_filter_options(&FilterOptions::collect(&dataset));
        return Ok(());
    }

    let state = FilterState {
        search: term.unwrap_or_default(),
        tag: tag.unwrap_or_default(),
        location: location.unwrap_or_default(),
    };
    let characters = filter_category(&dataset, model::CHARACTERS, &state);
    let locations = filter_category(&dataset, model::LOCATIONS, &state);
    let highlight = if state.search.is_empty() {
        None
    } else {
        Some(state.search.as_str())
    };

    let mut renderer = TermRenderer::document(
        "index.html",
        &[
            Container::CharactersGrid,
            Container::LocationsGrid,
            Container::SearchStats,
        ],
    );
    renderer.render_card_grid(
        model::CHARACTERS,
        Container::CharactersGrid,
        &characters,
        highlight,
    );
    renderer.render_card_grid(
        model::LOCATIONS,
        Container::LocationsGrid,
        &locations,
        highlight,
    );
    renderer.render_search_stats(&stats_line(characters.len(), locations.len(), &state));
    Ok(())
}

fn handle_tree(ctx: &AppContext) -> Result<()> {
    let dataset = file_source(ctx).load()?;
    let mut renderer = TermRenderer::document("explorer.html", &[Container::FileTree]);
    renderer.render_file_tree(&dataset);
    Ok(())
}

fn handle_doctor(ctx: &AppContext) -> Result<()> {
    let dataset = file_source(ctx).load()?;
    print::info(&format!(
        "{} entries across {} categories.",
        dataset.total_entries(),
        dataset.categories.len()
    ));
    print::print_warnings(&dataset.validate());
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let mut config = ctx.config.clone();
    match (key.as_deref(), value) {
        (None, _) => {
            println!("dataset-file = {}", config.dataset_file);
            println!("peek-lines = {}", config.peek_lines);
        }
        (Some("dataset-file"), None) => println!("dataset-file = {}", config.dataset_file),
        (Some("dataset-file"), Some(v)) => {
            config.dataset_file = v;
            config.save(&ctx.root)?;
            print::success("Config updated.");
        }
        (Some("peek-lines"), None) => println!("peek-lines = {}", config.peek_lines),
        (Some("peek-lines"), Some(v)) => {
            config.peek_lines = v
                .parse()
                .map_err(|_| LorebookError::Api(format!("Not a line count: {}", v)))?;
            config.save(&ctx.root)?;
            print::success("Config updated.");
        }
        (Some(other), _) => println!("Unknown config key: {}", other),
    }
    Ok(())
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    std::fs::create_dir_all(&ctx.root)?;

    let dataset_path = ctx.root.join(&ctx.config.dataset_file);
    if dataset_path.exists() {
        print::warning(&format!(
            "Dataset already exists at {}",
            dataset_path.display()
        ));
    } else {
        let skeleton = serde_json::json!({ "characters": {}, "locations": {} });
        std::fs::write(&dataset_path, serde_json::to_string_pretty(&skeleton)?)?;
        std::fs::create_dir_all(ctx.root.join(model::CHARACTERS))?;
        std::fs::create_dir_all(ctx.root.join(model::LOCATIONS))?;
        print::success(&format!(
            "Initialized lorebook site at {}",
            ctx.root.display()
        ));
    }

    if !ctx.root.join(CONFIG_FILENAME).exists() {
        ctx.config.save(&ctx.root)?;
    }
    Ok(())
}

const BROWSE_HELP: &str = "Navigate with #/<page> or #/explorer/<path>. \
Filter with: search <term>, tag <tag>, location <key>, clear, filters. \
Leave with: quit";

fn handle_browse(ctx: &AppContext, hash: Option<String>) -> Result<()> {
    if ctx.verbose {
        print::info("Loading dataset...");
    }
    let mut app = App::init(file_source(ctx), TermRenderer::browse())?;
    if ctx.verbose {
        print::info(&format!("Indexed {} entries.", app.index().len()));
    }
    print::info(BROWSE_HELP);

    app.start(hash.as_deref().unwrap_or("#/home"));

    let interactive = console::user_attended();
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("> ");
            let _ = std::io::stdout().flush();
        }
        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line {
            "quit" | "exit" | "q" => break,
            "clear" => {
                app.update_filter(FilterMessage::Reset);
            }
            "filters" => {
                print::print_filter_options(&FilterOptions::collect(app.dataset()));
            }
            "search" => {
                app.update_filter(FilterMessage::ClearSearch);
            }
            "tag" => {
                app.update_filter(FilterMessage::ClearTag);
            }
            "location" => {
                app.update_filter(FilterMessage::ClearLocation);
            }
            _ => {
                if let Some(term) = line.strip_prefix("search ") {
                    app.update_filter(FilterMessage::Search(term.trim().to_string()));
                } else if let Some(tag) = line.strip_prefix("tag ") {
                    app.update_filter(FilterMessage::Tag(tag.trim().to_string()));
                } else if let Some(location) = line.strip_prefix("location ") {
                    app.update_filter(FilterMessage::Location(location.trim().to_string()));
                } else if line.starts_with('#') {
                    if app.navigate_hash(line) == NavOutcome::Ignored && ctx.verbose {
                        print::info("Nothing to navigate to.");
                    }
                } else {
                    print::warning(&format!("Unknown command: {}", line));
                }
            }
        }
    }
    Ok(())
}
