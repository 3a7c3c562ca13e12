use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for
/// non-release builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "lorebook", bin_name = "lorebook", version = get_version())]
#[command(about = "A file-based character and location wiki for the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Site root (default: detected from the working directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the wiki in an interactive session
    #[command(alias = "b", display_order = 1)]
    Browse {
        /// Starting hash, e.g. "#/map" or "#/explorer/characters/dent.html"
        hash: Option<String>,
    },

    /// Render one page (home, map, explorer, ...)
    #[command(alias = "s", display_order = 2)]
    Show {
        /// Page id
        page: String,
    },

    /// Open one entry in the explorer
    #[command(alias = "o", display_order = 3)]
    Open {
        /// Entry as CATEGORY/KEY or a normalized path like
        /// characters/dent.html
        path: String,

        /// Preview the content instead of printing it in full
        #[arg(long)]
        peek: bool,
    },

    /// Search and filter entries
    #[command(display_order = 4)]
    Search {
        /// Free-text search term
        term: Option<String>,

        /// Keep only entries carrying this exact tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Keep only characters at this location
        #[arg(short, long)]
        location: Option<String>,

        /// List the selectable tag and location values instead
        #[arg(long)]
        list_filters: bool,
    },

    /// Print the explorer file tree
    #[command(display_order = 5)]
    Tree,

    /// Check the dataset for inconsistencies
    #[command(display_order = 10)]
    Doctor,

    /// Get or set site configuration
    #[command(display_order = 11)]
    Config {
        /// Configuration key (dataset-file, peek-lines)
        key: Option<String>,

        /// Value to set (if omitted, prints the current value)
        value: Option<String>,
    },

    /// Scaffold an empty site in the root
    #[command(display_order = 12)]
    Init,
}
