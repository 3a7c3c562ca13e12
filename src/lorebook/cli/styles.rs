use console::Style;
use once_cell::sync::Lazy;

pub static HEADING: Lazy<Style> = Lazy::new(|| Style::new().cyan().bold());
pub static TITLE: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static LINK: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static MARKER: Lazy<Style> = Lazy::new(|| Style::new().red().bold());
pub static MATCH: Lazy<Style> = Lazy::new(|| Style::new().yellow().bold());
pub static STATS: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static ERROR: Lazy<Style> = Lazy::new(|| Style::new().red());
