use colored::Colorize;
use indexmap::IndexMap;
use lorebook::filter::FilterOptions;
use lorebook::model::{DatasetWarning, Entry};

pub fn info(message: &str) {
    println!("{}", message.dimmed());
}

pub fn success(message: &str) {
    println!("{}", message.green());
}

pub fn warning(message: &str) {
    println!("{}", message.yellow());
}

pub fn print_warnings(warnings: &[DatasetWarning]) {
    if warnings.is_empty() {
        success("No inconsistencies found.");
        return;
    }
    warning(&format!(
        "{} inconsistenc{} found:",
        warnings.len(),
        if warnings.len() == 1 { "y" } else { "ies" }
    ));
    for entry in warnings {
        println!("  - {}", entry);
    }
}

pub fn print_filter_options(options: &FilterOptions) {
    println!("{}", "Tags:".bold());
    if options.tags.is_empty() {
        info("  (none)");
    }
    for tag in &options.tags {
        println!("  {}", tag);
    }
    println!("{}", "Locations:".bold());
    if options.locations.is_empty() {
        info("  (none)");
    }
    for location in &options.locations {
        println!("  {}", location);
    }
}

/// Characters listed by an opened location, resolved dangling-safe.
pub fn print_residents(residents: &IndexMap<String, Entry>) {
    if residents.is_empty() {
        return;
    }
    println!();
    println!("{}", "Characters here:".bold());
    for (key, entry) in residents {
        if entry.description.is_empty() {
            println!("  ▪ {}", key);
        } else {
            println!("  ▪ {}  {}", key, entry.description.dimmed());
        }
    }
}
