//! Output formatting helpers.
//!
//! Results go to stdout so they can be piped; progress notes, empty
//! states and page summaries go to stderr.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a dimmed progress or empty-state note.
pub fn note(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print one record as JSON, pretty-printed on request.
pub fn record<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

/// Print the trailing total line of a listed page.
pub fn page_summary(total: u64, page: u32) {
    eprintln!();
    eprintln!("{}: {}", "Total".dimmed(), totals(total, page));
}

fn totals(total: u64, page: u32) -> String {
    format!("{total} (page {page})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_name_the_page() {
        assert_eq!(totals(51, 2), "51 (page 2)");
        assert_eq!(totals(0, 1), "0 (page 1)");
    }
}
