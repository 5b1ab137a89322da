//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use mockdesk_core::ValidationErrors;
use mockdesk_core::list::Page;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a dimmed hint to stderr.
pub fn hint(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print one line per failed form field.
pub fn validation(errors: &ValidationErrors) {
    for (field, message) in errors.iter() {
        eprintln!("{} {}: {}", "✗".red(), field.bold(), message);
    }
}

/// Print the page position line, e.g. `Page 2 of 11 (55 matches)`.
pub fn page_footer(page: &Page<'_>) {
    eprintln!(
        "{}",
        format!(
            "Page {} of {} ({} matches)",
            page.page + 1,
            page.page_count,
            page.total_matches
        )
        .dimmed()
    );
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}
