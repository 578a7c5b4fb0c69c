//! Console output helpers for the estudio CLI.
//!
//! Every user-facing line goes through these so the subcommands stay
//! consistent: cyan section banners, bold keys, bracketed status tags.

use colored::Colorize;
use std::fmt::Display;

/// Print a section header
pub(crate) fn section(title: &str) {
    println!("\n{}", format!("=== {title} ===").cyan().bold());
}

/// Print a key-value pair
pub(crate) fn kv(key: &str, value: impl Display) {
    println!("  {}: {}", key.white().bold(), value);
}

/// Print a success message
pub(crate) fn success(msg: &str) {
    println!("{} {}", "[PASS]".green().bold(), msg);
}

/// Print a warning message
pub(crate) fn warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// Print a failure message
pub(crate) fn fail(msg: &str) {
    println!("{} {}", "[FAIL]".red().bold(), msg);
}

/// Print an info message
pub(crate) fn info(msg: &str) {
    println!("{} {}", "[INFO]".blue(), msg);
}

/// Print an error message to stderr
pub(crate) fn error(msg: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_does_not_panic() {
        section("Test Section");
    }

    #[test]
    fn test_kv_accepts_any_display() {
        kv("count", 42);
        kv("rate", 0.158);
        kv("path", "data/toy_set.txt");
    }

    #[test]
    fn test_status_lines_do_not_panic() {
        success("fit converged");
        warning("falling back to default");
        fail("error rate above threshold");
        info("reading bundled data");
        error("file missing");
    }
}
