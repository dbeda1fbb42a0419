//! Common display utilities for CLI commands.

use colored::{ColoredString, Colorize};
use mizgraph::ArticleError;

const MAX_DISPLAY_ITEMS: usize = 10;

/// Print per-article errors to stderr as warnings.
pub fn print_article_errors(errors: &[ArticleError]) {
    for error in errors {
        eprintln!("{}: {error}", "warning".yellow().bold());
    }
}

/// Render `text` in a palette color.
///
/// `#rrggbb` colors become true-color output; named colors are left plain.
pub fn swatch(text: &str, color: &str) -> ColoredString {
    match parse_hex_color(color) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| -> Option<u8> {
        u8::from_str_radix(hex.get(range)?, 16).ok()
    };
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Display a list of labels with optional truncation.
///
/// Shows up to `MAX_DISPLAY_ITEMS` labels with bullet points. If there are
/// more, shows "... and N more". If empty, shows the provided `empty_message`.
pub fn print_labels(labels: &[&str], empty_message: &str) {
    if labels.is_empty() {
        println!("    {}", empty_message.dimmed());
        return;
    }

    for label in labels.iter().take(MAX_DISPLAY_ITEMS) {
        println!("    {} {label}", "•".dimmed());
    }

    if labels.len() > MAX_DISPLAY_ITEMS {
        println!(
            "    {} ... and {} more",
            "•".dimmed(),
            labels.len() - MAX_DISPLAY_ITEMS
        );
    }
}
