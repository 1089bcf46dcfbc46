//! Terminal output for `apex`: styled status lines, cart and catalog
//! tables, and a `--json` mode that prints only machine-readable results.

use std::time::Duration;

use apex_commerce::catalog::CompatiblePart;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Printer shared by every `apex` subcommand.
///
/// With `json` set, only [`Output::json`] and [`Output::error`] write
/// anything, so scripted callers get one JSON document per command.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Build from the global `--verbose` and `--json` flags.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Neutral status, e.g. "Cart is empty".
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Confirmation of a cart or session change.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Non-fatal problem, to stderr.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Failure, to stderr. In JSON mode this is `{"error": ...}`.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Detail shown only with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Section title above a cart, order or parts listing.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Command result as pretty JSON.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Labelled value, e.g. a pricing line or account field.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// One row of a column-aligned listing; trailing padding is trimmed.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  ").trim_end());
    }

    /// Spinner shown while a mock service call is pending. Hidden in JSON
    /// mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Stock label for a catalog part.
pub fn stock_badge(part: &CompatiblePart) -> String {
    if !part.in_stock {
        style("Out of stock").red().to_string()
    } else if part.is_low_stock() {
        style(format!("Only {} left", part.stock_count)).yellow().to_string()
    } else {
        style("In stock").green().to_string()
    }
}

/// Shorten `text` to at most `max` characters, marking the cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Brake Pads", 20), "Brake Pads");
        assert_eq!(truncate("Timing Belt Kit with Water Pump", 12), "Timing Belt…");
    }

    #[test]
    fn test_json_mode_hides_spinner() {
        let out = Output::new(false, true);
        assert!(out.is_json());
        assert!(out.spinner("Finding parts").is_hidden());
    }

    #[test]
    fn test_stock_badge_text() {
        console::set_colors_enabled(false);
        let catalog = apex_commerce::catalog::MockCatalog::new();
        let mut pump = catalog.part_by_number("P659").unwrap().clone();
        assert_eq!(stock_badge(&pump), "In stock");

        pump.stock_count = 3;
        assert_eq!(stock_badge(&pump), "Only 3 left");

        pump.in_stock = false;
        assert_eq!(stock_badge(&pump), "Out of stock");
    }
}
