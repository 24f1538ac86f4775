use std::sync::OnceLock;

use chrono::NaiveDate;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::OutputFormat;

/// Global output format setting
static OUTPUT_FORMAT: OnceLock<OutputFormat> = OnceLock::new();

pub fn set_format(format: OutputFormat) {
    let _ = OUTPUT_FORMAT.set(format);
}

pub fn format() -> OutputFormat {
    OUTPUT_FORMAT.get().copied().unwrap_or_default()
}

/// Print a table, JSON or one line per item depending on output mode
pub fn print_table<T, R, F, C>(items: &[T], to_row: F, to_line: C)
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
    C: Fn(&T) -> String,
{
    match format() {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items).unwrap_or_default());
        }
        OutputFormat::Compact => {
            for item in items {
                println!("{}", to_line(item));
            }
        }
        OutputFormat::Table => {
            println!("{}", render_table(items.iter().map(to_row)));
        }
    }
}

pub fn render_table<R: Tabled>(rows: impl IntoIterator<Item = R>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Print a message (skipped in JSON mode, or prints simple object)
pub fn print_message(message: &str) {
    if matches!(format(), OutputFormat::Json) {
        println!("{}", serde_json::json!({ "message": message }));
    } else {
        println!("{message}");
    }
}

pub fn heading(text: &str) -> String {
    text.bold().to_string()
}

pub fn name_colored(name: &str) -> String {
    name.cyan().to_string()
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Truncate a string with ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
