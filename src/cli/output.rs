//! Output formatting and progress indicators for CLI

use indicatif::{ProgressBar, ProgressStyle};

use crate::{Error, Result, game::Grid};

/// Create a spinner for long searches
pub fn create_spinner(message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .map_err(|e| Error::ProgressBarTemplate {
                message: e.to_string(),
            })?,
    );
    pb.set_message(message.to_string());
    Ok(pb)
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format a count with its share of `total` as a percentage
pub fn format_share(count: usize, rate: f64) -> String {
    format!("{} ({:.1}%)", format_number(count), rate * 100.0)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print a grid indented under the current section
pub fn print_grid(grid: &Grid) {
    for line in grid.to_string().lines() {
        println!("    {line}");
    }
}
