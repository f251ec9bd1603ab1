//! Terminal output utilities.
//!
//! Provides formatting helpers for terminal output.

use crate::matcher::RangeList;
use crate::models::{Address, MatchResult};
use crate::{engine, parser};
use colored::Colorize;

/// Left-aligned column of exactly `width` characters.
///
/// Longer values are cut and end in `~` so rows stay aligned.
pub fn pad_column(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return format!("{value:<width$}");
    }
    let kept: String = value.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}~")
}

/// One row describing how `raw` fared against `ranges`.
///
/// Columns: input, verdict, matching spec, expanded form, /64 prefix.
pub fn format_match_row(raw: &str, result: &MatchResult, ranges: &RangeList) -> String {
    let trimmed = parser::trim(raw);
    let verdict = if result.matched {
        "ALLOW".on_green().to_string()
    } else {
        "DENY".on_red().to_string()
    };
    let spec = match result.index.and_then(|i| ranges.get(i).map(|d| (i, d))) {
        Some((i, d)) => format!("#{i} {d}"),
        None => "-".to_string(),
    };
    let (expanded, prefix) = match parser::parse(trimmed) {
        Some(addr @ Address::V4(_)) => (addr.to_string(), "-".to_string()),
        Some(Address::V6(bytes)) => (
            engine::ipv6::expand(&bytes),
            engine::ipv6::network_prefix(&bytes),
        ),
        None => ("invalid".to_string(), "-".to_string()),
    };

    format!(
        "{input}  {verdict}  {spec}  {expanded}  {prefix}",
        input = pad_column(trimmed, 24),
        spec = pad_column(&spec, 24),
        expanded = pad_column(&expanded, 39),
        prefix = pad_column(&prefix, 19),
    )
}
