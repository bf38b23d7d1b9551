//! Human-readable output formatting

use super::colors::*;
use docset_core::IndexEntry;

/// Format an index entry as `[Type] name  path`
pub fn format_entry(entry: &IndexEntry) -> String {
    format!(
        "[{}] {}  {}",
        colored_type(&entry.entry_type),
        entry.name,
        colored_path(&entry.path)
    )
}

/// Format a `label: value` line with the label dimmed
pub fn format_field(name: &str, value: &str) -> String {
    format!("  {}: {}", label(name), value)
}
