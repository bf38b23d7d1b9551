//! Minimal text output formatting

use docset_core::IndexEntry;

/// Format an index entry as tab-separated `name type path`
pub fn format_entry(entry: &IndexEntry) -> String {
    format!("{}\t{}\t{}", entry.name, entry.entry_type, entry.path)
}
