//! JSON output formatting

use docset_core::IndexEntry;

/// Output an index entry as a single JSON object
pub fn format_entry(entry: &IndexEntry) -> String {
    serde_json::json!({
        "name": entry.name,
        "type": entry.entry_type,
        "path": entry.path
    })
    .to_string()
}

/// Serialize a value, pretty-printed
pub fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
