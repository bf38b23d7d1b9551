//! Core type definitions for docset index data

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Category labels understood by the documentation viewer.
///
/// The viewer picks an icon per label, so these strings are part of the
/// on-disk contract and must not be renamed.
pub mod category {
    pub const NAMESPACE: &str = "Namespace";
    pub const CLASS: &str = "Class";
    pub const STRUCT: &str = "Struct";
    pub const UNION: &str = "Union";
    pub const FILE: &str = "File";
    pub const METHOD: &str = "Method";
    pub const FUNCTION: &str = "Function";
    pub const MACRO: &str = "Macro";
    pub const DEFINE: &str = "Define";
    pub const ENUM: &str = "Enum";
    pub const VALUE: &str = "Value";
    pub const TYPE: &str = "Type";
    pub const VARIABLE: &str = "Variable";
    pub const GUIDE: &str = "Guide";
    pub const INSTRUCTION: &str = "Instruction";
    pub const SECTION: &str = "Section";
    pub const COMMAND: &str = "Command";
    pub const SAMPLE: &str = "Sample";
    pub const PLUGIN: &str = "Plugin";
    pub const SERVICE: &str = "Service";
}

/// One row of the search index: a display name, its category and the
/// documentation-root-relative path (optionally with a `#fragment`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub path: String,
}

impl IndexEntry {
    /// Build an entry, rejecting empty fields.
    pub fn new(
        name: impl Into<String>,
        entry_type: impl Into<String>,
        path: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let entry = Self {
            name: name.into(),
            entry_type: entry_type.into(),
            path: path.into(),
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Check that every field is non-empty.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::InvalidEntry(format!(
                "empty name for {} entry at '{}'",
                self.entry_type, self.path
            )));
        }
        if self.entry_type.is_empty() {
            return Err(CoreError::InvalidEntry(format!(
                "empty type for '{}'",
                self.name
            )));
        }
        if self.path.is_empty() {
            return Err(CoreError::InvalidEntry(format!(
                "empty path for '{}'",
                self.name
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for IndexEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.name, self.entry_type, self.path)
    }
}
