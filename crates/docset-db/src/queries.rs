//! Index query functions

use crate::connection::{DbError, DocsetDb};
use docset_core::IndexEntry;

/// Options for looking up entries by name
#[derive(Debug, Clone, Default)]
pub struct LookupOptions {
    /// Exact category filter, e.g. `Class`
    pub entry_type: Option<String>,
    pub limit: Option<i64>,
}

impl LookupOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, entry_type: impl Into<String>) -> Self {
        self.entry_type = Some(entry_type.into());
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Escape LIKE wildcards so the pattern matches literally
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

impl DocsetDb {
    /// Entries whose name contains `query` (case-insensitive), ordered by name and path
    pub fn lookup(&self, query: &str, options: &LookupOptions) -> Result<Vec<IndexEntry>, DbError> {
        let mut sql = String::from(
            "SELECT name, type, path FROM searchIndex WHERE name LIKE ?1 ESCAPE '\\'",
        );
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(like_pattern(query))];

        if let Some(entry_type) = &options.entry_type {
            sql.push_str(" AND type = ?2");
            params.push(Box::new(entry_type.clone()));
        }

        sql.push_str(" ORDER BY name, path");

        if let Some(limit) = options.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let rows = stmt.query_map(param_refs.as_slice(), |row| {
            Ok(IndexEntry {
                name: row.get(0)?,
                entry_type: row.get(1)?,
                path: row.get(2)?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    /// Distinct categories present in the index
    pub fn entry_types(&self) -> Result<Vec<String>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT type FROM searchIndex ORDER BY type")?;
        let rows = stmt.query_map([], |row| row.get(0))?;

        let mut types = Vec::new();
        for row in rows {
            types.push(row?);
        }
        Ok(types)
    }
}
