//! Database connection management

use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Index not found at {0}")]
    NotFound(PathBuf),

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Not a docset index (run: docset build)")]
    NotInitialized,
}

/// Read-only connection to a docset search index
pub struct DocsetDb {
    pub(crate) conn: Connection,
    path: PathBuf,
}

impl DocsetDb {
    /// Open the index at a specific path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(DbError::NotFound(path));
        }

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        let db = Self { conn, path };
        db.check_schema()?;

        Ok(db)
    }

    /// Make sure the file holds a `searchIndex` table
    fn check_schema(&self) -> Result<(), DbError> {
        let tables: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='searchIndex'",
            [],
            |row| row.get(0),
        )?;

        if tables == 0 {
            return Err(DbError::NotInitialized);
        }
        Ok(())
    }

    /// Get the index path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the underlying connection (for custom queries)
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Get index statistics
    pub fn stats(&self) -> Result<IndexStats, DbError> {
        let entry_count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM searchIndex", [], |row| row.get(0))?;

        let mut stmt = self
            .conn
            .prepare("SELECT type, COUNT(*) FROM searchIndex GROUP BY type ORDER BY type")?;
        let rows = stmt.query_map([], |row| {
            Ok(TypeCount {
                entry_type: row.get(0)?,
                count: row.get(1)?,
            })
        })?;

        let mut by_type = Vec::new();
        for row in rows {
            by_type.push(row?);
        }

        let db_size = std::fs::metadata(&self.path)
            .map(|m| m.len())
            .unwrap_or(0);

        Ok(IndexStats {
            entry_count,
            by_type,
            db_path: self.path.clone(),
            db_size_bytes: db_size,
        })
    }
}

/// Number of entries of one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCount {
    pub entry_type: String,
    pub count: i64,
}

/// Index statistics
#[derive(Debug, Clone)]
pub struct IndexStats {
    pub entry_count: i64,
    pub by_type: Vec<TypeCount>,
    pub db_path: PathBuf,
    pub db_size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_index(path: &Path, rows: &[(&str, &str, &str)]) {
        let conn = Connection::open(path).unwrap();
        conn.execute_batch(
            "CREATE TABLE searchIndex(id INTEGER PRIMARY KEY, name TEXT, type TEXT, path TEXT);
             CREATE UNIQUE INDEX anchor ON searchIndex (name, type, path);",
        )
        .unwrap();
        for (name, ty, p) in rows {
            conn.execute(
                "INSERT INTO searchIndex (name, type, path) VALUES (?1, ?2, ?3)",
                [name, ty, p],
            )
            .unwrap();
        }
    }

    #[test]
    fn test_open_missing_index() {
        let result = DocsetDb::open("/nonexistent/docSet.dsidx");
        assert!(matches!(result, Err(DbError::NotFound(_))));
    }

    #[test]
    fn test_open_rejects_foreign_database() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("other.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE lines (id INTEGER)")
            .unwrap();

        assert!(matches!(DocsetDb::open(&path), Err(DbError::NotInitialized)));
    }

    #[test]
    fn test_stats_groups_by_type() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("docSet.dsidx");
        create_index(
            &path,
            &[
                ("llvm::Module", "Class", "doxygen/classllvm_1_1Module.html"),
                ("getName", "Method", "doxygen/classllvm_1_1Module.html#a1"),
                ("llvm::Value", "Class", "doxygen/classllvm_1_1Value.html"),
            ],
        );

        let stats = DocsetDb::open(&path).unwrap().stats().unwrap();
        assert_eq!(stats.entry_count, 3);
        assert_eq!(
            stats.by_type,
            vec![
                TypeCount { entry_type: "Class".into(), count: 2 },
                TypeCount { entry_type: "Method".into(), count: 1 },
            ]
        );
        assert!(stats.db_size_bytes > 0);
    }
}
