//! Search index schema
//!
//! The viewer reads a single `searchIndex` table. The layout is fixed by the
//! docset format, so there is no version table and no migration path.

use rusqlite::Connection;

use crate::connection::IndexerError;

/// Name of the unique index over (name, type, path)
pub const UNIQUE_INDEX_NAME: &str = "anchor";

/// Create the search index table and its uniqueness constraint if missing
pub fn init_schema(conn: &Connection) -> Result<(), IndexerError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS searchIndex(
            id INTEGER PRIMARY KEY,
            name TEXT,
            type TEXT,
            path TEXT
        );
        CREATE UNIQUE INDEX IF NOT EXISTS anchor ON searchIndex (name, type, path);",
    )?;

    Ok(())
}
