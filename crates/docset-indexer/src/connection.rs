//! Read-write index store
//!
//! The store is write-once per run: entries are inserted, never updated or
//! deleted. All inserts of a run share one transaction that is committed by
//! [`IndexStore::close`], which also runs on drop so that a failed run still
//! keeps what it indexed so far.

use docset_core::{CoreError, IndexEntry};
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::schema;

/// Indexer errors
#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error in {path}: {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Documentation page not found: {0}")]
    PageNotFound(PathBuf),

    #[error("Index store is not open")]
    NotOpen,

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Progress callback: receives each accepted entry and the running attempt count
pub type ProgressFn = Box<dyn FnMut(&IndexEntry, u64)>;

/// Read-write connection to the search index
pub struct IndexStore {
    conn: Option<Connection>,
    path: PathBuf,
    attempts: u64,
    on_progress: Option<ProgressFn>,
}

impl IndexStore {
    /// Create an unopened store for the index file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            conn: None,
            path: path.into(),
            attempts: 0,
            on_progress: None,
        }
    }

    /// Create and open a store in one step
    pub fn open_at(path: &Path) -> Result<Self, IndexerError> {
        let mut store = Self::new(path);
        store.open()?;
        Ok(store)
    }

    /// Open a store backed by an in-memory database
    pub fn open_in_memory() -> Result<Self, IndexerError> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self::new(":memory:");
        store.attach(conn)?;
        Ok(store)
    }

    /// Install a progress callback invoked after every accepted insert
    pub fn with_progress<F>(mut self, f: F) -> Self
    where
        F: FnMut(&IndexEntry, u64) + 'static,
    {
        self.on_progress = Some(Box::new(f));
        self
    }

    /// Open (or create) the index file. Reopening commits the previous session first.
    pub fn open(&mut self) -> Result<(), IndexerError> {
        if self.conn.is_some() {
            self.close()?;
        }

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        // Rollback journal only: the viewer opens the index read-only
        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;

        self.attach(conn)
    }

    fn attach(&mut self, conn: Connection) -> Result<(), IndexerError> {
        schema::init_schema(&conn)?;
        conn.execute_batch("BEGIN")?;
        self.conn = Some(conn);
        Ok(())
    }

    /// Insert an entry. Returns `true` if a new row was written, `false` if
    /// the same (name, type, path) triple was already present.
    pub fn insert_entry(&mut self, entry: &IndexEntry) -> Result<bool, IndexerError> {
        entry.validate()?;
        let conn = self.conn.as_ref().ok_or(IndexerError::NotOpen)?;

        self.attempts += 1;
        tracing::debug!(target: "store", "Inserting entry: {}", entry);
        if let Some(on_progress) = self.on_progress.as_mut() {
            on_progress(entry, self.attempts);
        }

        let mut stmt = conn.prepare_cached(
            "INSERT OR IGNORE INTO searchIndex (name, type, path) VALUES (?1, ?2, ?3)",
        )?;
        let changed = stmt.execute(rusqlite::params![entry.name, entry.entry_type, entry.path])?;
        Ok(changed > 0)
    }

    /// Commit pending writes and release the connection. No-op when not open.
    pub fn close(&mut self) -> Result<(), IndexerError> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };
        self.attempts = 0;

        if !conn.is_autocommit() {
            conn.execute_batch("COMMIT")?;
        }
        conn.close().map_err(|(_, e)| IndexerError::Sqlite(e))?;
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Number of accepted insert attempts since the store was opened
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Get the index file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a reference to the underlying connection, if open
    pub fn connection(&self) -> Option<&Connection> {
        self.conn.as_ref()
    }
}

impl Drop for IndexStore {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::error!(target: "store", "Failed to close index {}: {}", self.path.display(), e);
        }
    }
}
