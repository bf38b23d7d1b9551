//! Docset build pipeline
//!
//! open store → standard pages → Doxygen tag file → close store → Info.plist.
//!
//! The store is closed (and committed) whether or not extraction succeeds, so
//! a failed run keeps every entry inserted before the failure. The plist is
//! only written after a successful extraction.

use docset_core::{DocsetConfig, IndexEntry};
use std::path::PathBuf;

use crate::connection::{IndexStore, IndexerError};
use crate::doxygen::{DoxygenIndexer, DoxygenReport};
use crate::plist::write_plist;
use crate::standard::{StandardIndexer, StandardReport};

/// Result of a full docset build
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// `None` when the standard pass was skipped
    pub standard: Option<StandardReport>,
    /// `None` when the Doxygen pass was skipped
    pub doxygen: Option<DoxygenReport>,
    /// Insert attempts across both passes
    pub attempted: u64,
    /// Rows in the index after the build (including earlier runs)
    pub total_rows: i64,
    pub index_path: PathBuf,
    pub plist_path: PathBuf,
}

/// Build the docset index and descriptor without progress reporting
pub fn build_docset(config: &DocsetConfig) -> Result<BuildReport, IndexerError> {
    build_docset_with_progress(config, |_, _| {})
}

/// Build the docset index and descriptor, reporting each insert attempt
pub fn build_docset_with_progress<F>(
    config: &DocsetConfig,
    on_progress: F,
) -> Result<BuildReport, IndexerError>
where
    F: FnMut(&IndexEntry, u64) + 'static,
{
    config.validate()?;

    let mut store = IndexStore::new(config.index_path()).with_progress(on_progress);
    store.open()?;

    let extracted = run_extractors(&mut store, config);
    let attempted = store.attempts();
    let total_rows = count_rows(&store);
    let closed = store.close();

    let (standard, doxygen) = extracted?;
    closed?;
    let total_rows = total_rows?;

    let plist_path = write_plist(config)?;

    Ok(BuildReport {
        standard,
        doxygen,
        attempted,
        total_rows,
        index_path: config.index_path(),
        plist_path,
    })
}

fn run_extractors(
    store: &mut IndexStore,
    config: &DocsetConfig,
) -> Result<(Option<StandardReport>, Option<DoxygenReport>), IndexerError> {
    let standard = if config.skip_standard {
        tracing::info!(target: "pipeline", "Skipping standard documentation");
        None
    } else {
        Some(StandardIndexer::new(store, config).run()?)
    };

    let doxygen = if config.skip_doxygen {
        tracing::info!(target: "pipeline", "Skipping Doxygen documentation");
        None
    } else {
        Some(DoxygenIndexer::new(store, config).run()?)
    };

    Ok((standard, doxygen))
}

fn count_rows(store: &IndexStore) -> Result<i64, IndexerError> {
    let conn = store.connection().ok_or(IndexerError::NotOpen)?;
    let count = conn.query_row("SELECT COUNT(*) FROM searchIndex", [], |row| row.get(0))?;
    Ok(count)
}
