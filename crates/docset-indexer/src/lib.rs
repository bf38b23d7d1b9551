//! docset-indexer - Indexing pipeline for docset search indexes
//!
//! This crate owns all **write** operations to `docSet.dsidx`.
//! The companion `docset-db` crate provides read-only access for status and
//! lookup commands. Extractors only ever write to the store, never read it.

pub mod connection;
pub mod doxygen;
pub mod paths;
pub mod pipeline;
pub mod plist;
pub mod schema;
pub mod standard;

pub use connection::{IndexStore, IndexerError, ProgressFn};
pub use doxygen::{DoxygenIndexer, DoxygenReport, TagRule, TypeRule, TAG_RULES};
pub use paths::{resolve_href, FILTERED_HREFS};
pub use pipeline::{build_docset, build_docset_with_progress, BuildReport};
pub use plist::{render_plist, write_plist};
pub use schema::init_schema;
pub use standard::{PageLayout, PageRule, SectionRule, StandardIndexer, StandardReport, STANDARD_PAGES};
