//! docset-db - Read-only access to docset search indexes
//!
//! Opens an existing `docSet.dsidx` for status reports and name lookups.
//! Writing is the job of `docset-indexer`.

pub mod connection;
pub mod queries;

pub use connection::*;
pub use queries::*;
