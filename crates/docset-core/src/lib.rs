//! docset-core - Core types and configuration for the docset indexer
//!
//! This crate provides the index entry model shared by the writer
//! (`docset-indexer`) and the read-only query layer (`docset-db`), along with
//! the run configuration that every component receives explicitly.

pub mod config;
pub mod error;
pub mod types;

pub use config::*;
pub use error::*;
pub use types::*;
