//! CLI command implementations

pub mod build;
pub mod search;
pub mod status;
