//! Output formatting for each `--format`

pub mod colors;
pub mod human;
pub mod json;
pub mod minimal;
