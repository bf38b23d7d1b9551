//! Search command - look up index entries by name

use anyhow::{Context, Result};
use colored::Colorize;
use docset_core::DocsetConfig;
use docset_db::{DocsetDb, LookupOptions};
use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use crate::output::{colors, human, json, minimal};

pub fn run(
    cli: &Cli,
    docset_root: &Path,
    query: &str,
    entry_type: Option<&str>,
    limit: i64,
) -> Result<()> {
    let index_path = DocsetConfig::new(docset_root, "").index_path();
    let db = DocsetDb::open(&index_path)
        .with_context(|| format!("Failed to open index at {}", index_path.display()))?;

    let mut options = LookupOptions::new().with_limit(limit);
    if let Some(t) = entry_type {
        options = options.with_type(t);
    }
    let entries = db.lookup(query, &options)?;

    match cli.format {
        OutputFormat::Human => {
            if entries.is_empty() {
                println!("No entries found for: {}", query.cyan());
                if let Some(t) = entry_type {
                    let known = db.entry_types()?;
                    if !known.iter().any(|k| k == t) {
                        println!();
                        println!(
                            "{}",
                            colors::warning(&format!("No entries of type '{}' in this index", t))
                        );
                        println!("  {}: {}", colors::label("Known types"), known.join(", "));
                    }
                }
            } else {
                println!(
                    "{}",
                    colors::header(&format!("Entries matching '{}' ({})", query, entries.len()))
                );
                println!();
                for entry in &entries {
                    println!("{}", human::format_entry(entry));
                }
            }
        }

        OutputFormat::Json => {
            for entry in &entries {
                println!("{}", json::format_entry(entry));
            }
        }

        OutputFormat::Minimal => {
            for entry in &entries {
                println!("{}", minimal::format_entry(entry));
            }
        }
    }

    Ok(())
}
