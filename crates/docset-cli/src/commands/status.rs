//! Status command - summarize an existing index

use anyhow::Result;
use docset_core::DocsetConfig;
use docset_db::{DbError, DocsetDb};
use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use crate::output::{colors, json};

pub fn run(cli: &Cli, docset_root: &Path) -> Result<()> {
    let index_path = DocsetConfig::new(docset_root, "").index_path();

    let db = match DocsetDb::open(&index_path) {
        Ok(db) => db,
        Err(DbError::NotFound(path)) => return not_found(cli, &path),
        Err(e) => return Err(e.into()),
    };
    let stats = db.stats()?;

    match cli.format {
        OutputFormat::Human => {
            println!("{}", colors::header("Index Status"));
            println!();
            println!("  {}: {}", colors::label("Index"), stats.db_path.display());
            println!(
                "  {}: {}",
                colors::label("Size"),
                colors::format_size(stats.db_size_bytes)
            );
            println!(
                "  {}: {}",
                colors::label("Entries"),
                colors::format_count(stats.entry_count)
            );

            if !stats.by_type.is_empty() {
                println!();
                for tc in &stats.by_type {
                    println!(
                        "  {}: {}",
                        colors::colored_type(&tc.entry_type),
                        colors::value(&colors::format_count(tc.count))
                    );
                }
            }

            println!();
            if stats.entry_count == 0 {
                println!("{}", colors::warning("Index is empty"));
            } else {
                println!("{}", colors::success("Index is healthy"));
            }
        }

        OutputFormat::Json => {
            let by_type: serde_json::Map<String, serde_json::Value> = stats
                .by_type
                .iter()
                .map(|tc| (tc.entry_type.clone(), tc.count.into()))
                .collect();
            let output = serde_json::json!({
                "db_path": stats.db_path.to_string_lossy(),
                "db_size_bytes": stats.db_size_bytes,
                "entry_count": stats.entry_count,
                "by_type": by_type,
                "status": if stats.entry_count == 0 { "empty" } else { "healthy" }
            });
            println!("{}", json::pretty(&output));
        }

        OutputFormat::Minimal => {
            println!("{}", stats.entry_count);
        }
    }

    Ok(())
}

fn not_found(cli: &Cli, path: &Path) -> Result<()> {
    match cli.format {
        OutputFormat::Human => {
            println!("{}", colors::error("Index not found"));
            println!();
            println!("  {}: {}", colors::label("Expected"), path.display());
            println!();
            println!("Build the index first:");
            println!("  docset build --docset-root <DOCSET> --doc-version <VERSION>");
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "status": "not_found",
                "error": "Index not found",
                "db_path": path.to_string_lossy()
            });
            println!("{}", json::pretty(&output));
        }
        OutputFormat::Minimal => {
            eprintln!("not found");
        }
    }

    Ok(())
}
