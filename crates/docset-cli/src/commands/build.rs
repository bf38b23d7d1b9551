//! Build command - index documentation into a docset

use anyhow::{Context, Result};
use docset_core::DocsetConfig;
use docset_indexer::{build_docset_with_progress, BuildReport};
use std::io::Write;

use crate::cli::{BuildArgs, Cli, OutputFormat};
use crate::logging;
use crate::output::{colors, human, json};

pub fn run(cli: &Cli, args: &BuildArgs) -> Result<()> {
    let config = load_config(args, cli.debug)?;
    logging::init(config.debug);
    config.validate().context("Invalid configuration")?;
    tracing::debug!(target: "cli", "Building with {:?}", config);

    // In-place counter only makes sense on an interactive human-format terminal;
    // debug mode logs one line per entry instead
    let show_counter =
        !config.debug && cli.format == OutputFormat::Human && atty::is(atty::Stream::Stdout);

    let result = build_docset_with_progress(&config, move |_, n| {
        if show_counter {
            print!("\u{1b}[1000DIndexed {} entries", n);
            let _ = std::io::stdout().flush();
        }
    });
    if show_counter {
        println!();
    }

    let report = result.with_context(|| {
        format!("Failed to build docset at {}", config.docset_root.display())
    })?;

    print_report(cli, &config, &report)
}

/// Merge the optional config file with command-line values
pub fn load_config(args: &BuildArgs, debug: bool) -> Result<DocsetConfig> {
    let mut config = match &args.config {
        Some(path) => DocsetConfig::from_json_file(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?,
        None => DocsetConfig::default(),
    };

    if let Some(name) = &args.docset_name {
        config.docset_name = name.clone();
    }
    if let Some(root) = &args.docset_root {
        config.docset_root = docset_core::normalize_path(root);
    }
    if let Some(version) = &args.doc_version {
        config.version = version.clone();
    }
    if let Some(tagfile) = &args.tagfile {
        config.tagfile = tagfile.clone();
    }
    config.skip_standard = config.skip_standard || args.no_std;
    config.skip_doxygen = config.skip_doxygen || args.no_doxygen;
    config.debug = config.debug || debug;

    Ok(config)
}

fn print_report(cli: &Cli, config: &DocsetConfig, report: &BuildReport) -> Result<()> {
    match cli.format {
        OutputFormat::Human => {
            println!("{}", colors::header(&format!("Built {}", config.docset_name)));
            println!();

            match &report.standard {
                Some(std) => println!(
                    "{}",
                    human::format_field(
                        "Standard docs",
                        &format!(
                            "{} entries from {} pages ({} skipped)",
                            colors::format_count(std.entries),
                            std.pages,
                            std.skipped
                        )
                    )
                ),
                None => println!("{}", human::format_field("Standard docs", "skipped")),
            }

            match &report.doxygen {
                Some(dox) if dox.enabled => println!(
                    "{}",
                    human::format_field(
                        "Doxygen docs",
                        &format!(
                            "{} entries ({} skipped, {} unknown kinds)",
                            colors::format_count(dox.entries),
                            dox.skipped,
                            dox.unknown_kinds
                        )
                    )
                ),
                Some(_) => println!(
                    "  {}",
                    colors::warning(&format!(
                        "Doxygen docs disabled, no tagfile found at {}",
                        config.tagfile_path().display()
                    ))
                ),
                None => println!("{}", human::format_field("Doxygen docs", "skipped")),
            }

            println!(
                "{}",
                human::format_field("Index entries", &colors::format_count(report.total_rows))
            );
            println!(
                "{}",
                human::format_field("Index", &report.index_path.display().to_string())
            );
            println!(
                "{}",
                human::format_field("Descriptor", &report.plist_path.display().to_string())
            );
            println!();
            println!("{}", colors::success("Docset index is ready"));
        }

        OutputFormat::Json => {
            let output = serde_json::json!({
                "docset": config.docset_name,
                "version": config.version,
                "standard": report.standard.as_ref().map(|s| serde_json::json!({
                    "pages": s.pages,
                    "entries": s.entries,
                    "new_entries": s.new_entries,
                    "skipped": s.skipped
                })),
                "doxygen": report.doxygen.as_ref().map(|d| serde_json::json!({
                    "enabled": d.enabled,
                    "entries": d.entries,
                    "new_entries": d.new_entries,
                    "skipped": d.skipped,
                    "suppressed": d.suppressed,
                    "unknown_kinds": d.unknown_kinds
                })),
                "attempted": report.attempted,
                "total_rows": report.total_rows,
                "index_path": report.index_path.to_string_lossy(),
                "plist_path": report.plist_path.to_string_lossy()
            });
            println!("{}", json::pretty(&output));
        }

        OutputFormat::Minimal => {
            println!("{}", report.index_path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_cli_values_override_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("docset.json");
        std::fs::write(
            &path,
            r#"{"docset_root": "/from/file.docset", "version": "16", "skip_doxygen": true}"#,
        )
        .unwrap();

        let args = BuildArgs {
            config: Some(path),
            doc_version: Some("17".to_string()),
            no_std: true,
            ..Default::default()
        };
        let config = load_config(&args, false).unwrap();

        assert_eq!(config.docset_root, PathBuf::from("/from/file.docset"));
        assert_eq!(config.version, "17");
        assert!(config.skip_doxygen);
        assert!(config.skip_standard);
        assert!(!config.debug);
    }

    #[test]
    fn test_missing_version_fails_validation() {
        let args = BuildArgs {
            docset_root: Some(PathBuf::from("/out/./LLVM.docset")),
            ..Default::default()
        };
        let config = load_config(&args, true).unwrap();
        assert_eq!(config.docset_root, PathBuf::from("/out/LLVM.docset"));
        assert!(config.debug);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_from_config_file_selects_debug_logging() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("docset.json");
        std::fs::write(
            &path,
            r#"{"docset_root": "/out/LLVM.docset", "version": "17", "debug": true}"#,
        )
        .unwrap();

        let args = BuildArgs {
            config: Some(path),
            ..Default::default()
        };
        let config = load_config(&args, false).unwrap();

        assert!(config.debug);
        assert_eq!(logging::default_filter(config.debug), "debug");
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = BuildArgs {
            config: Some(PathBuf::from("/nonexistent/docset.json")),
            ..Default::default()
        };
        assert!(load_config(&args, false).is_err());
    }
}
