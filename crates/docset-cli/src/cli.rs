//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Build and inspect docset search indexes
#[derive(Parser, Debug)]
#[command(name = "docset")]
#[command(version)]
#[command(about = "Build and inspect docset search indexes")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Enable debugging output (one line per indexed entry)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output with colors
    #[default]
    Human,
    /// JSON output
    Json,
    /// Minimal text output
    Minimal,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Index the documentation and write the docset descriptor
    Build(BuildArgs),

    /// Show statistics for an existing index
    Status {
        /// The path to the docset directory
        #[arg(long, env = "DOCSET_ROOT")]
        docset_root: PathBuf,
    },

    /// Look up index entries by name
    Search {
        /// Case-insensitive substring of the entry name
        query: String,

        /// The path to the docset directory
        #[arg(long, env = "DOCSET_ROOT")]
        docset_root: PathBuf,

        /// Only entries of this type (e.g. Class, Guide)
        #[arg(short = 't', long = "type")]
        entry_type: Option<String>,

        /// Limit results
        #[arg(short = 'n', long, default_value = "50")]
        limit: i64,
    },
}

#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// JSON configuration file; command-line values take precedence
    #[arg(short, long, env = "DOCSET_CONFIG")]
    pub config: Option<PathBuf>,

    /// The name of the docset (default: LLVM.docset)
    #[arg(long = "docset")]
    pub docset_name: Option<String>,

    /// The path to the docset directory
    #[arg(long, env = "DOCSET_ROOT")]
    pub docset_root: Option<PathBuf>,

    /// The documentation version for this docset
    #[arg(long, alias = "llvm-version")]
    pub doc_version: Option<String>,

    /// Doxygen tag file name inside Documents/doxygen (default: llvm.tags)
    #[arg(long)]
    pub tagfile: Option<String>,

    /// Do not index standard documentation
    #[arg(long)]
    pub no_std: bool,

    /// Do not index Doxygen documentation
    #[arg(long)]
    pub no_doxygen: bool,
}
