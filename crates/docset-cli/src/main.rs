//! docset - build and inspect docset search indexes

mod cli;
mod commands;
mod logging;
mod output;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    match &cli.command {
        // Logging waits for the merged config, which may enable debug
        Command::Build(args) => commands::build::run(&cli, args),
        Command::Status { docset_root } => {
            logging::init(cli.debug);
            commands::status::run(&cli, docset_root)
        }
        Command::Search {
            query,
            docset_root,
            entry_type,
            limit,
        } => {
            logging::init(cli.debug);
            commands::search::run(&cli, docset_root, query, entry_type.as_deref(), *limit)
        }
    }
}
