//! snipdoc - personal snippet manager
//!
//! Command-line front end over the snippet library: list, search, add, edit
//! and document code snippets kept in a local data directory.

use clap::Parser;
use color_eyre::{Result, eyre::eyre};
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = cli::Cli::parse();
    init_logging(args.verbose);

    cli::execute(args).map_err(|err| eyre!("{err:#}"))
}

/// Logs go to stderr so command output stays clean on stdout
fn init_logging(verbose: bool) {
    let default_level = if verbose { "snipdoc=debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_env("SNIPDOC_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
