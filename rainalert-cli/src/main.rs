//! Binary crate for the `rainalert` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Merging flags with the optional config file
//! - Printing warnings to stdout

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.init_logging();
    cmd.run().await
}
