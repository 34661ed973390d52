//! Pollwatch CLI - pw command

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

/// Pollwatch - watch a directory for changed files by polling
#[derive(Parser)]
#[command(name = "pw")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log every scan cycle
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch a directory and print changes as they are found
    Watch(cmd::watch::WatchArgs),
    /// Scan a directory once and list matching files
    Scan {
        /// Directory to scan
        root: PathBuf,
        /// File name suffix to match (repeatable)
        #[arg(short = 's', long = "suffix", required = true)]
        suffixes: Vec<String>,
        /// Scan the root's subdirectories instead of the root itself
        #[arg(long)]
        nested: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Watch(args) => cmd::watch::run(args).await,
        Commands::Scan { root, suffixes, nested, json } => {
            cmd::scan::run(&root, &suffixes, nested, json)
        }
    }
}
