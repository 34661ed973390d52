//! Watch a directory until interrupted

use crate::output;
use anyhow::{Context, Result};
use clap::Args;
use pollwatch::{change_channel, PollWatcher, ScanMode, WatchSettings};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Default)]
pub struct WatchArgs {
    /// Directory to watch (overrides the settings file)
    pub root: Option<PathBuf>,

    /// File name suffix to match (repeatable, overrides the settings file)
    #[arg(short = 's', long = "suffix")]
    pub suffixes: Vec<String>,

    /// Seconds between scans (default: 10)
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Scan the root's subdirectories instead of the root itself
    #[arg(long)]
    pub nested: bool,

    /// TOML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print one JSON object per report
    #[arg(long)]
    pub json: bool,

    /// Also print cycles that found no changes
    #[arg(long)]
    pub emit_empty: bool,
}

pub async fn run(args: WatchArgs) -> Result<()> {
    let json = args.json;
    let settings = resolve_settings(args)?;

    let (sink, mut changes) = change_channel();
    let config = settings
        .into_config(sink)
        .context("Invalid watch configuration")?;
    let watcher = PollWatcher::new(config)?;
    watcher.start();

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            report = changes.recv() => match report {
                Some(report) => output::print_report(&report, json)?,
                None => break,
            },
            result = &mut shutdown => {
                result.context("Failed to listen for Ctrl-C")?;
                info!("Interrupted, shutting down");
                watcher.destroy();

                while let Some(report) = changes.recv().await {
                    output::print_report(&report, json)?;
                }
                break;
            }
        }
    }

    Ok(())
}

/// Merge the settings file (if any) with command line overrides
fn resolve_settings(args: WatchArgs) -> Result<WatchSettings> {
    let mut settings = match &args.config {
        Some(path) => WatchSettings::load(path)?,
        None => WatchSettings::default(),
    };

    if let Some(root) = args.root {
        settings.root = root;
    }
    if !args.suffixes.is_empty() {
        settings.criteria = args.suffixes;
    }
    if args.interval.is_some() {
        settings.interval_secs = args.interval;
    }
    if args.nested {
        settings.mode = ScanMode::Nested;
    }
    if args.emit_empty {
        settings.emit_empty = true;
    }

    Ok(settings)
}
