//! One-shot scan

use crate::output;
use anyhow::{Context, Result};
use pollwatch::ScanMode;
use std::path::Path;

pub fn run(root: &Path, suffixes: &[String], nested: bool, json: bool) -> Result<()> {
    let mode = if nested { ScanMode::Nested } else { ScanMode::Flat };

    let snapshot = mode
        .scan(root, suffixes)
        .with_context(|| format!("Failed to scan {}", root.display()))?;

    output::print_snapshot(&snapshot, json)
}
