//! Terminal output for reports and snapshots

use anyhow::Result;
use chrono::{DateTime, Local};
use owo_colors::OwoColorize;
use pollwatch::{ChangeReport, MatchInfo, Snapshot};
use std::time::SystemTime;

/// Print one change report
pub fn print_report(report: &ChangeReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(report)?);
        return Ok(());
    }

    let now = Local::now().format("%H:%M:%S").to_string();

    if report.is_error() {
        let label = if report.is_root_read_error() {
            "root unreadable"
        } else {
            "scan failed"
        };
        println!("{} {} {}", now.dimmed(), label.red().bold(), report.error_details());
        return Ok(());
    }

    if report.is_empty() {
        println!("{} {}", now.dimmed(), "no changes".dimmed());
        return Ok(());
    }

    println!(
        "{} {} updated, {} deleted",
        now.dimmed(),
        report.updated().len().to_string().green(),
        report.deleted().len().to_string().red()
    );

    for info in sorted(report.updated()) {
        println!("  {} {}  {}", "+".green(), info.path.display(), format_time(info.modified).dimmed());
    }
    for info in sorted(report.deleted()) {
        println!("  {} {}", "-".red(), info.path.display());
    }

    Ok(())
}

/// Print every file in a snapshot, sorted by path
pub fn print_snapshot(snapshot: &Snapshot, json: bool) -> Result<()> {
    let entries = snapshot.sorted();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for info in &entries {
        println!(
            "{}  {}  {}",
            format_time(info.modified).dimmed(),
            info.matched_on.cyan(),
            info.path.display()
        );
    }
    println!("{} matching files", entries.len());

    Ok(())
}

fn sorted(infos: &[MatchInfo]) -> Vec<&MatchInfo> {
    let mut infos: Vec<_> = infos.iter().collect();
    infos.sort_by(|a, b| a.path.cmp(&b.path));
    infos
}

fn format_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
