//! Watcher configuration
//!
//! [`WatchConfig`] is validated once, by [`WatchConfigBuilder::build`], and is
//! immutable afterwards. [`WatchSettings`] is the on-disk (TOML) form.

use crate::error::ConfigError;
use crate::scan::{ScanMode, Scanner};
use crate::sink::ChangeSink;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Poll interval used when none (or zero) is configured
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

/// Validated watcher configuration
#[derive(Clone)]
pub struct WatchConfig {
    root: PathBuf,
    criteria: Vec<String>,
    interval: Duration,
    emit_empty: bool,
    changes: ChangeSink,
    scanner: Arc<dyn Scanner>,
}

impl WatchConfig {
    /// Start building a configuration
    pub fn builder() -> WatchConfigBuilder {
        WatchConfigBuilder::default()
    }

    /// Directory being watched
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File name suffixes to match, in priority order
    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    /// Time between scans
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether cycles without changes still produce a report
    pub fn emit_empty(&self) -> bool {
        self.emit_empty
    }

    /// Where reports are sent
    pub fn changes(&self) -> &ChangeSink {
        &self.changes
    }

    /// The scanner used each cycle
    pub fn scanner(&self) -> &Arc<dyn Scanner> {
        &self.scanner
    }
}

impl std::fmt::Debug for WatchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchConfig")
            .field("root", &self.root)
            .field("criteria", &self.criteria)
            .field("interval", &self.interval)
            .field("emit_empty", &self.emit_empty)
            .field("changes", &self.changes)
            .finish_non_exhaustive()
    }
}

/// Builder for [`WatchConfig`]
#[derive(Default)]
pub struct WatchConfigBuilder {
    root: Option<PathBuf>,
    criteria: Vec<String>,
    interval: Option<Duration>,
    emit_empty: bool,
    changes: Option<ChangeSink>,
    scanner: Option<Arc<dyn Scanner>>,
}

impl WatchConfigBuilder {
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Add one suffix to match
    pub fn criterion(mut self, suffix: impl Into<String>) -> Self {
        self.criteria.push(suffix.into());
        self
    }

    /// Add several suffixes to match, keeping their order
    pub fn criteria<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.criteria.extend(suffixes.into_iter().map(Into::into));
        self
    }

    /// Time between scans; zero falls back to [`DEFAULT_INTERVAL`]
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Send a report even for cycles that found no changes (off by default)
    pub fn emit_empty_reports(mut self, emit: bool) -> Self {
        self.emit_empty = emit;
        self
    }

    pub fn changes(mut self, sink: ChangeSink) -> Self {
        self.changes = Some(sink);
        self
    }

    pub fn scanner(mut self, scanner: impl Scanner + 'static) -> Self {
        self.scanner = Some(Arc::new(scanner));
        self
    }

    /// Use an already shared scanner
    pub fn shared_scanner(mut self, scanner: Arc<dyn Scanner>) -> Self {
        self.scanner = Some(scanner);
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<WatchConfig, ConfigError> {
        let root = self
            .root
            .filter(|root| !root.as_os_str().to_string_lossy().trim().is_empty())
            .ok_or(ConfigError::EmptyRoot)?;

        if self.criteria.is_empty() {
            return Err(ConfigError::EmptyCriteria);
        }
        if let Some(index) = self.criteria.iter().position(|s| s.trim().is_empty()) {
            return Err(ConfigError::BlankCriterion(index));
        }

        let changes = self.changes.ok_or(ConfigError::MissingChannel)?;
        let scanner = self.scanner.ok_or(ConfigError::MissingScanner)?;

        let interval = match self.interval {
            Some(interval) if !interval.is_zero() => interval,
            _ => DEFAULT_INTERVAL,
        };

        Ok(WatchConfig {
            root,
            criteria: self.criteria,
            interval,
            emit_empty: self.emit_empty,
            changes,
            scanner,
        })
    }
}

/// Watcher settings as stored in a TOML file
///
/// ```toml
/// root = "/srv/configs"
/// criteria = [".cfg", ".toml"]
/// interval_secs = 5
/// mode = "nested"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchSettings {
    pub root: PathBuf,
    pub criteria: Vec<String>,
    pub interval_secs: Option<u64>,
    pub mode: ScanMode,
    pub emit_empty: bool,
}

impl WatchSettings {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))
    }

    /// Parse settings from TOML text
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Build a validated configuration sending to `sink`
    pub fn into_config(self, sink: ChangeSink) -> Result<WatchConfig, ConfigError> {
        let mut builder = WatchConfig::builder()
            .root(self.root)
            .criteria(self.criteria)
            .emit_empty_reports(self.emit_empty)
            .changes(sink)
            .shared_scanner(self.mode.scanner());

        if let Some(secs) = self.interval_secs {
            builder = builder.interval(Duration::from_secs(secs));
        }

        builder.build()
    }
}
