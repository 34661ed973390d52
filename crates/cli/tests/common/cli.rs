//! CLI command execution helpers
//!
//! Thin wrapper around the `pw` binary that captures output and provides
//! convenient assertion methods.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// CLI command builder
pub struct PwCommand {
    working_dir: PathBuf,
    args: Vec<String>,
}

impl PwCommand {
    /// Create a new command in the given working directory
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        Self {
            working_dir: working_dir.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    /// Add command arguments
    pub fn args<S: AsRef<str>>(&mut self, args: &[S]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Execute command and return its output
    pub fn execute(&self) -> Result<CommandResult> {
        let output = Command::new(env!("CARGO_BIN_EXE_pw"))
            .args(&self.args)
            .current_dir(&self.working_dir)
            .output()
            .context("Failed to execute command")?;

        Ok(CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }

    /// Execute and assert success
    pub fn assert_success(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if !result.success() {
            anyhow::bail!(
                "Command failed (exit code: {}):\nArgs: {:?}\nStdout: {}\nStderr: {}",
                result.exit_code,
                self.args,
                result.stdout,
                result.stderr
            );
        }

        Ok(result)
    }

    /// Execute and expect failure
    pub fn assert_failure(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if result.success() {
            anyhow::bail!(
                "Command should have failed but succeeded:\nArgs: {:?}\nStdout: {}",
                self.args,
                result.stdout
            );
        }

        Ok(result)
    }
}

/// Command execution result
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandResult {
    /// Check if command succeeded
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Check if stdout contains text
    pub fn contains_stdout(&self, text: &str) -> bool {
        self.stdout.contains(text)
    }

    /// Check if stderr contains text
    pub fn contains_stderr(&self, text: &str) -> bool {
        self.stderr.contains(text)
    }
}

/// Macro for convenient command construction
///
/// Usage:
/// ```ignore
/// pw!(dir, "scan", ".", "-s", ".txt").assert_success()?;
/// ```
#[macro_export]
macro_rules! pw {
    ($dir:expr, $($arg:expr),*) => {{
        let mut cmd = $crate::common::cli::PwCommand::new($dir);
        cmd.args(&[$($arg),*]);
        cmd
    }};
}
