//! Run the Splunk binary as a blocking subprocess.

use anyhow::{Context, Result};
use log::debug;
use std::path::Path;
use std::process::Command;

/// Captured output of one CLI call.
#[derive(Clone, Debug, Default)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code; `None` when killed by a signal.
    pub status: Option<i32>,
}

impl ToolOutput {
    /// stdout followed by stderr, the way a terminal would show them.
    pub fn combined(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }
}

/// Executes `binary args...` and waits for it. Implemented by [`SplunkCli`] and by test fakes.
pub trait ToolRunner {
    fn run(&self, binary: &Path, args: &[String]) -> Result<ToolOutput>;
}

/// The real thing: `std::process::Command`, no shell, no timeout.
#[derive(Clone, Copy, Debug, Default)]
pub struct SplunkCli;

impl ToolRunner for SplunkCli {
    fn run(&self, binary: &Path, args: &[String]) -> Result<ToolOutput> {
        // verb and noun only; the tail carries -auth
        debug!(
            "Running {} {}",
            binary.display(),
            args.iter().take(2).cloned().collect::<Vec<_>>().join(" ")
        );
        let out = Command::new(binary)
            .args(args)
            .output()
            .with_context(|| format!("launch {}", binary.display()))?;
        Ok(ToolOutput {
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            status: out.status.code(),
        })
    }
}
