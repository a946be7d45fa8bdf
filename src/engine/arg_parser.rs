use clap::Parser;
use std::path::PathBuf;

use crate::utils::config::PackagePaths;

/// Manage Splunk indexes: create, delete, back up and restore.
#[derive(Clone, Parser)]
#[command(name = "splidx")]
#[command(about = "Interactive Splunk index manager with zip backup and restore.")]
pub struct Cli {
    /// Credentials file (JSON). Default: `splidx.json` in the current directory.
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Settings file (TOML). Default: `.splidx.toml` in the current directory.
    #[arg(long, short = 's', value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Verbose output and progress bars.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(PackagePaths::get().config_filename()))
    }

    pub fn settings_path(&self) -> PathBuf {
        self.settings
            .clone()
            .unwrap_or_else(|| PathBuf::from(PackagePaths::get().settings_filename()))
    }
}
