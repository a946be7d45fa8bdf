//! Persisted credentials: Splunk binary path, username and password as JSON.
//!
//! The file is read leniently: missing or corrupt means "not configured" and triggers a prompt.
//! The password is stored in cleartext; it ends up on the Splunk command line anyway.

use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::config::SplunkLayout;
use crate::utils::interaction::Interaction;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub splunk_path: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Configuration {
    /// Load from `path`. Read or parse failures yield the empty configuration.
    pub fn load(path: &Path) -> Self {
        let s = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                debug!("{}: {}", path.display(), e);
                return Self::default();
            }
        };
        serde_json::from_str(&s)
            .map_err(|e| warn!("{} is corrupt, ignoring: {}", path.display(), e))
            .unwrap_or_default()
    }

    /// Overwrite `path` with the current state.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serialize configuration")?;
        std::fs::write(path, json)
            .with_context(|| format!("write configuration to {}", path.display()))?;
        debug!("Saved configuration to {}", path.display());
        Ok(())
    }

    pub fn binary(&self) -> PathBuf {
        PathBuf::from(&self.splunk_path)
    }

    pub fn has_binary(&self) -> bool {
        !self.splunk_path.is_empty() && self.binary().exists()
    }

    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// Offer conventional install locations first, then the file picker.
    pub fn prompt_for_path(&mut self, ui: &mut dyn Interaction) -> Result<()> {
        let found = SplunkLayout::COMMON_BINARY_PATHS
            .iter()
            .map(Path::new)
            .filter(|p| p.exists());
        for candidate in found {
            if ui.confirm(&format!(
                "Splunk binary found at {}. Use this location?",
                candidate.display()
            ))? {
                self.splunk_path = candidate.display().to_string();
                return Ok(());
            }
        }
        match ui.pick_file("Path to the Splunk binary (splunk or splunk.exe)")? {
            Some(p) => {
                self.splunk_path = p.display().to_string();
                Ok(())
            }
            None => bail!("no Splunk binary selected"),
        }
    }

    pub fn prompt_for_credentials(&mut self, ui: &mut dyn Interaction) -> Result<()> {
        self.username = ui.read_line("Enter Splunk username: ")?;
        self.password = ui.read_secret("Enter Splunk password: ")?;
        Ok(())
    }

    /// Load `path`, prompt for whatever is missing or invalid, and persist the result.
    pub fn ensure(path: &Path, ui: &mut dyn Interaction) -> Result<Self> {
        let mut config = Self::load(path);
        if !config.has_binary() {
            if !config.splunk_path.is_empty() {
                warn!("Splunk binary not found at {}", config.splunk_path);
            }
            config.prompt_for_path(ui)?;
        }
        if !config.has_credentials() {
            config.prompt_for_credentials(ui)?;
        }
        config.save(path)?;
        info!("Using Splunk binary at: {}", config.splunk_path);
        Ok(config)
    }
}
