//! The session: configuration, settings and the tool runner, threaded through every operation.

use anyhow::{Result, bail};
use log::{debug, info, warn};
use std::path::PathBuf;

use crate::Settings;
use crate::conf::discover_conf;
use crate::engine::cancel::CancelToken;
use crate::engine::classify::filter_benign;
use crate::engine::invoker::{ToolOutput, ToolRunner};
use crate::engine::tools::{data_root_for, splunk_home_for};
use crate::utils::interaction::Interaction;
use crate::utils::store::Configuration;

pub struct Session {
    pub config: Configuration,
    pub settings: Settings,
    /// Where re-prompted credentials are saved. `None` keeps them in memory only.
    config_path: Option<PathBuf>,
    runner: Box<dyn ToolRunner>,
    cancel: CancelToken,
}

impl Session {
    pub fn new(config: Configuration, settings: Settings, runner: Box<dyn ToolRunner>) -> Self {
        Self {
            config,
            settings,
            config_path: None,
            runner,
            cancel: CancelToken::default(),
        }
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn binary(&self) -> PathBuf {
        self.config.binary()
    }

    pub fn splunk_home(&self) -> PathBuf {
        splunk_home_for(&self.binary())
    }

    /// Index data root: settings override, else `<SPLUNK_HOME>/var/lib/splunk`.
    pub fn data_root(&self) -> PathBuf {
        self.settings
            .data_root
            .clone()
            .unwrap_or_else(|| data_root_for(&self.binary()))
    }

    /// Index directory for `name` under the data root.
    pub fn index_dir(&self, name: &str) -> PathBuf {
        self.data_root().join(name)
    }

    pub fn conf_path(&self) -> Option<PathBuf> {
        discover_conf(&self.splunk_home(), self.settings.conf_path.as_deref())
    }

    /// `-auth user:password`
    pub fn auth_args(&self) -> [String; 2] {
        [
            "-auth".to_string(),
            format!("{}:{}", self.config.username, self.config.password),
        ]
    }

    /// Run the binary and return raw stdout/stderr.
    pub fn run_raw(&self, args: &[String]) -> Result<ToolOutput> {
        self.runner.run(&self.binary(), args)
    }

    /// Run the binary and return stdout+stderr with benign warning lines removed.
    pub fn run(&self, args: &[String]) -> Result<String> {
        let out = self.run_raw(args)?;
        if let Some(code) = out.status
            && code != 0
        {
            debug!("{} exited with status {}", self.binary().display(), code);
        }
        Ok(filter_benign(
            &out.combined(),
            &self.settings.classifier.benign,
        ))
    }

    fn persist(&self) -> Result<()> {
        match &self.config_path {
            Some(p) => self.config.save(p),
            None => Ok(()),
        }
    }

    /// `splunk login` with the stored credentials. A "Login failed" reply re-prompts credentials; a
    /// launch failure re-prompts the binary path. Gives up after `login_retries` attempts.
    pub fn verify_login(&mut self, ui: &mut dyn Interaction) -> Result<()> {
        let attempts = self.settings.login_retries.max(1);
        for attempt in 1..=attempts {
            if !self.config.has_binary() {
                warn!("Splunk binary not found at {}", self.config.splunk_path);
                self.config.prompt_for_path(ui)?;
                self.persist()?;
            }
            let mut args = vec!["login".to_string()];
            args.extend(self.auth_args());
            let last = attempt == attempts;
            match self.run_raw(&args) {
                Ok(out) if out.stderr.contains(&self.settings.classifier.login_failure) => {
                    warn!("Login failed with provided credentials ({attempt}/{attempts})");
                    if !last {
                        self.config.prompt_for_credentials(ui)?;
                        self.persist()?;
                    }
                }
                Ok(_) => {
                    info!("Successfully connected to Splunk service");
                    info!("Authenticated as user: {}", self.config.username);
                    return Ok(());
                }
                Err(e) => {
                    warn!("Error testing Splunk connection: {e:#}");
                    if !last {
                        self.config.prompt_for_path(ui)?;
                        self.persist()?;
                    }
                }
            }
        }
        bail!("could not log in to Splunk after {attempts} attempts")
    }
}
