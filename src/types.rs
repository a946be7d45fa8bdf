//! Public types for sessions, index listings and archive reports.

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::engine::classify::OutputClassifier;
use crate::engine::tools::format_size;
use crate::utils::config::{DEFAULT_LOGIN_RETRIES, SplunkLayout};

/// One index as shown in the manage list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexDescriptor {
    pub name: String,
    /// Sum of file sizes under `<data_root>/<name>`; 0 when the directory is missing.
    pub size_bytes: u64,
}

impl IndexDescriptor {
    pub fn human_size(&self) -> String {
        format_size(self.size_bytes)
    }
}

/// Classification of one Splunk CLI response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Success,
    Failure,
    /// Matched neither phrase set; treated as failed, raw text surfaced.
    Unexpected,
}

/// Result of a create/delete call: verdict plus the message for the user.
#[derive(Clone, Debug)]
pub struct Outcome {
    pub verdict: Verdict,
    pub message: String,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.verdict == Verdict::Success
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// How a password-protected backup is encrypted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncryptionMode {
    None,
    /// WinZip AES-256 (authenticated).
    #[default]
    Aes256,
    /// Legacy PKWARE ZipCrypto. Weak; only for tools that cannot read AES.
    ZipCrypto,
}

impl fmt::Display for EncryptionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EncryptionMode::None => "none",
            EncryptionMode::Aes256 => "AES-256",
            EncryptionMode::ZipCrypto => "ZipCrypto (legacy, weak)",
        })
    }
}

/// Result of a best-effort `indexes.conf` edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfUpdate {
    Updated(PathBuf),
    /// File found but nothing to change (e.g. no block to remove).
    Unchanged(PathBuf),
    NotFound,
    Failed(String),
}

impl ConfUpdate {
    pub fn is_ok(&self) -> bool {
        matches!(self, ConfUpdate::Updated(_) | ConfUpdate::Unchanged(_))
    }
}

impl fmt::Display for ConfUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfUpdate::Updated(p) => write!(f, "updated {}", p.display()),
            ConfUpdate::Unchanged(p) => write!(f, "no change needed in {}", p.display()),
            ConfUpdate::NotFound => f.write_str("indexes.conf not found; update it manually"),
            ConfUpdate::Failed(e) => write!(f, "could not update indexes.conf ({e}); update it manually"),
        }
    }
}

/// Delete outcome plus what happened to the index's conf block.
#[derive(Clone, Debug)]
pub struct DeleteReport {
    pub outcome: Outcome,
    /// `None` when the delete failed and the conf file was left alone.
    pub conf_update: Option<ConfUpdate>,
}

impl fmt::Display for DeleteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.outcome)?;
        if let Some(conf) = &self.conf_update {
            write!(f, "\nConfiguration: {conf}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct BackupReport {
    pub archive_path: PathBuf,
    pub files_added: usize,
    pub dirs_added: usize,
    pub dat_included: bool,
    pub encryption: EncryptionMode,
    pub verified: bool,
    pub elapsed: Duration,
}

impl fmt::Display for BackupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Backup completed successfully in {:.1} seconds!",
            self.elapsed.as_secs_f64()
        )?;
        writeln!(f, "Saved to: {}", self.archive_path.display())?;
        writeln!(
            f,
            "Files: {} | Directories (incl. empty): {} | .dat file: {}",
            self.files_added,
            self.dirs_added,
            if self.dat_included { "yes" } else { "no" }
        )?;
        writeln!(f, "Encryption: {}", self.encryption)?;
        write!(
            f,
            "Verified: {}",
            if self.verified { "yes" } else { "skipped" }
        )
    }
}

#[derive(Clone, Debug)]
pub struct RestoreReport {
    pub index_name: String,
    pub target: PathBuf,
    pub dat_restored: bool,
    pub files_restored: usize,
    pub dirs_restored: usize,
    pub encrypted: bool,
    pub index_created: bool,
    pub conf_update: ConfUpdate,
}

impl fmt::Display for RestoreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Restore completed successfully!")?;
        writeln!(f, "Index: {}", self.index_name)?;
        writeln!(f, "Location: {}", self.target.display())?;
        writeln!(
            f,
            "Files: {} | Directories: {} | .dat file: {}",
            self.files_restored,
            self.dirs_restored,
            if self.dat_restored { "yes" } else { "no" }
        )?;
        if self.index_created {
            writeln!(f, "Index was re-created in Splunk")?;
        }
        write!(f, "Configuration: {}", self.conf_update)
    }
}

/// Session tuning. Defaults here; `.splidx.toml` overrides (see [`crate::utils::settings_toml`]).
#[derive(Clone, Debug)]
pub struct Settings {
    /// Override for `<SPLUNK_HOME>/var/lib/splunk`.
    pub data_root: Option<PathBuf>,
    /// Override for `indexes.conf` discovery.
    pub conf_path: Option<PathBuf>,
    /// Used when the backup destination prompt is left blank.
    pub default_backup_dir: Option<PathBuf>,
    /// Cipher used when a backup password is given.
    pub password_cipher: EncryptionMode,
    /// Re-read every archive entry after writing a backup.
    pub verify_backups: bool,
    /// Login attempts before giving up.
    pub login_retries: usize,
    pub system_prefixes: Vec<String>,
    pub classifier: OutputClassifier,
    /// Show progress bars.
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_root: None,
            conf_path: None,
            default_backup_dir: None,
            password_cipher: EncryptionMode::Aes256,
            verify_backups: true,
            login_retries: DEFAULT_LOGIN_RETRIES,
            system_prefixes: SplunkLayout::SYSTEM_PREFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            classifier: OutputClassifier::default(),
            verbose: false,
        }
    }
}
