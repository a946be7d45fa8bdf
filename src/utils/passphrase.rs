//! Backup password loading: env var → .env in dir → secure prompt.

use anyhow::{Result, bail};
use log::{info, warn};
use std::path::Path;

use crate::utils::config::PackagePaths;
use crate::utils::interaction::Interaction;

fn try_env_then_dotenv(dir: &Path) -> Option<String> {
    let key = PackagePaths::get().password_env_key();
    if let Ok(s) = std::env::var(key) {
        let s = s.trim().to_string();
        if !s.is_empty() {
            return Some(s);
        }
    }
    let env_path = dir.join(".env");
    if env_path.is_file() {
        let _ = dotenvy::from_path(&env_path);
        if let Ok(s) = std::env::var(key) {
            let s = s.trim().to_string();
            if !s.is_empty() {
                return Some(s);
            }
        }
    }
    None
}

/// Password to open an encrypted backup: env (`SPLIDX_BACKUP_PASSWORD`) → .env in `dir` → prompt.
pub fn get_restore_password(dir: &Path, ui: &mut dyn Interaction) -> Result<String> {
    info!("Backup is password protected");
    if let Some(s) = try_env_then_dotenv(dir) {
        info!("Backup password found in environment");
        return Ok(s);
    }
    let pass = ui.read_secret("Enter backup password: ")?;
    Ok(pass.trim().to_string())
}

/// Password for a new backup: env → .env in `dir` → prompt twice. Empty means no encryption.
pub fn get_backup_password(dir: &Path, ui: &mut dyn Interaction) -> Result<Option<String>> {
    if let Some(s) = try_env_then_dotenv(dir) {
        info!("Backup password found in environment");
        return Ok(Some(s));
    }
    let pass = ui.read_secret("Enter backup password: ")?;
    let pass = pass.trim().to_string();
    if pass.is_empty() {
        return Ok(None);
    }
    let again = ui.read_secret("Repeat backup password: ")?;
    if again.trim() != pass {
        bail!("passwords do not match");
    }
    warn!("Lost password = lost backup");
    Ok(Some(pass))
}
