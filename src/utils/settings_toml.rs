//! Load `.splidx.toml` (CLI only). Library callers build [`Settings`] directly.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::EncryptionMode;
use crate::Settings;

#[derive(Debug, Default, Deserialize)]
pub struct SettingsToml {
    #[serde(default)]
    settings: SettingsSection,
    #[serde(default)]
    phrases: PhrasesSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    data_root: Option<String>,
    conf_path: Option<String>,
    default_backup_dir: Option<String>,
    encryption: Option<EncryptionMode>,
    verify_backups: Option<bool>,
    login_retries: Option<usize>,
    system_prefixes: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct PhrasesSection {
    create_success: Option<Vec<String>>,
    delete_success: Option<Vec<String>>,
    failure: Option<Vec<String>>,
    login_failure: Option<String>,
    benign_warnings: Option<Vec<String>>,
}

/// Load the settings file at `path`. Returns None if missing or unparsable (warning logged).
pub fn load_settings_toml(path: &Path) -> Option<SettingsToml> {
    let s = std::fs::read_to_string(path).ok()?;
    toml::from_str(&s)
        .map_err(|e| log::warn!("{}: {}", path.display(), e))
        .ok()
}

/// Overwrite a settings field from the file when present.
macro_rules! apply_file_opt {
    ($sec:expr, $target:expr, $sec_field:ident => $target_field:ident) => {
        if let Some(v) = $sec.$sec_field.clone() {
            $target.$target_field = v;
        }
    };
}

/// Apply file values to `settings` (only fields present in the file).
pub fn apply_file_to_settings(file: &SettingsToml, settings: &mut Settings) {
    let s = &file.settings;
    if let Some(ref p) = s.data_root {
        settings.data_root = Some(PathBuf::from(p));
    }
    if let Some(ref p) = s.conf_path {
        settings.conf_path = Some(PathBuf::from(p));
    }
    if let Some(ref p) = s.default_backup_dir {
        settings.default_backup_dir = Some(PathBuf::from(p));
    }
    apply_file_opt!(s, settings, encryption => password_cipher);
    apply_file_opt!(s, settings, verify_backups => verify_backups);
    apply_file_opt!(s, settings, login_retries => login_retries);
    apply_file_opt!(s, settings, system_prefixes => system_prefixes);

    let p = &file.phrases;
    let classifier = &mut settings.classifier;
    apply_file_opt!(p, classifier.create, create_success => success);
    apply_file_opt!(p, classifier.delete, delete_success => success);
    if let Some(ref failure) = p.failure {
        classifier.create.failure = failure.clone();
        classifier.delete.failure = failure.clone();
    }
    apply_file_opt!(p, classifier, login_failure => login_failure);
    apply_file_opt!(p, classifier, benign_warnings => benign);
}

/// Defaults overlaid with the file at `path`, if any.
pub fn settings_from_file(path: &Path) -> Settings {
    let mut settings = Settings::default();
    if let Some(file) = load_settings_toml(path) {
        log::debug!("Loaded settings from {}", path.display());
        apply_file_to_settings(&file, &mut settings);
    }
    settings
}
