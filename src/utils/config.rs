//! Application configuration constants.
//! File names, install locations and thresholds in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived file names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
    settings_filename: String,
    password_env_key: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!("{pkg}.json"),
                settings_filename: format!(".{pkg}.toml"),
                password_env_key: format!("{}_BACKUP_PASSWORD", pkg.to_uppercase()),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// JSON credentials store (binary path, username, password).
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// Optional TOML overlay with tuning and phrase tables.
    pub fn settings_filename(&self) -> &str {
        &self.settings_filename
    }

    /// Env var consulted for the backup password before prompting.
    pub fn password_env_key(&self) -> &str {
        &self.password_env_key
    }
}

// ---- Splunk install layout ----

/// Where Splunk keeps things relative to its install (`SPLUNK_HOME`).
pub struct SplunkLayout;

impl SplunkLayout {
    /// Conventional binary locations offered before falling back to the picker.
    pub const COMMON_BINARY_PATHS: [&'static str; 3] = [
        "/opt/splunk/bin/splunk",
        "C:\\Program Files\\Splunk\\bin\\splunk.exe",
        "/Applications/Splunk/bin/splunk",
    ];
    /// Data root relative to `SPLUNK_HOME`.
    pub const DATA_ROOT: [&'static str; 3] = ["var", "lib", "splunk"];
    /// `indexes.conf` candidates relative to `SPLUNK_HOME`, in search order.
    pub const CONF_CANDIDATES: [&'static str; 2] = [
        "etc/system/local/indexes.conf",
        "etc/apps/search/local/indexes.conf",
    ];
    /// Index names starting with any of these are hidden from the manage list.
    pub const SYSTEM_PREFIXES: [&'static str; 5] =
        ["_", "summary", "splunklogger", "main", "history"];
}

// ---- Archive ----

/// Backup archive naming and tuning.
pub struct ArchiveConsts;

impl ArchiveConsts {
    /// Separates the index name from the timestamp in a backup file name.
    pub const NAME_DELIMITER: &'static str = "_backup_";
    pub const TIMESTAMP_FORMAT: &'static str = "%Y%m%d-%H%M%S";
    pub const EXTENSION: &'static str = "zip";
    pub const DAT_EXTENSION: &'static str = "dat";
    /// Same-second name collisions tried before giving up.
    pub const MAX_NAME_SEQ: u32 = 999;
}

// ---- Size formatting ----

pub struct SizeUnits;

impl SizeUnits {
    pub const MIB: u64 = 1024 * 1024;
    pub const GIB: u64 = 1024 * Self::MIB;
    /// At or above this many bytes, sizes render in GB instead of MB.
    pub const GB_THRESHOLD: u64 = 2048 * Self::MIB;
}

// ---- Login ----

/// Login attempts before giving up (first try included).
pub const DEFAULT_LOGIN_RETRIES: usize = 3;
