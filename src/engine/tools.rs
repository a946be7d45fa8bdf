//! Path, size and naming utilities

use chrono::{DateTime, Local};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::utils::config::{ArchiveConsts, SizeUnits, SplunkLayout};

/// Convert absolute path to relative path from base
pub fn path_relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    path.strip_prefix(base).ok().map(|p| p.to_path_buf())
}

/// `SPLUNK_HOME`: two levels above the binary (`<home>/bin/splunk`).
pub fn splunk_home_for(binary: &Path) -> PathBuf {
    binary
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

/// Default index data root: `<SPLUNK_HOME>/var/lib/splunk`.
pub fn data_root_for(binary: &Path) -> PathBuf {
    SplunkLayout::DATA_ROOT
        .iter()
        .fold(splunk_home_for(binary), |p, c| p.join(c))
}

/// Recursive sum of file sizes under `dir`. Unreadable entries count as 0; missing dir is 0.
pub fn dir_size(dir: &Path) -> u64 {
    if !dir.exists() {
        return 0;
    }
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}

/// MB with one decimal below 2048 MiB, GB above. 0 → "0.0MB".
pub fn format_size(bytes: u64) -> String {
    if bytes >= SizeUnits::GB_THRESHOLD {
        format!("{:.1}GB", bytes as f64 / SizeUnits::GIB as f64)
    } else {
        format!("{:.1}MB", bytes as f64 / SizeUnits::MIB as f64)
    }
}

/// `<index>_backup_<YYYYMMDD-HHMMSS>.zip`
pub fn archive_file_name(index: &str, at: DateTime<Local>) -> String {
    archive_file_name_seq(index, at, 0)
}

/// Like [`archive_file_name`], with `-<seq>` before the extension when `seq > 0`
/// (second and later backups of one index within the same second).
pub fn archive_file_name_seq(index: &str, at: DateTime<Local>, seq: u32) -> String {
    let suffix = if seq > 0 { format!("-{seq}") } else { String::new() };
    format!(
        "{}{}{}{}.{}",
        index,
        ArchiveConsts::NAME_DELIMITER,
        at.format(ArchiveConsts::TIMESTAMP_FORMAT),
        suffix,
        ArchiveConsts::EXTENSION
    )
}

/// Index name encoded in a backup file name, i.e. everything before the first `_backup_`.
pub fn index_name_from_archive(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let (index, _) = name.split_once(ArchiveConsts::NAME_DELIMITER)?;
    (!index.is_empty()).then(|| index.to_string())
}

/// `<index>.dat`
pub fn dat_file_name(index: &str) -> String {
    format!("{index}.{}", ArchiveConsts::DAT_EXTENSION)
}

/// Zip entry name for a relative path: `/` separators, trailing `/` for directories.
pub fn zip_entry_name(rel: &Path, is_dir: bool) -> String {
    let mut name = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");
    if is_dir && !name.ends_with('/') {
        name.push('/');
    }
    name
}
