//! Extract a backup archive back into the data root and re-register the index.

use anyhow::{Result, bail};
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;
use zip::ZipArchive;

use crate::RestoreReport;
use crate::conf::write_index_block;
use crate::engine::progress::EntryProgress;
use crate::engine::tools::{dat_file_name, index_name_from_archive};
use crate::session::Session;
use crate::utils::interaction::Interaction;
use crate::utils::passphrase::get_restore_password;

use super::error::{ArchiveError, map_zip_error};
use super::verify::{check_password, first_encrypted_entry, map_read_error, open_archive};

#[derive(Default)]
struct ExtractStats {
    dat: bool,
    files: usize,
    dirs: usize,
}

/// Extract `<index>.dat` and every `<index>/...` entry into `data_root`, overwriting.
fn extract_index_entries(
    session: &Session,
    archive: &mut ZipArchive<BufReader<File>>,
    archive_path: &Path,
    index: &str,
    data_root: &Path,
    password: Option<&str>,
) -> Result<ExtractStats, ArchiveError> {
    let dat_name = dat_file_name(index);
    let prefix = format!("{index}/");
    let mut stats = ExtractStats::default();
    let mut progress = EntryProgress::new(session.settings.verbose, archive.len(), "Restoring");
    let cancel = session.cancel_token();

    for i in 0..archive.len() {
        if cancel.is_cancelled() {
            return Err(ArchiveError::Cancelled(archive_path.to_path_buf()));
        }
        let mut entry = match password {
            Some(pw) => archive.by_index_decrypt(i, pw.as_bytes()),
            None => archive.by_index(i),
        }
        .map_err(|e| map_zip_error(archive_path, e))?;

        let name = entry.name().to_string();
        let is_dat = name == dat_name;
        if !is_dat && !name.starts_with(&prefix) {
            warn!("Skipping entry outside index '{}': {}", index, name);
            continue;
        }
        let rel = entry
            .enclosed_name()
            .ok_or_else(|| ArchiveError::UnsafePath(name.clone()))?;
        let dest = data_root.join(rel);

        if entry.is_dir() {
            fs::create_dir_all(&dest)?;
            stats.dirs += 1;
        } else {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out = File::create(&dest)?;
            io::copy(&mut entry, &mut out)
                .map_err(|e| map_read_error(archive_path, e, password.is_some()))?;
            if is_dat {
                stats.dat = true;
                debug!("Restored {} to {}", dat_name, data_root.display());
            } else {
                stats.files += 1;
            }
        }
        progress.tick();
    }
    progress.finish();
    Ok(stats)
}

/// Restore the index named by `backup_file` (`<index>_backup_<timestamp>.zip`).
///
/// Overwrites existing files of that index. Prompts through `ui` for the password when the
/// archive is encrypted. Creates the index in Splunk when it is unknown, then writes its
/// `indexes.conf` block; a conf failure is reported in the result, not as an error.
pub fn restore_backup(
    session: &Session,
    backup_file: &Path,
    ui: &mut dyn Interaction,
) -> Result<RestoreReport> {
    if !backup_file.is_file() {
        return Err(ArchiveError::BackupNotFound(backup_file.to_path_buf()).into());
    }
    let index = index_name_from_archive(backup_file)
        .ok_or_else(|| ArchiveError::BadArchiveName(backup_file.to_path_buf()))?;
    let data_root = session.data_root();
    info!("Restoring backup from: {}", backup_file.display());
    info!("Target location: {}", data_root.display());

    let mut archive = open_archive(backup_file)?;
    let first_encrypted =
        first_encrypted_entry(&mut archive).map_err(|e| map_zip_error(backup_file, e))?;
    let encrypted = first_encrypted.is_some();
    let password = match first_encrypted {
        Some(i) => {
            let dir = backup_file.parent().unwrap_or(Path::new("."));
            let pw = get_restore_password(dir, ui)?;
            check_password(&mut archive, i, backup_file, &pw)?;
            Some(pw)
        }
        None => None,
    };

    fs::create_dir_all(&data_root).map_err(ArchiveError::from)?;
    let stats = {
        let _in_flight = session.cancel_token().begin();
        extract_index_entries(
            session,
            &mut archive,
            backup_file,
            &index,
            &data_root,
            password.as_deref(),
        )?
    };
    drop(archive);
    if !stats.dat && stats.files == 0 && stats.dirs == 0 {
        warn!("Backup contained no data for index '{}'", index);
    }

    let index_created = if session.index_exists(&index)? {
        false
    } else {
        info!("Creating index {} in Splunk...", index);
        let outcome = session.create_index(&index)?;
        if !outcome.is_success() {
            bail!("Restore failed: {}", outcome.message);
        }
        true
    };

    let conf_update = write_index_block(session.conf_path().as_deref(), &index);
    if !conf_update.is_ok() {
        warn!("Index restored, but {}", conf_update);
    }

    Ok(RestoreReport {
        index_name: index,
        target: data_root,
        dat_restored: stats.dat,
        files_restored: stats.files,
        dirs_restored: stats.dirs,
        encrypted,
        index_created,
        conf_update,
    })
}
