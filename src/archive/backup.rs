//! Write an index's data directory and `.dat` file into a zip archive.

use anyhow::Result;
use chrono::Local;
use log::{debug, info, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;
use zip::unstable::write::FileOptionsExt;
use zip::write::{FileOptions, SimpleFileOptions};
use zip::{AesMode, CompressionMethod, ZipWriter};

use crate::engine::progress::EntryProgress;
use crate::engine::tools::{archive_file_name_seq, dat_file_name, path_relative_to, zip_entry_name};
use crate::session::Session;
use crate::utils::config::ArchiveConsts;
use crate::{BackupReport, EncryptionMode};

use super::error::ArchiveError;
use super::verify::verify_archive;

/// Cipher actually used: none without a password, else the configured one (AES-256 if unset).
pub fn resolve_encryption(password: Option<&str>, configured: EncryptionMode) -> EncryptionMode {
    match (password, configured) {
        (None, _) => EncryptionMode::None,
        (Some(_), EncryptionMode::None) => EncryptionMode::Aes256,
        (Some(_), mode) => mode,
    }
}

/// Options for one file entry. Files of 4 GiB or more need zip64 headers.
fn file_options<'k>(
    mode: EncryptionMode,
    password: Option<&'k str>,
    size: u64,
) -> FileOptions<'k, ()> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .large_file(size >= u32::MAX as u64);
    match (mode, password) {
        (EncryptionMode::Aes256, Some(pw)) => options.with_aes_encryption(AesMode::Aes256, pw),
        (EncryptionMode::ZipCrypto, Some(pw)) => options.with_deprecated_encryption(pw.as_bytes()),
        _ => options,
    }
}

struct WriteStats {
    files: usize,
    dirs: usize,
}

/// What goes into the archive: optional `.dat` plus the sorted walk of the index directory.
struct BackupSources {
    data_root: PathBuf,
    dat: Option<PathBuf>,
    entries: Vec<walkdir::DirEntry>,
}

fn collect_sources(session: &Session, index: &str) -> Result<BackupSources, ArchiveError> {
    let data_root = session.data_root();
    let index_dir = data_root.join(index);
    let dat_path = data_root.join(dat_file_name(index));

    let dat = dat_path.is_file().then_some(dat_path);
    if !index_dir.is_dir() && dat.is_none() {
        return Err(ArchiveError::NoIndexData {
            index: index.to_string(),
            dir: index_dir,
        });
    }
    let entries = if index_dir.is_dir() {
        WalkDir::new(&index_dir)
            .sort_by_file_name()
            .into_iter()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(io::Error::from)?
    } else {
        Vec::new()
    };
    Ok(BackupSources {
        data_root,
        dat,
        entries,
    })
}

/// Create a fresh archive file in `backup_dir`. Never opens an existing file: a taken name gets
/// the next `-N` suffix.
fn create_archive_file(backup_dir: &Path, index: &str) -> Result<(PathBuf, File), ArchiveError> {
    let now = Local::now();
    for seq in 0..=ArchiveConsts::MAX_NAME_SEQ {
        let path = backup_dir.join(archive_file_name_seq(index, now, seq));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Err(io::Error::new(
        ErrorKind::AlreadyExists,
        format!("no free backup name for '{index}' in {}", backup_dir.display()),
    )
    .into())
}

fn write_archive(
    session: &Session,
    sources: &BackupSources,
    file: File,
    archive_path: &Path,
    mode: EncryptionMode,
    password: Option<&str>,
) -> Result<WriteStats, ArchiveError> {
    let mut writer = ZipWriter::new(BufWriter::new(file));
    let mut stats = WriteStats { files: 0, dirs: 0 };
    let total = sources.entries.len() + usize::from(sources.dat.is_some());
    let mut progress = EntryProgress::new(session.settings.verbose, total, "Backing up");
    let cancel = session.cancel_token();

    if let Some(dat) = &sources.dat {
        let name = dat
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let size = fs::metadata(dat)?.len();
        writer.start_file(name, file_options(mode, password, size))?;
        io::copy(&mut File::open(dat)?, &mut writer)?;
        debug!("Added .dat file {}", dat.display());
        progress.tick();
    }

    for entry in &sources.entries {
        if cancel.is_cancelled() {
            return Err(ArchiveError::Cancelled(archive_path.to_path_buf()));
        }
        let path = entry.path();
        let Some(rel) = path_relative_to(path, &sources.data_root) else {
            continue;
        };
        let file_type = entry.file_type();
        if file_type.is_dir() {
            // explicit entry so empty directories survive the round trip
            writer.add_directory(zip_entry_name(&rel, true), SimpleFileOptions::default())?;
            stats.dirs += 1;
        } else if file_type.is_file() {
            let size = entry.metadata().map_err(io::Error::from)?.len();
            writer.start_file(
                zip_entry_name(&rel, false),
                file_options(mode, password, size),
            )?;
            io::copy(&mut File::open(path)?, &mut writer)?;
            stats.files += 1;
            if stats.files % 100 == 0 {
                debug!("Added {} files...", stats.files);
            }
        } else {
            warn!("Skipping non-regular file {}", path.display());
        }
        progress.tick();
    }
    progress.finish();

    writer
        .finish()?
        .into_inner()
        .map_err(|e| e.into_error())?;
    Ok(stats)
}

/// Back up index `index` into `backup_dir` as `<index>_backup_<timestamp>.zip`.
///
/// With a password, entries are encrypted with the session's configured cipher (AES-256 unless
/// settings ask for ZipCrypto). Directory entries carry no data and stay unencrypted. On any
/// failure, including Ctrl+C, the partial archive is removed.
pub fn backup_index(
    session: &Session,
    index: &str,
    backup_dir: &Path,
    password: Option<&str>,
) -> Result<BackupReport> {
    let start = Instant::now();
    let password = password.filter(|p| !p.is_empty());
    let sources = collect_sources(session, index)?;

    info!("Backing up index data from:");
    if let Some(dat) = &sources.dat {
        info!(" - DAT file: {}", dat.display());
    }
    info!(" - Index folder: {}", sources.data_root.join(index).display());

    let mode = resolve_encryption(password, session.settings.password_cipher);
    if mode == EncryptionMode::ZipCrypto {
        warn!("Using legacy ZipCrypto encryption: weak, prefer aes256 unless old tools must open it");
    }

    fs::create_dir_all(backup_dir).map_err(ArchiveError::from)?;
    let (archive_path, file) = create_archive_file(backup_dir, index)?;

    let written = {
        let _in_flight = session.cancel_token().begin();
        write_archive(session, &sources, file, &archive_path, mode, password)
    };
    let stats = match written {
        Ok(stats) => stats,
        Err(e) => {
            // create_new above: this path is ours alone
            let _ = fs::remove_file(&archive_path);
            return Err(e.into());
        }
    };

    let verified = if session.settings.verify_backups {
        let entries = verify_archive(&archive_path, password)?;
        debug!("Verified {} entries in {}", entries, archive_path.display());
        true
    } else {
        false
    };

    Ok(BackupReport {
        archive_path,
        files_added: stats.files,
        dirs_added: stats.dirs,
        dat_included: sources.dat.is_some(),
        encryption: mode,
        verified,
        elapsed: start.elapsed(),
    })
}
