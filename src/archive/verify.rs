//! Re-read an archive end to end: structure, CRCs and (if encrypted) the password.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;
use zip::result::ZipError;

use super::error::{ArchiveError, map_zip_error};

pub(crate) fn open_archive(path: &Path) -> Result<ZipArchive<BufReader<File>>, ArchiveError> {
    let file = File::open(path)?;
    ZipArchive::new(BufReader::new(file)).map_err(|e| map_zip_error(path, e))
}

/// Read failures while decrypting. A ZipCrypto key that slips past the one-byte header check
/// shows up as a checksum mismatch, which still means a wrong password.
pub(crate) fn map_read_error(path: &Path, error: io::Error, decrypting: bool) -> ArchiveError {
    if decrypting && error.to_string().to_ascii_lowercase().contains("checksum") {
        ArchiveError::IncorrectPassword(path.to_path_buf())
    } else {
        ArchiveError::Io(error)
    }
}

/// Index of the first entry that needs a password: opening it without one fails with
/// "password required".
pub fn first_encrypted_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> Result<Option<usize>, ZipError> {
    for i in 0..archive.len() {
        match archive.by_index(i) {
            Ok(_) => continue,
            Err(ZipError::UnsupportedArchive(detail)) if detail == ZipError::PASSWORD_REQUIRED => {
                return Ok(Some(i));
            }
            Err(e) => return Err(e),
        }
    }
    Ok(None)
}

pub fn is_encrypted<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<bool, ZipError> {
    Ok(first_encrypted_entry(archive)?.is_some())
}

/// Decrypt entry `index` fully with `password` before anything touches the disk.
///
/// The archive already opened cleanly, so a failed read of the decrypted stream (bad checksum or
/// garbage the decompressor rejects, as a ZipCrypto key past the header check produces) is a
/// wrong password.
pub(crate) fn check_password<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    index: usize,
    path: &Path,
    password: &str,
) -> Result<(), ArchiveError> {
    let mut entry = archive
        .by_index_decrypt(index, password.as_bytes())
        .map_err(|e| map_zip_error(path, e))?;
    io::copy(&mut entry, &mut io::sink())
        .map_err(|_| ArchiveError::IncorrectPassword(path.to_path_buf()))?;
    Ok(())
}

/// Decompress every entry to a sink. Returns the entry count.
pub fn verify_archive(path: &Path, password: Option<&str>) -> Result<usize, ArchiveError> {
    let mut archive = open_archive(path)?;
    for i in 0..archive.len() {
        let mut entry = match password {
            Some(pw) => archive.by_index_decrypt(i, pw.as_bytes()),
            None => archive.by_index(i),
        }
        .map_err(|e| map_zip_error(path, e))?;
        io::copy(&mut entry, &mut io::sink())
            .map_err(|e| map_read_error(path, e, password.is_some()))?;
    }
    Ok(archive.len())
}
