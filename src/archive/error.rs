use std::path::PathBuf;
use thiserror::Error;
use zip::result::ZipError;

/// Archive failures a caller may want to tell apart.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("no index data found for '{index}' (neither {dir} nor its .dat file exists)")]
    NoIndexData { index: String, dir: PathBuf },

    #[error("backup file not found: {0}")]
    BackupNotFound(PathBuf),

    #[error("cannot derive an index name from {0} (expected <index>_backup_<timestamp>.zip)")]
    BadArchiveName(PathBuf),

    #[error("incorrect password for {0}")]
    IncorrectPassword(PathBuf),

    #[error(
        "unsupported compression in {path} ({reason}); rebuild with zip features for this method"
    )]
    UnsupportedCompression { path: PathBuf, reason: String },

    #[error("cancelled by user ({0})")]
    Cancelled(PathBuf),

    #[error("unsafe entry path in archive: {0}")]
    UnsafePath(String),

    #[error("zip error: {0}")]
    Zip(#[from] ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Map zip reader errors to the distinguished cases.
pub fn map_zip_error(path: &std::path::Path, error: ZipError) -> ArchiveError {
    match error {
        ZipError::InvalidPassword => ArchiveError::IncorrectPassword(path.to_path_buf()),
        ZipError::UnsupportedArchive(detail) if detail.to_ascii_lowercase().contains("password") => {
            ArchiveError::IncorrectPassword(path.to_path_buf())
        }
        ZipError::UnsupportedArchive(detail)
            if detail.to_ascii_lowercase().contains("compression") =>
        {
            ArchiveError::UnsupportedCompression {
                path: path.to_path_buf(),
                reason: detail.to_string(),
            }
        }
        other => ArchiveError::Zip(other),
    }
}
