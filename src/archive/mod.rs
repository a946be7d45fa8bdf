//! Backup and restore of index data as zip archives.

pub mod backup;
pub mod error;
pub mod restore;
pub mod verify;

pub use backup::{backup_index, resolve_encryption};
pub use error::ArchiveError;
pub use restore::restore_backup;
pub use verify::{first_encrypted_entry, is_encrypted, verify_archive};
