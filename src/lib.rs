//! splidx: interactive Splunk index manager with zip backup and restore

pub mod archive;
pub mod conf;
pub mod engine;
pub mod index;
pub mod menu;
pub mod session;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use archive::{ArchiveError, backup_index, restore_backup, verify_archive};
pub use index::parse_index_list;
pub use session::Session;

/// Result alias used by the public splidx API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;
