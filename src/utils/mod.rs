pub mod config;
pub mod interaction;
pub mod logger;
pub mod passphrase;
pub mod settings_toml;
pub mod store;

pub use config::*;
pub use interaction::{ConsoleInteraction, Interaction};
pub use logger::{Colors, setup_logging};
pub use passphrase::{get_backup_password, get_restore_password};
pub use settings_toml::settings_from_file;
pub use store::Configuration;
