//! Engine: CLI plumbing, tool invocation, output classification and archive helpers

pub mod arg_parser;
pub mod cancel;
pub mod classify;
pub mod cli;
pub mod invoker;
pub mod progress;
pub mod tools;

// Re-export commonly used items
pub use arg_parser::Cli;
pub use cancel::CancelToken;
pub use classify::{OutputClassifier, PhraseTable, filter_benign, normalize};
pub use cli::handle_run;
pub use invoker::{SplunkCli, ToolOutput, ToolRunner};
pub use tools::{format_size, index_name_from_archive, path_relative_to};
