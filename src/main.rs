//! splidx CLI: create, delete, back up and restore Splunk indexes from a text menu.

use anyhow::Result;
use clap::Parser;
use splidx::engine::arg_parser::Cli;
use splidx::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
