//! CLI entry: set up logging and settings, make sure Splunk is reachable, then run the menu.

use anyhow::Result;
use log::{debug, info};

use crate::engine::arg_parser::Cli;
use crate::engine::cancel::CancelToken;
use crate::engine::invoker::SplunkCli;
use crate::menu::main_menu;
use crate::session::Session;
use crate::utils::{Colors, Configuration, ConsoleInteraction, settings_from_file, setup_logging};

fn banner() {
    let name = env!("CARGO_PKG_NAME").to_uppercase();
    info!(
        "{}",
        Colors::colorize(
            Colors::HEADING,
            &format!("{name} v{}: Splunk index manager", env!("CARGO_PKG_VERSION"))
        )
    );
}

/// Load config (prompting for anything missing), log in, then hand over to the main menu.
pub fn handle_run(cli: &Cli) -> Result<()> {
    setup_logging(cli.verbose);
    banner();

    let settings_path = cli.settings_path();
    let mut settings = settings_from_file(&settings_path);
    settings.verbose = cli.verbose;
    debug!(
        "{} SETTINGS:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        settings
    );

    let mut ui = ConsoleInteraction::new();
    let config_path = cli.config_path();
    let config = Configuration::ensure(&config_path, &mut ui)?;

    let cancel = CancelToken::default();
    cancel.install_ctrlc()?;
    let mut session = Session::new(config, settings, Box::new(SplunkCli))
        .with_config_path(config_path)
        .with_cancel_token(cancel);

    session.verify_login(&mut ui)?;
    main_menu(&session, &mut ui)?;
    info!("Exiting...");
    Ok(())
}
