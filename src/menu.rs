//! Interactive text menu. One operation at a time; errors are printed and the loop continues.

use anyhow::Result;
use log::{debug, error};
use std::path::PathBuf;

use crate::archive::{backup_index, restore_backup};
use crate::session::Session;
use crate::utils::{Colors, Interaction, get_backup_password};

/// What the per-index sub-menu did, so the caller knows whether the index still exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexMenuExit {
    Back,
    Deleted,
}

fn heading(text: &str) {
    println!("\n{}", Colors::colorize(Colors::HEADING, text));
}

fn report_ok(text: &str) {
    println!("{}", Colors::colorize(Colors::OK, text));
}

fn notice(text: &str) {
    println!("{}", Colors::colorize(Colors::NOTICE, text));
}

fn report_fail(text: &str) {
    println!("{}", Colors::colorize(Colors::FAIL, text));
}

/// Print an operation error without leaving the menu.
fn report_error(context: &str, e: &anyhow::Error) {
    error!("{context}: {e:#}");
}

pub fn main_menu(session: &Session, ui: &mut dyn Interaction) -> Result<()> {
    loop {
        heading("Splunk Index Management Tool");
        println!("1: Create an index");
        println!("2: Manage an index");
        println!("3: Restore from backup");
        println!("0: Exit");

        match ui.read_line("Enter your choice: ")?.as_str() {
            "1" => create_index_menu(session, ui)?,
            "2" => manage_index_menu(session, ui)?,
            "3" => restore_backup_menu(session, ui)?,
            "0" => return Ok(()),
            _ => println!("Invalid choice, please try again."),
        }
    }
}

pub fn create_index_menu(session: &Session, ui: &mut dyn Interaction) -> Result<()> {
    heading("Create New Index");
    let name = ui.read_line("Enter the name for the new index: ")?;
    if name.is_empty() {
        println!("Index name cannot be empty.");
        return Ok(());
    }
    match session.create_index(&name) {
        Ok(outcome) if outcome.is_success() => report_ok(&outcome.message),
        Ok(outcome) => report_fail(&outcome.message),
        Err(e) => report_error("Create failed", &e),
    }
    Ok(())
}

pub fn manage_index_menu(session: &Session, ui: &mut dyn Interaction) -> Result<()> {
    heading("Manage Indexes");
    let indexes = match session.list_indexes_sized(true) {
        Ok(list) => list,
        Err(e) => {
            report_error("Listing indexes failed", &e);
            return Ok(());
        }
    };
    if indexes.is_empty() {
        println!("No non-system indexes found.");
        return Ok(());
    }

    println!("\nAvailable indexes:");
    for (i, index) in indexes.iter().enumerate() {
        println!("{}: {} ({})", i + 1, index.name, index.human_size());
    }
    println!("0: Back to main menu");

    let choice = ui.read_line("Select an index to manage: ")?;
    if choice == "0" {
        return Ok(());
    }
    match choice.parse::<usize>() {
        Ok(n) if (1..=indexes.len()).contains(&n) => {
            let name = &indexes[n - 1].name;
            if index_operations_menu(session, ui, name)? == IndexMenuExit::Deleted {
                debug!("'{}' removed, returning to main menu", name);
            }
        }
        Ok(_) => println!("Invalid selection."),
        Err(_) => println!("Please enter a number."),
    }
    Ok(())
}

pub fn index_operations_menu(
    session: &Session,
    ui: &mut dyn Interaction,
    index: &str,
) -> Result<IndexMenuExit> {
    loop {
        heading(&format!("Operations for index: {index}"));
        println!("1: Delete index");
        println!("2: Backup index");
        println!("3: Backup and delete index");
        println!("0: Back to index list");

        match ui.read_line("Enter your choice: ")?.as_str() {
            "1" => {
                return Ok(if delete_index_menu(session, ui, index)? {
                    IndexMenuExit::Deleted
                } else {
                    IndexMenuExit::Back
                });
            }
            "2" => {
                backup_index_menu(session, ui, index)?;
            }
            "3" => {
                let deleted =
                    backup_index_menu(session, ui, index)? && delete_index_menu(session, ui, index)?;
                return Ok(if deleted {
                    IndexMenuExit::Deleted
                } else {
                    IndexMenuExit::Back
                });
            }
            "0" => return Ok(IndexMenuExit::Back),
            _ => println!("Invalid choice, please try again."),
        }
    }
}

/// Confirm, then delete. Returns true when Splunk confirmed the removal.
pub fn delete_index_menu(session: &Session, ui: &mut dyn Interaction, index: &str) -> Result<bool> {
    let sure = ui.confirm(&format!(
        "\nAre you absolutely sure you want to permanently delete index '{index}'?"
    ))?;
    if !sure {
        notice("Index deletion cancelled.");
        return Ok(false);
    }
    match session.delete_index(index) {
        Ok(report) => {
            if report.outcome.is_success() {
                report_ok(&report.to_string());
            } else {
                report_fail(&report.to_string());
            }
            Ok(report.outcome.is_success())
        }
        Err(e) => {
            report_error("Delete failed", &e);
            Ok(false)
        }
    }
}

/// Ask for destination and password, then back up. Returns true on success.
pub fn backup_index_menu(session: &Session, ui: &mut dyn Interaction, index: &str) -> Result<bool> {
    heading("Select backup directory");
    let typed = ui.read_line("Enter backup directory path (or leave blank for the default): ")?;
    let backup_dir: Option<PathBuf> = if typed.is_empty() {
        match session.settings.default_backup_dir.clone() {
            Some(dir) => Some(dir),
            None => ui.pick_dir("Backup directory")?,
        }
    } else {
        Some(PathBuf::from(typed))
    };
    let Some(backup_dir) = backup_dir else {
        notice("Backup cancelled.");
        return Ok(false);
    };

    let password = if ui.confirm("Would you like to password protect the backup?")? {
        match get_backup_password(&backup_dir, ui) {
            Ok(p) => p,
            Err(e) => {
                report_error("Backup cancelled", &e);
                return Ok(false);
            }
        }
    } else {
        None
    };

    match backup_index(session, index, &backup_dir, password.as_deref()) {
        Ok(report) => {
            report_ok(&report.to_string());
            Ok(true)
        }
        Err(e) => {
            report_error("Backup failed", &e);
            Ok(false)
        }
    }
}

pub fn restore_backup_menu(session: &Session, ui: &mut dyn Interaction) -> Result<()> {
    heading("Restore from Backup");
    let Some(backup_file) = ui.pick_file("Backup file to restore (.zip)")? else {
        notice("Restore cancelled.");
        return Ok(());
    };
    let sure = ui.confirm(
        "WARNING: This will overwrite any existing index data.\nAre you sure you want to continue?",
    )?;
    if !sure {
        notice("Restore cancelled.");
        return Ok(());
    }
    match restore_backup(session, &backup_file, ui) {
        Ok(report) => report_ok(&report.to_string()),
        Err(e) => report_error("Restore failed", &e),
    }
    Ok(())
}
