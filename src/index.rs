//! Index operations through the Splunk CLI: create, list, delete.

use anyhow::Result;
use log::{debug, info, warn};

use crate::conf::remove_index_block;
use crate::engine::classify::PhraseTable;
use crate::engine::tools::dir_size;
use crate::session::Session;
use crate::{DeleteReport, IndexDescriptor, Outcome, Verdict};

/// Build an [`Outcome`] from tool output using `table`.
fn outcome_for(table: &PhraseTable, output: &str, ok_message: String) -> Outcome {
    let verdict = table.classify(output);
    let message = match verdict {
        Verdict::Success => ok_message,
        Verdict::Failure => format!("Splunk error: {}", output.trim()),
        Verdict::Unexpected => format!("Unexpected response: {}", output.trim()),
    };
    Outcome { verdict, message }
}

/// Keep index-name lines from `splunk list index` output.
///
/// Blank lines and anything containing a path separator (the home/cold/thawed paths Splunk prints
/// under each name) are dropped. With `exclude_system`, names starting with one of `prefixes`
/// (case-insensitive) are dropped too.
pub fn parse_index_list(output: &str, exclude_system: bool, prefixes: &[String]) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.contains('/') && !l.contains('\\'))
        .filter(|l| {
            !exclude_system || {
                let lower = l.to_lowercase();
                !prefixes.iter().any(|p| lower.starts_with(&p.to_lowercase()))
            }
        })
        .map(str::to_string)
        .collect()
}

impl Session {
    /// `splunk add index <name>`. "already exists" counts as success.
    pub fn create_index(&self, name: &str) -> Result<Outcome> {
        let mut args = vec!["add".to_string(), "index".to_string(), name.to_string()];
        args.extend(self.auth_args());
        let output = self.run(&args)?;
        let outcome = outcome_for(
            &self.settings.classifier.create,
            &output,
            format!("Index '{name}' created successfully."),
        );
        debug!("create {}: {:?}", name, outcome.verdict);
        Ok(outcome)
    }

    /// Index names known to Splunk.
    pub fn list_indexes(&self, exclude_system: bool) -> Result<Vec<String>> {
        let mut args = vec!["list".to_string(), "index".to_string()];
        args.extend(self.auth_args());
        let output = self.run(&args)?;
        Ok(parse_index_list(
            &output,
            exclude_system,
            &self.settings.system_prefixes,
        ))
    }

    /// Like [`Session::list_indexes`], with each index's on-disk size.
    pub fn list_indexes_sized(&self, exclude_system: bool) -> Result<Vec<IndexDescriptor>> {
        Ok(self
            .list_indexes(exclude_system)?
            .into_iter()
            .map(|name| {
                let size_bytes = dir_size(&self.index_dir(&name));
                IndexDescriptor { name, size_bytes }
            })
            .collect())
    }

    pub fn index_exists(&self, name: &str) -> Result<bool> {
        Ok(self.list_indexes(false)?.iter().any(|n| n == name))
    }

    /// `splunk remove index <name>`, then drop its `indexes.conf` block on success.
    /// No local existence check: Splunk decides.
    pub fn delete_index(&self, name: &str) -> Result<DeleteReport> {
        let mut args = vec!["remove".to_string(), "index".to_string(), name.to_string()];
        args.extend(self.auth_args());
        let output = self.run(&args)?;
        let outcome = outcome_for(
            &self.settings.classifier.delete,
            &output,
            format!("Index '{name}' deleted successfully."),
        );
        if !outcome.is_success() {
            warn!("Delete of '{}' not confirmed by Splunk", name);
            return Ok(DeleteReport {
                outcome,
                conf_update: None,
            });
        }
        info!("Index '{}' removed from Splunk", name);
        let conf_update = remove_index_block(self.conf_path().as_deref(), name);
        Ok(DeleteReport {
            outcome,
            conf_update: Some(conf_update),
        })
    }
}
