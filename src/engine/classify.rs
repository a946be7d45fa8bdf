//! Translate free-text Splunk CLI output into verdicts.
//!
//! Splunk has no structured output for these commands, so every decision is a substring match
//! against a phrase table. The tables are data, not code: `.splidx.toml` can replace any of them
//! when a Splunk version or locale words things differently.

use crate::Verdict;

/// Success and failure phrases for one command. Matched against normalised output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhraseTable {
    pub success: Vec<String>,
    pub failure: Vec<String>,
}

impl PhraseTable {
    fn from_strs(success: &[&str], failure: &[&str]) -> Self {
        Self {
            success: success.iter().map(|s| s.to_string()).collect(),
            failure: failure.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Success wins over failure: "already exists ... error" still means the index is there.
    pub fn classify(&self, output: &str) -> Verdict {
        let text = normalize(output);
        let hit = |phrases: &[String]| {
            phrases
                .iter()
                .any(|p| !p.is_empty() && text.contains(&normalize(p)))
        };
        if hit(&self.success) {
            Verdict::Success
        } else if hit(&self.failure) {
            Verdict::Failure
        } else {
            Verdict::Unexpected
        }
    }
}

const FAILURE_PHRASES: [&str; 2] = ["error", "failed"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputClassifier {
    pub create: PhraseTable,
    pub delete: PhraseTable,
    /// Looked for (case-sensitive) in stderr of `splunk login`.
    pub login_failure: String,
    /// Lines containing any of these are dropped from command output.
    pub benign: Vec<String>,
}

impl Default for OutputClassifier {
    fn default() -> Self {
        let mut delete_success = vec!["removed", "deleted", "removal of index", "successfully"];
        if cfg!(windows) {
            // Splunk on Windows reports a completed removal this way
            delete_success.push("handler not found");
        }
        Self {
            create: PhraseTable::from_strs(
                &["created", "added", "already exists", "index created"],
                &FAILURE_PHRASES,
            ),
            delete: PhraseTable::from_strs(&delete_success, &FAILURE_PHRASES),
            login_failure: "Login failed".to_string(),
            benign: vec![
                "Server Certificate Hostname Validation is disabled".to_string(),
                "cliVerifyServerName".to_string(),
            ],
        }
    }
}

/// Lowercase and collapse all whitespace runs to one space.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drop lines containing any benign warning substring.
pub fn filter_benign(text: &str, benign: &[String]) -> String {
    text.lines()
        .filter(|line| !benign.iter().any(|b| !b.is_empty() && line.contains(b.as_str())))
        .collect::<Vec<_>>()
        .join("\n")
}
