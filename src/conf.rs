//! `indexes.conf` block editing by plain text search.
//!
//! A block is a `[name]` header line plus every following line up to the next `[...]` header or
//! end of file. Nothing else in the file is parsed or reformatted.

use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::ConfUpdate;
use crate::utils::config::SplunkLayout;

/// Settings override if given (and existing), else the first existing conventional location.
pub fn discover_conf(splunk_home: &Path, override_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = override_path {
        return p.is_file().then(|| p.to_path_buf());
    }
    SplunkLayout::CONF_CANDIDATES
        .iter()
        .map(|rel| splunk_home.join(rel))
        .find(|p| p.is_file())
}

fn is_header(line: &str) -> bool {
    line.trim_start().starts_with('[')
}

/// Lines with their own endings kept, so untouched text is written back byte for byte.
fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Line ending used by the file: CRLF if any line has one.
fn line_ending(text: &str) -> &'static str {
    if text.contains("\r\n") { "\r\n" } else { "\n" }
}

/// `block` re-terminated with `eol` on every line.
fn with_line_ending(block: &str, eol: &str) -> String {
    block.lines().map(|l| format!("{l}{eol}")).collect()
}

/// Line range `[start, end)` of the `[name]` block, if present.
fn block_range(lines: &[&str], name: &str) -> Option<(usize, usize)> {
    let header = format!("[{name}]");
    let start = lines.iter().position(|l| l.trim() == header)?;
    let end = lines[start + 1..]
        .iter()
        .position(|l| is_header(l))
        .map_or(lines.len(), |i| start + 1 + i);
    Some((start, end))
}

/// Remove the `[name]` block. `None` when the header is absent.
pub fn remove_block(text: &str, name: &str) -> Option<String> {
    let lines = split_lines(text);
    let (start, end) = block_range(&lines, name)?;
    Some([lines[..start].concat(), lines[end..].concat()].concat())
}

/// Replace the `[name]` block with `block`, or append `block` after a blank line.
/// `block` is written with the file's own line ending.
pub fn upsert_block(text: &str, name: &str, block: &str) -> String {
    let eol = line_ending(text);
    let block = with_line_ending(block, eol);
    let lines = split_lines(text);
    match block_range(&lines, name) {
        Some((start, end)) => {
            let mut out = lines[..start].concat();
            out.push_str(&block);
            // keep a blank separator if the old block had one before the next header
            if end < lines.len() {
                out.push_str(eol);
            }
            out.push_str(&lines[end..].concat());
            out
        }
        None => {
            let mut out = text.to_string();
            if !out.is_empty() {
                if !out.ends_with('\n') {
                    out.push_str(eol);
                }
                out.push_str(eol);
            }
            out.push_str(&block);
            out
        }
    }
}

/// Storage block written on restore.
pub fn render_block(name: &str) -> String {
    format!(
        "[{name}]\n\
         homePath = $SPLUNK_DB/{name}/db\n\
         coldPath = $SPLUNK_DB/{name}/colddb\n\
         thawedPath = $SPLUNK_DB/{name}/thaweddb\n\
         maxDataSize = auto_high_volume\n\
         maxTotalDataSizeMB = 500000\n"
    )
}

/// Best-effort removal of `[name]` from the conf file at `path` (if any).
pub fn remove_index_block(path: Option<&Path>, name: &str) -> ConfUpdate {
    let Some(path) = path else {
        warn!("indexes.conf not found; remove the [{name}] stanza manually if present");
        return ConfUpdate::NotFound;
    };
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => return ConfUpdate::Failed(format!("read {}: {}", path.display(), e)),
    };
    match remove_block(&text, name) {
        Some(updated) => match std::fs::write(path, updated) {
            Ok(()) => {
                debug!("Removed [{}] from {}", name, path.display());
                ConfUpdate::Updated(path.to_path_buf())
            }
            Err(e) => ConfUpdate::Failed(format!("write {}: {}", path.display(), e)),
        },
        None => ConfUpdate::Unchanged(path.to_path_buf()),
    }
}

/// Write or replace the `[name]` storage block in the conf file at `path` (if any).
pub fn write_index_block(path: Option<&Path>, name: &str) -> ConfUpdate {
    let Some(path) = path else {
        warn!("indexes.conf not found; add the [{name}] stanza manually");
        return ConfUpdate::NotFound;
    };
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => return ConfUpdate::Failed(format!("read {}: {}", path.display(), e)),
    };
    let updated = upsert_block(&text, name, &render_block(name));
    if updated == text {
        return ConfUpdate::Unchanged(path.to_path_buf());
    }
    match std::fs::write(path, updated) {
        Ok(()) => {
            debug!("Wrote [{}] to {}", name, path.display());
            ConfUpdate::Updated(path.to_path_buf())
        }
        Err(e) => ConfUpdate::Failed(format!("write {}: {}", path.display(), e)),
    }
}
