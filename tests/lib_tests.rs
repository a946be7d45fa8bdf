use splidx::conf::{remove_block, render_block, upsert_block};
use splidx::engine::tools::{archive_file_name, archive_file_name_seq, dat_file_name, zip_entry_name};
use splidx::engine::{
    OutputClassifier, PhraseTable, filter_benign, format_size, index_name_from_archive, normalize,
    path_relative_to,
};
use splidx::utils::settings_toml::{apply_file_to_settings, load_settings_toml};
use splidx::{EncryptionMode, Settings, Verdict, parse_index_list};
use std::path::{Path, PathBuf};

fn prefixes() -> Vec<String> {
    Settings::default().system_prefixes
}

// --- path_relative_to ---

#[test]
fn test_path_relative_under_base() {
    let base = PathBuf::from("/opt/splunk/var/lib/splunk");
    let path = PathBuf::from("/opt/splunk/var/lib/splunk/web/db/hot_v1_0");
    assert_eq!(
        path_relative_to(&path, &base),
        Some(PathBuf::from("web/db/hot_v1_0"))
    );
}

#[test]
fn test_path_relative_not_under_base() {
    let base = PathBuf::from("/opt/splunk/var/lib/splunk");
    assert_eq!(path_relative_to(Path::new("/tmp/x"), &base), None);
}

// --- format_size ---

#[test]
fn test_format_size_zero() {
    assert_eq!(format_size(0), "0.0MB");
}

#[test]
fn test_format_size_one_mib() {
    assert_eq!(format_size(1024 * 1024), "1.0MB");
}

#[test]
fn test_format_size_just_below_threshold_stays_mb() {
    assert_eq!(format_size(2047 * 1024 * 1024), "2047.0MB");
}

#[test]
fn test_format_size_threshold_switches_to_gb() {
    assert_eq!(format_size(2048 * 1024 * 1024), "2.0GB");
}

// --- classify ---

#[test]
fn test_normalize_collapses_whitespace_and_case() {
    assert_eq!(normalize("  Index \"web\"\n\tADDED.  "), "index \"web\" added.");
}

#[test]
fn test_create_added_is_success() {
    let c = OutputClassifier::default();
    assert_eq!(c.create.classify("Index \"web\" added."), Verdict::Success);
}

#[test]
fn test_create_already_exists_is_success_despite_error_word() {
    let c = OutputClassifier::default();
    let out = "Error in handler 'indexes': An index with this name ALREADY   EXISTS";
    assert_eq!(c.create.classify(out), Verdict::Success);
}

#[test]
fn test_create_error_is_failure() {
    let c = OutputClassifier::default();
    assert_eq!(
        c.create.classify("Error: Invalid index name"),
        Verdict::Failure
    );
}

#[test]
fn test_unmatched_output_is_unexpected() {
    let c = OutputClassifier::default();
    assert_eq!(c.create.classify("Your session is invalid."), Verdict::Unexpected);
    assert_eq!(c.delete.classify(""), Verdict::Unexpected);
}

#[test]
fn test_delete_removed_is_success() {
    let c = OutputClassifier::default();
    assert_eq!(c.delete.classify("Index \"web\" removed."), Verdict::Success);
    assert_eq!(
        c.delete.classify("Removal of index web is in progress"),
        Verdict::Success
    );
}

#[test]
fn test_delete_missing_index_is_failure() {
    let c = OutputClassifier::default();
    assert_eq!(
        c.delete.classify("Error: Index \"nope\" does not exist."),
        Verdict::Failure
    );
}

#[test]
fn test_custom_phrase_table() {
    let table = PhraseTable {
        success: vec!["Erstellt".to_string()],
        failure: vec!["Fehler".to_string()],
    };
    assert_eq!(table.classify("Index erstellt"), Verdict::Success);
    assert_eq!(table.classify("FEHLER beim Anlegen"), Verdict::Failure);
}

#[test]
fn test_empty_phrase_never_matches() {
    let table = PhraseTable {
        success: vec![String::new()],
        failure: vec![],
    };
    assert_eq!(table.classify("anything"), Verdict::Unexpected);
}

#[test]
fn test_filter_benign_drops_warning_lines_only() {
    let benign = OutputClassifier::default().benign;
    let text = "WARNING: Server Certificate Hostname Validation is disabled. See cliVerifyServerName.\nIndex \"web\" added.";
    assert_eq!(filter_benign(text, &benign), "Index \"web\" added.");
}

// --- parse_index_list ---

const LIST_OUTPUT: &str = "_audit\n\t/opt/splunk/var/lib/splunk/audit/db\n\n_internal\n\t/opt/splunk/var/lib/splunk/_internaldb/db\nmain\n\tC:\\Splunk\\var\\lib\\splunk\\defaultdb\\db\nhistory\nsummary\nsplunklogger\nfirewall\nMainframe\nweb_proxy\n";

#[test]
fn test_parse_index_list_all() {
    let names = parse_index_list(LIST_OUTPUT, false, &prefixes());
    assert_eq!(
        names,
        vec![
            "_audit",
            "_internal",
            "main",
            "history",
            "summary",
            "splunklogger",
            "firewall",
            "Mainframe",
            "web_proxy"
        ]
    );
}

#[test]
fn test_parse_index_list_excludes_system_by_prefix() {
    // prefix match, case-insensitive: "Mainframe" starts with "main"
    let names = parse_index_list(LIST_OUTPUT, true, &prefixes());
    assert_eq!(names, vec!["firewall", "web_proxy"]);
}

#[test]
fn test_parse_index_list_empty_output() {
    assert!(parse_index_list("\n\n", true, &prefixes()).is_empty());
}

// --- archive naming ---

#[test]
fn test_index_name_from_archive() {
    assert_eq!(
        index_name_from_archive(Path::new("/backups/forensics01_backup_20240131-235959.zip")),
        Some("forensics01".to_string())
    );
}

#[test]
fn test_index_name_from_archive_splits_at_first_delimiter() {
    assert_eq!(
        index_name_from_archive(Path::new("a_b_backup_x_backup_y.zip")),
        Some("a_b".to_string())
    );
}

#[test]
fn test_index_name_from_archive_without_delimiter() {
    assert_eq!(index_name_from_archive(Path::new("forensics01.zip")), None);
    assert_eq!(index_name_from_archive(Path::new("_backup_2024.zip")), None);
}

#[test]
fn test_archive_file_name_round_trips_index() {
    let name = archive_file_name("web", chrono::Local::now());
    assert!(name.starts_with("web_backup_"));
    assert!(name.ends_with(".zip"));
    // web_backup_ + YYYYMMDD-HHMMSS + .zip
    assert_eq!(name.len(), "web_backup_".len() + 15 + 4);
    assert_eq!(index_name_from_archive(Path::new(&name)).as_deref(), Some("web"));
}

#[test]
fn test_archive_file_name_seq_suffix() {
    let at = chrono::Local::now();
    assert_eq!(archive_file_name_seq("web", at, 0), archive_file_name("web", at));
    let second = archive_file_name_seq("web", at, 2);
    assert!(second.ends_with("-2.zip"));
    assert_eq!(index_name_from_archive(Path::new(&second)).as_deref(), Some("web"));
}

#[test]
fn test_dat_file_name() {
    assert_eq!(dat_file_name("web"), "web.dat");
}

#[test]
fn test_zip_entry_name_uses_forward_slashes() {
    let rel: PathBuf = ["web", "db", "hot_v1_0", "rawdata"].iter().collect();
    assert_eq!(zip_entry_name(&rel, false), "web/db/hot_v1_0/rawdata");
    assert_eq!(zip_entry_name(Path::new("web"), true), "web/");
}

// --- indexes.conf blocks ---

const CONF: &str = "[a]\nhomePath = $SPLUNK_DB/a/db\n\n[b]\nhomePath = $SPLUNK_DB/b/db\ncoldPath = $SPLUNK_DB/b/colddb\n\n[c]\nhomePath = $SPLUNK_DB/c/db\n";

#[test]
fn test_remove_block_middle() {
    let out = remove_block(CONF, "b").unwrap();
    assert_eq!(
        out,
        "[a]\nhomePath = $SPLUNK_DB/a/db\n\n[c]\nhomePath = $SPLUNK_DB/c/db\n"
    );
}

const CONF_CRLF: &str = "[a]\r\nx = 1\r\n\r\n[b]\r\ny = 2\r\n\r\n[c]\r\nz = 3\r\n";

#[test]
fn test_remove_block_keeps_crlf() {
    let out = remove_block(CONF_CRLF, "b").unwrap();
    assert_eq!(out, "[a]\r\nx = 1\r\n\r\n[c]\r\nz = 3\r\n");
}

#[test]
fn test_remove_block_keeps_mixed_endings_of_other_blocks() {
    let text = "[a]\r\nx = 1\r\n[b]\ny = 2\n[c]\r\nz = 3";
    assert_eq!(remove_block(text, "b").unwrap(), "[a]\r\nx = 1\r\n[c]\r\nz = 3");
}

#[test]
fn test_upsert_block_crlf_replace_and_append() {
    let replaced = upsert_block(CONF_CRLF, "b", "[b]\ny = 9\n");
    assert_eq!(
        replaced,
        "[a]\r\nx = 1\r\n\r\n[b]\r\ny = 9\r\n\r\n[c]\r\nz = 3\r\n"
    );

    let appended = upsert_block(CONF_CRLF, "web", &render_block("web"));
    assert!(appended.starts_with(CONF_CRLF));
    assert!(appended.contains("\r\n\r\n[web]\r\nhomePath = $SPLUNK_DB/web/db\r\n"));
    assert!(!appended.replace("\r\n", "").contains('\n'));
}

#[test]
fn test_remove_block_last() {
    let out = remove_block(CONF, "c").unwrap();
    assert!(!out.contains("[c]"));
    assert!(out.contains("[b]\nhomePath = $SPLUNK_DB/b/db\ncoldPath = $SPLUNK_DB/b/colddb\n"));
}

#[test]
fn test_remove_block_absent() {
    assert_eq!(remove_block(CONF, "web"), None);
    // header must match exactly, not by prefix
    assert_eq!(remove_block(CONF, "[a"), None);
}

#[test]
fn test_upsert_block_appends_after_blank_line() {
    let out = upsert_block("[a]\nx = 1", "web", &render_block("web"));
    assert!(out.starts_with("[a]\nx = 1\n\n[web]\n"));
    assert!(out.ends_with("maxTotalDataSizeMB = 500000\n"));
}

#[test]
fn test_upsert_block_into_empty_file() {
    assert_eq!(upsert_block("", "web", &render_block("web")), render_block("web"));
}

#[test]
fn test_upsert_block_replaces_existing() {
    let out = upsert_block(CONF, "b", "[b]\nhomePath = /new\n");
    assert_eq!(
        out,
        "[a]\nhomePath = $SPLUNK_DB/a/db\n\n[b]\nhomePath = /new\n\n[c]\nhomePath = $SPLUNK_DB/c/db\n"
    );
    assert_eq!(out.matches("[b]").count(), 1);
}

#[test]
fn test_upsert_block_is_idempotent() {
    let once = upsert_block(CONF, "web", &render_block("web"));
    let twice = upsert_block(&once, "web", &render_block("web"));
    assert_eq!(once, twice);
}

#[test]
fn test_render_block_paths() {
    let block = render_block("forensics01");
    assert!(block.starts_with("[forensics01]\n"));
    assert!(block.contains("homePath = $SPLUNK_DB/forensics01/db\n"));
    assert!(block.contains("coldPath = $SPLUNK_DB/forensics01/colddb\n"));
    assert!(block.contains("thawedPath = $SPLUNK_DB/forensics01/thaweddb\n"));
}

// --- settings file ---

#[test]
fn test_settings_defaults() {
    let s = Settings::default();
    assert_eq!(s.password_cipher, EncryptionMode::Aes256);
    assert!(s.verify_backups);
    assert_eq!(s.login_retries, 3);
    assert!(s.data_root.is_none());
}

#[test]
fn test_settings_toml_overlay() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join(".splidx.toml");
    std::fs::write(
        &path,
        r#"
[settings]
data_root = "/data/splunk"
encryption = "zipcrypto"
verify_backups = false
login_retries = 5

[phrases]
create_success = ["angelegt"]
failure = ["fehler"]
"#,
    )
    .unwrap();

    let file = load_settings_toml(&path).unwrap();
    let mut s = Settings::default();
    apply_file_to_settings(&file, &mut s);

    assert_eq!(s.data_root, Some(PathBuf::from("/data/splunk")));
    assert_eq!(s.password_cipher, EncryptionMode::ZipCrypto);
    assert!(!s.verify_backups);
    assert_eq!(s.login_retries, 5);
    assert_eq!(s.classifier.create.success, vec!["angelegt".to_string()]);
    assert_eq!(s.classifier.delete.failure, vec!["fehler".to_string()]);
    // untouched keys keep defaults
    assert_eq!(s.system_prefixes, prefixes());
    assert_eq!(s.classifier.login_failure, "Login failed");
}

#[test]
fn test_settings_toml_invalid_is_ignored() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join(".splidx.toml");
    std::fs::write(&path, "[settings\nencryption = 3").unwrap();
    assert!(load_settings_toml(&path).is_none());
    assert!(load_settings_toml(&tmp.path().join("missing.toml")).is_none());
}
