//! Integration tests for recursive document tree conversion

#[path = "../support/log_capture.rs"]
mod log_capture;
#[path = "../support/stub_server.rs"]
mod stub_server;

use assert_matches::assert_matches;
use log_capture::capture_logs;
use md2html::walk::{walk_with, FileOutcome};
use md2html::{walk, ConversionClient, ConversionConfig, FileError, WalkError, WalkOptions};
use std::fs;
use std::path::Path;
use stub_server::StubServer;
use tempfile::tempdir;

fn create_tree(root: &Path) {
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("a.md"), "# A\n").unwrap();
    fs::write(root.join("notes.txt"), "not markdown").unwrap();
    fs::write(root.join("sub/b.md"), "# B\n").unwrap();
}

fn client_for(server: &StubServer) -> ConversionClient {
    ConversionClient::new(ConversionConfig::from_json_str(&server.config_json("")).unwrap())
}

#[test]
fn test_walk_converts_matching_files_in_place() {
    let root = tempdir().unwrap();
    create_tree(root.path());
    let server = StubServer::start(vec![(200, "<h1>A</h1>"), (200, "<h1>B</h1>")]);

    let report = walk(
        &client_for(&server),
        root.path(),
        ".md",
        ".html",
        &WalkOptions::default(),
    )
    .unwrap();

    assert_eq!(report.converted.len(), 2);
    assert!(report.failed.is_empty());
    assert_eq!(
        fs::read_to_string(root.path().join("a.html")).unwrap(),
        "<h1>A</h1>"
    );
    assert_eq!(
        fs::read_to_string(root.path().join("sub/b.html")).unwrap(),
        "<h1>B</h1>"
    );
    assert!(!root.path().join("notes.html").exists());

    // from/to come from the extension map when the config leaves them out
    let request = server.next_request().json();
    assert_eq!(request["from"], "markdown");
    assert_eq!(request["to"], "html5");
    assert_eq!(request["text"], "# A\n");
    assert_eq!(server.next_request().json()["text"], "# B\n");
}

#[test]
fn test_walk_continues_past_failed_file() {
    let root = tempdir().unwrap();
    create_tree(root.path());
    let server = StubServer::start(vec![(200, ""), (200, "<h1>B</h1>")]);

    let mut outcomes = Vec::new();
    let err = walk_with(
        &client_for(&server),
        root.path(),
        "md",
        "html",
        &WalkOptions::default(),
        |outcome| {
            outcomes.push(matches!(outcome, FileOutcome::Converted { .. }));
        },
    )
    .unwrap_err();

    assert_matches!(err, WalkError::Failures { failed: 1, total: 2 });
    assert_eq!(outcomes, vec![false, true]);
    assert!(!root.path().join("a.html").exists());
    assert!(root.path().join("sub/b.html").exists());
}

#[test]
fn test_walk_fail_fast_stops_at_first_failure() {
    let root = tempdir().unwrap();
    create_tree(root.path());
    let server = StubServer::start(vec![(500, "boom")]);

    let err = walk(
        &client_for(&server),
        root.path(),
        ".md",
        ".html",
        &WalkOptions { fail_fast: true },
    )
    .unwrap_err();

    assert_matches!(
        err,
        WalkError::File { ref path, source: FileError::Convert(_) } if path.ends_with("a.md")
    );
    assert!(!root.path().join("sub/b.html").exists());
}

#[test]
fn test_walk_skips_empty_documents() {
    let root = tempdir().unwrap();
    fs::write(root.path().join("empty.md"), "").unwrap();
    let server = StubServer::start(vec![(200, "unused")]);

    let err = walk(
        &client_for(&server),
        root.path(),
        ".md",
        ".html",
        &WalkOptions { fail_fast: true },
    )
    .unwrap_err();

    assert_matches!(
        err,
        WalkError::File {
            source: FileError::Convert(md2html::ConvertError::NothingToConvert),
            ..
        }
    );
}

#[test]
fn test_walk_logs_each_file() {
    let root = tempdir().unwrap();
    create_tree(root.path());
    let server = StubServer::start(vec![(200, ""), (200, "<h1>B</h1>")]);
    let client = client_for(&server);

    let (result, logs) = capture_logs(|| {
        walk(&client, root.path(), ".md", ".html", &WalkOptions::default())
    });
    assert_matches!(result, Err(WalkError::Failures { failed: 1, total: 2 }));

    let failed = logs
        .iter()
        .find(|line| line.contains("ERROR"))
        .unwrap_or_else(|| panic!("no error record in {:?}", logs));
    assert!(failed.contains("conversion failed"), "{}", failed);
    assert!(failed.contains("a.md"), "{}", failed);
    assert!(failed.contains("zero bytes returned"), "{}", failed);

    let converted = logs
        .iter()
        .find(|line| line.contains(" INFO ") && line.contains("converted"))
        .unwrap_or_else(|| panic!("no info record in {:?}", logs));
    assert!(converted.contains("b.md"), "{}", converted);
    assert!(converted.contains("b.html"), "{}", converted);
}

#[test]
fn test_walk_reports_unreadable_directory() {
    let root = tempdir().unwrap();
    fs::create_dir_all(root.path().join("sub")).unwrap();
    fs::write(root.path().join("a.md"), "# A\n").unwrap();
    fs::write(root.path().join("sub/b.md"), "# B\n").unwrap();
    let server = StubServer::start(vec![(200, "<h1>A</h1>")]);

    // The root listing is read up front, so "sub" is still visited after it
    // disappears and reading it fails.
    let sub = root.path().join("sub");
    let err = walk_with(
        &client_for(&server),
        root.path(),
        ".md",
        ".html",
        &WalkOptions { fail_fast: true },
        |outcome| {
            if let FileOutcome::Converted { .. } = outcome {
                fs::remove_dir_all(&sub).unwrap();
            }
        },
    )
    .unwrap_err();

    assert_matches!(
        err,
        WalkError::File { ref path, source: FileError::Traverse(_) } if path.ends_with("sub")
    );
    assert!(root.path().join("a.html").exists());
}
