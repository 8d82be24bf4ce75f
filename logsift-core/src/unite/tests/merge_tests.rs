use crate::unite::{UniteError, UniteSummary, archives, unite};
use flate2::Compression;
use flate2::write::GzEncoder;
use pretty_assertions::assert_eq;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

fn gzip(path: &Path, text: &str) {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    fs::write(path, encoder.finish().unwrap()).unwrap();
}

#[test]
fn archives_are_appended_in_name_order() {
    // Arrange
    let dir = tempdir().unwrap();
    let logs = dir.path().join("logs");
    fs::create_dir(&logs).unwrap();
    gzip(&logs.join("access.log.2.gz"), "second\n");
    gzip(&logs.join("access.log.1.gz"), "first\n");
    fs::write(logs.join("access.log"), "plain, not an archive\n").unwrap();
    let output = dir.path().join("united.log");

    // Act
    let summary = unite(&logs, &output).unwrap();

    // Assert
    assert_eq!(fs::read_to_string(&output).unwrap(), "first\nsecond\n");
    assert_eq!(
        summary,
        UniteSummary {
            archives: 2,
            bytes: 13,
        }
    );
}

#[test]
fn existing_output_is_appended_to() {
    // Arrange
    let dir = tempdir().unwrap();
    let logs = dir.path().join("logs");
    fs::create_dir(&logs).unwrap();
    gzip(&logs.join("a.gz"), "new\n");
    let output = dir.path().join("united.log");
    fs::write(&output, "old\n").unwrap();

    // Act
    unite(&logs, &output).unwrap();

    // Assert
    assert_eq!(fs::read_to_string(&output).unwrap(), "old\nnew\n");
}

#[test]
fn concatenated_gzip_members_are_all_read() {
    // Arrange
    let dir = tempdir().unwrap();
    let logs = dir.path().join("logs");
    fs::create_dir(&logs).unwrap();

    let mut bytes = Vec::new();
    for part in ["one\n", "two\n"] {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
        encoder.write_all(part.as_bytes()).unwrap();
        bytes.extend(encoder.finish().unwrap());
    }
    fs::write(logs.join("multi.gz"), bytes).unwrap();
    let output = dir.path().join("united.log");

    // Act
    unite(&logs, &output).unwrap();

    // Assert
    assert_eq!(fs::read_to_string(&output).unwrap(), "one\ntwo\n");
}

#[test]
fn empty_directory_creates_an_empty_output() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("united.log");

    let summary = unite(dir.path(), &output).unwrap();

    assert_eq!(summary, UniteSummary::default());
    assert_eq!(fs::read_to_string(&output).unwrap(), "");
}

#[test]
fn corrupt_archive_is_a_decompress_error() {
    // Arrange
    let dir = tempdir().unwrap();
    let logs = dir.path().join("logs");
    fs::create_dir(&logs).unwrap();
    fs::write(logs.join("broken.gz"), b"definitely not gzip").unwrap();

    // Act
    let err = unite(&logs, &dir.path().join("united.log")).unwrap_err();

    // Assert
    match err {
        UniteError::Decompress { path, .. } => assert_eq!(path, logs.join("broken.gz")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn archive_listing_skips_directories() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("nested.gz")).unwrap();
    gzip(&dir.path().join("real.gz"), "x\n");

    let found = archives(dir.path()).unwrap();

    assert_eq!(found, vec![dir.path().join("real.gz")]);
}

#[test]
fn listing_error_names_the_unreadable_entry() {
    let err = UniteError::List {
        path: Path::new("/var/log/nginx/old").to_path_buf(),
        source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
    };

    let message = err.to_string();

    assert!(message.starts_with("failed to list archive /var/log/nginx/old: "), "{message}");
}
