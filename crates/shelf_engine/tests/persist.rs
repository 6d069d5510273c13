use std::fs;

use shelf_engine::{ensure_output_dir, AtomicFileWriter, PersistError};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("exports");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn rejects_file_as_output_dir() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("plain");
    fs::write(&file_path, "x").unwrap();

    let err = ensure_output_dir(&file_path).unwrap_err();
    assert!(matches!(err, PersistError::OutputDir(_)));
}

#[test]
fn atomic_write_replaces_previous_export() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path());

    let first = writer.write("scanned_books.csv", b"a,b\n").unwrap();
    assert_eq!(first.file_name().unwrap(), "scanned_books.csv");
    assert_eq!(fs::read_to_string(&first).unwrap(), "a,b\n");

    let second = writer.write("scanned_books.csv", b"c,d\n").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "c,d\n");
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("scanned_books.csv", b"data").is_err());
    assert!(!file_path.with_file_name("scanned_books.csv").exists());
}

#[test]
fn previous_export_survives_until_commit() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path());
    let first = writer.write("scanned_books.md", b"first\n").unwrap();

    let pending = writer.stage("scanned_books.md", b"second\n").unwrap();
    assert_eq!(pending.target(), first.as_path());
    assert_eq!(fs::read_to_string(&first).unwrap(), "first\n");

    // An abandoned write removes its temp file and keeps the old export.
    drop(pending);
    assert_eq!(fs::read_to_string(&first).unwrap(), "first\n");
    let names: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("scanned_books.md")]);
}

#[test]
fn failed_commit_leaves_target_in_place() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path());
    let blocker = temp.path().join("scanned_books.csv");
    fs::create_dir(&blocker).unwrap();
    fs::write(blocker.join("keep.txt"), "kept").unwrap();

    let err = writer.write("scanned_books.csv", b"a,b\n").unwrap_err();

    assert!(matches!(err, PersistError::Io(_)));
    assert_eq!(fs::read_to_string(blocker.join("keep.txt")).unwrap(), "kept");
}
