//! Tests for writing workbooks to disk

use nestegg_core::{Plan, RenderError};
use nestegg_render::{WorkbookGenerator, DEFAULT_OUTPUT};
use tempfile::TempDir;

#[test]
fn writes_xlsx_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(DEFAULT_OUTPUT);

    WorkbookGenerator::new()
        .write_to_path(&Plan::default(), &path)
        .unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[0..2], b"PK");
}

#[test]
fn overwrites_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plan.xlsx");
    std::fs::write(&path, "stale").unwrap();

    WorkbookGenerator::new()
        .write_to_path(&Plan::default(), &path)
        .unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[0..2], b"PK");
}

#[test]
fn missing_directory_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no_such_dir").join("plan.xlsx");

    let err = WorkbookGenerator::new()
        .write_to_path(&Plan::default(), &path)
        .unwrap_err();

    assert!(matches!(err, RenderError::Io(_)));
    assert!(!path.exists());
}

#[test]
fn invalid_plan_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plan.xlsx");
    let plan = Plan::default().with_scenario("Nope");

    let err = WorkbookGenerator::new()
        .write_to_path(&plan, &path)
        .unwrap_err();

    assert!(matches!(err, RenderError::InvalidData(_)));
    assert!(!path.exists());
}

#[test]
fn failed_write_leaves_existing_file_untouched() {
    let dir = TempDir::new().unwrap();
    let existing = dir.path().join("old.xlsx");
    std::fs::write(&existing, "previous workbook").unwrap();

    // A path below a regular file cannot be staged or renamed into
    let path = existing.join("plan.xlsx");
    let err = WorkbookGenerator::new()
        .write_to_path(&Plan::default(), &path)
        .unwrap_err();

    assert!(matches!(err, RenderError::Io(_)));
    assert_eq!(std::fs::read_to_string(&existing).unwrap(), "previous workbook");
}

#[test]
fn failed_rename_keeps_target_and_cleans_up() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("plan.xlsx");
    std::fs::create_dir(&target).unwrap();
    std::fs::write(target.join("keep.txt"), "kept").unwrap();

    let err = WorkbookGenerator::new()
        .write_to_path(&Plan::default(), &target)
        .unwrap_err();

    assert!(matches!(err, RenderError::Io(_)));
    assert_eq!(std::fs::read_to_string(target.join("keep.txt")).unwrap(), "kept");
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("plan.xlsx")]);
}

#[test]
fn successful_write_leaves_no_staging_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested.xlsx");

    WorkbookGenerator::new()
        .write_to_path(&Plan::default(), &path)
        .unwrap();

    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("nested.xlsx")]);
}
