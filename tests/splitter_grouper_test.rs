//! Tests for audiobook file grouping.

#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use regex::Regex;
use tempfile::tempdir;

use chapterize::constants::DEFAULT_TITLE_PATTERN;
use chapterize::splitter::group_audiobook_files;

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), b"").unwrap();
}

fn default_pattern() -> Regex {
    Regex::new(DEFAULT_TITLE_PATTERN).unwrap()
}

#[test]
fn test_single_file_single_group() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "The Long Way.m4b");

    let groups = group_audiobook_files(dir.path(), &default_pattern()).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].title, "The Long Way");
    assert_eq!(groups[0].files.len(), 1);
}

#[test]
fn test_multi_part_files_grouped_by_title() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "1 The Long Way.m4b");
    touch(dir.path(), "2 The Long Way.m4b");
    touch(dir.path(), "Another Book.m4b");

    let groups = group_audiobook_files(dir.path(), &default_pattern()).unwrap();

    assert_eq!(groups.len(), 2);
    // Groups come back sorted by title
    assert_eq!(groups[0].title, "Another Book");
    assert_eq!(groups[1].title, "The Long Way");
    assert_eq!(groups[1].files.len(), 2);
}

#[test]
fn test_parts_naturally_sorted() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "10 Saga.m4b");
    touch(dir.path(), "2 Saga.m4b");
    touch(dir.path(), "1 Saga.m4b");

    let groups = group_audiobook_files(dir.path(), &default_pattern()).unwrap();

    assert_eq!(groups.len(), 1);
    let names: Vec<String> = groups[0]
        .files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["1 Saga.m4b", "2 Saga.m4b", "10 Saga.m4b"]);
}

#[test]
fn test_non_audiobook_files_skipped() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "Book.m4b");
    touch(dir.path(), "cover.jpg");
    touch(dir.path(), "notes.txt");

    let groups = group_audiobook_files(dir.path(), &default_pattern()).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].files.len(), 1);
}

#[test]
fn test_uppercase_extension_accepted() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "Shouty Book.M4B");

    let groups = group_audiobook_files(dir.path(), &default_pattern()).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].title, "Shouty Book");
}

#[test]
fn test_subdirectories_not_scanned() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "Top Level.m4b");
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    touch(&nested, "Hidden Book.m4b");

    let groups = group_audiobook_files(dir.path(), &default_pattern()).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].title, "Top Level");
}

#[test]
fn test_empty_directory_is_error() {
    let dir = tempdir().unwrap();

    let result = group_audiobook_files(dir.path(), &default_pattern());

    assert!(matches!(
        result,
        Err(chapterize::Error::NoAudiobookFiles { .. })
    ));
}

#[test]
fn test_missing_directory_is_error() {
    let result = group_audiobook_files(Path::new("/nonexistent/audiobooks"), &default_pattern());

    assert!(matches!(
        result,
        Err(chapterize::Error::InputDirRead { .. })
    ));
}

#[test]
fn test_custom_pattern_grouping() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "Saga - Part 1.m4b");
    touch(dir.path(), "Saga - Part 2.m4b");

    let pattern = Regex::new(r"^(.+) - Part \d+\.m4b$").unwrap();
    let groups = group_audiobook_files(dir.path(), &pattern).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].title, "Saga");
    assert_eq!(groups[0].files.len(), 2);
}
