/*!
 * Tests for file and folder utilities
 */

use aozora2mdx::file_utils::FileManager;
use std::path::PathBuf;

/// Test output path generation from an input file and output directory
#[test]
fn test_generate_output_path_withHtmlInput_shouldSwapExtension() {
    let path = FileManager::generate_output_path("library/book.html", "out", "mdx");
    assert_eq!(path, PathBuf::from("out/book.mdx"));
}

/// Test that file and directory existence checks distinguish the two
#[test]
fn test_file_exists_withDirectory_shouldReturnFalse() {
    let dir = tempfile::tempdir().unwrap();

    assert!(!FileManager::file_exists(dir.path()));
    assert!(FileManager::dir_exists(dir.path()));
}

/// Test finding files by extension, case-insensitively
#[test]
fn test_find_files_withMixedExtensions_shouldMatchCaseInsensitively() {
    let dir = tempfile::tempdir().unwrap();
    FileManager::write_to_file(dir.path().join("a.html"), "<html></html>").unwrap();
    FileManager::write_to_file(dir.path().join("b.HTML"), "<html></html>").unwrap();
    FileManager::write_to_file(dir.path().join("c.txt"), "text").unwrap();

    let mut found = FileManager::find_files(dir.path(), "html").unwrap();
    found.sort();

    assert_eq!(found.len(), 2);
    assert!(found[0].ends_with("a.html"));
    assert!(found[1].ends_with("b.HTML"));
}

/// Test that writing creates missing parent directories and reads back
#[test]
fn test_write_to_file_withMissingParent_shouldCreateAndRoundTrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/deep/book.mdx");

    FileManager::write_to_file(&path, "本文。").unwrap();
    let content = FileManager::read_to_string(&path).unwrap();

    assert_eq!(content, "本文。");
}
