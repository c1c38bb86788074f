use sitemapper::handlers::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_resolve_output_path_plain() {
    let path = resolve_output_path("siteMap.txt");
    assert_eq!(path, PathBuf::from("siteMap.txt"));
}

#[test]
fn test_resolve_output_path_expands_tilde() {
    let path = resolve_output_path("~/siteMap.txt");
    assert!(!path.to_string_lossy().starts_with('~'));
    assert!(path.to_string_lossy().ends_with("siteMap.txt"));
}

#[test]
fn test_entry_count() {
    assert_eq!(entry_count(""), 0);
    assert_eq!(entry_count("http://x/\n"), 1);
    assert_eq!(
        entry_count("http://x/\nhttp://x/a - read timeout.\nhttp://other.com\n"),
        3
    );
}

#[test]
fn test_write_site_map() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("siteMap.txt");

    write_site_map(&path, "http://x/\nhttp://x/a\n")?;

    let contents = fs::read_to_string(&path)?;
    assert_eq!(contents, "http://x/\nhttp://x/a\n");
    Ok(())
}

#[test]
fn test_write_site_map_creates_parent_directories() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("reports").join("deep").join("siteMap.txt");

    write_site_map(&path, "http://x/\n")?;

    assert!(path.exists());
    Ok(())
}
