//! Discovery pipeline against real directories
//!
//! Modification times are pinned with `filetime` so selection does not depend
//! on how fast the fixtures are written.

use bookmark_locator::{
    find_latest_file, find_profile_dir, BookmarkLocator, DiscoveryError, LatestFileOptions,
    LatestFilePolicy, LocatorConfig, ProfileQuery, RealFileSystem,
};
use filetime::{set_file_mtime, FileTime};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn write_with_mtime(path: &Path, content: &str, unix_secs: i64) {
    fs::write(path, content).unwrap();
    set_file_mtime(path, FileTime::from_unix_time(unix_secs, 0)).unwrap();
}

fn firefox_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    let firefox = temp.path().join(".mozilla/firefox");
    let backups = firefox.join("x7q1.Default-Release/bookmarkbackups");

    fs::create_dir_all(firefox.join("k2j4.default")).unwrap();
    fs::create_dir_all(&backups).unwrap();
    fs::write(firefox.join("profiles.ini"), "[General]").unwrap();

    write_with_mtime(&backups.join("bookmarks-2024-05-01.jsonlz4"), "a", 1_714_521_600);
    write_with_mtime(&backups.join("bookmarks-2024-05-03.jsonlz4"), "c", 1_714_694_400);
    write_with_mtime(&backups.join("bookmarks-2024-05-02.jsonlz4"), "b", 1_714_608_000);

    temp
}

#[test]
fn test_find_profile_dir_case_insensitive() {
    let temp = firefox_tree();
    let fs = RealFileSystem::new();

    let name = find_profile_dir(
        &fs,
        &temp.path().join(".mozilla/firefox"),
        ".default-release",
    )
    .unwrap();
    assert_eq!(name, "x7q1.Default-Release");
}

#[test]
fn test_find_profile_dir_empty_suffix_returns_first_directory() {
    let temp = firefox_tree();
    let fs = RealFileSystem::new();

    let name = find_profile_dir(&fs, &temp.path().join(".mozilla/firefox"), "").unwrap();
    assert_eq!(name, "k2j4.default");
}

#[test]
fn test_find_latest_file_by_mtime() {
    let temp = firefox_tree();
    let fs = RealFileSystem::new();
    let backups = temp
        .path()
        .join(".mozilla/firefox/x7q1.Default-Release/bookmarkbackups");

    let latest = find_latest_file(&fs, &backups, LatestFileOptions::default()).unwrap();
    assert_eq!(latest, backups.join("bookmarks-2024-05-03.jsonlz4"));
    assert_eq!(latest.parent(), Some(backups.as_path()));
}

#[test]
fn test_find_latest_file_tie_returns_later_listed() {
    let temp = TempDir::new().unwrap();
    write_with_mtime(&temp.path().join("a.json"), "{}", 1_700_000_000);
    write_with_mtime(&temp.path().join("b.json"), "{}", 1_700_000_000);
    let fs = RealFileSystem::new();

    let latest = find_latest_file(&fs, temp.path(), LatestFileOptions::default()).unwrap();
    assert_eq!(latest, temp.path().join("b.json"));
}

#[test]
fn test_find_latest_file_ignores_hidden_and_subdirectories() {
    let temp = TempDir::new().unwrap();
    write_with_mtime(&temp.path().join("a.json"), "{}", 1_700_000_000);
    write_with_mtime(&temp.path().join(".lock"), "", 1_800_000_000);
    fs::create_dir(temp.path().join("zz-old")).unwrap();
    let fs = RealFileSystem::new();

    let latest = find_latest_file(&fs, temp.path(), LatestFileOptions::default()).unwrap();
    assert_eq!(latest, temp.path().join("a.json"));
}

#[test]
fn test_find_latest_file_compatible_policy_keeps_first_entry() {
    let temp = TempDir::new().unwrap();
    write_with_mtime(&temp.path().join(".lock"), "", 1_800_000_000);
    write_with_mtime(&temp.path().join("a.json"), "{}", 1_700_000_000);
    let fs = RealFileSystem::new();
    let options = LatestFileOptions {
        policy: LatestFilePolicy::Compatible,
        ..Default::default()
    };

    let latest = find_latest_file(&fs, temp.path(), options).unwrap();
    assert_eq!(latest, temp.path().join(".lock"));
}

#[test]
#[cfg(unix)]
fn test_find_latest_file_with_dangling_lock_symlink() {
    use filetime::set_symlink_file_times;
    use std::os::unix::fs::symlink;

    let temp = TempDir::new().unwrap();
    write_with_mtime(&temp.path().join("a.json"), "{}", 1_700_000_000);
    let lock = temp.path().join("lock");
    symlink("192.168.1.20:+4242", &lock).unwrap();
    let old = FileTime::from_unix_time(1_600_000_000, 0);
    set_symlink_file_times(&lock, old, old).unwrap();
    let fs = RealFileSystem::new();

    let latest = find_latest_file(&fs, temp.path(), LatestFileOptions::default()).unwrap();
    assert_eq!(latest, temp.path().join("a.json"));
}

#[test]
#[cfg(unix)]
fn test_symlinked_directory_is_not_a_profile() {
    use std::os::unix::fs::symlink;

    let temp = firefox_tree();
    let firefox = temp.path().join(".mozilla/firefox");
    symlink(firefox.join("k2j4.default"), firefox.join("a000.nightly")).unwrap();
    let fs = RealFileSystem::new();

    let err = find_profile_dir(&fs, &firefox, ".nightly").unwrap_err();
    assert!(matches!(err, DiscoveryError::NoMatchingDir { .. }));
}

#[test]
#[cfg(target_os = "linux")]
fn test_find_latest_file_keeps_non_utf8_name() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp = TempDir::new().unwrap();
    write_with_mtime(&temp.path().join("a.json"), "{}", 1_700_000_000);
    let odd = temp.path().join(OsStr::from_bytes(b"bookmarks-\xff.jsonlz4"));
    write_with_mtime(&odd, "mozLz40", 1_800_000_000);
    let fs = RealFileSystem::new();

    let latest = find_latest_file(&fs, temp.path(), LatestFileOptions::default()).unwrap();
    assert_eq!(latest, odd);
    assert!(latest.exists());
}

#[test]
fn test_locate_pipeline_from_absolute_root() {
    let temp = firefox_tree();
    let locator = BookmarkLocator::new(
        Arc::new(RealFileSystem::new()),
        LocatorConfig {
            hidden_prefix: '.',
            latest_file_policy: LatestFilePolicy::Strict,
            log_level: "info".to_string(),
        },
    );

    let query = ProfileQuery::new(temp.path().join(".mozilla/firefox"), ".DEFAULT-RELEASE")
        .with_data_dir("bookmarkbackups");
    let path = locator.locate(&query).unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "bookmarks-2024-05-03.jsonlz4"
    );
}
