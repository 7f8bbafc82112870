use crate::error::DiscoveryError;
use crate::fs::FileSystem;
use std::path::Path;
use tracing::debug;

/// Returns the name of the first child directory of `parent` whose name ends
/// with `suffix`, ignoring case.
///
/// Children are checked in listing order. An empty suffix matches the first
/// directory.
pub fn find_profile_dir<F: FileSystem + ?Sized>(
    fs: &F,
    parent: &Path,
    suffix: &str,
) -> Result<String, DiscoveryError> {
    let entries = fs
        .read_dir(parent)
        .map_err(|source| DiscoveryError::ListDir {
            path: parent.to_path_buf(),
            source,
        })?;

    let suffix_lower = suffix.to_lowercase();
    let found = entries
        .into_iter()
        .find(|entry| entry.is_dir() && entry.name.to_lowercase().ends_with(&suffix_lower));

    match found {
        Some(entry) => {
            debug!(parent = %parent.display(), suffix, profile = %entry.name, "found profile directory");
            Ok(entry.name)
        }
        None => Err(DiscoveryError::NoMatchingDir {
            parent: parent.to_path_buf(),
            suffix: suffix.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::fs::MockFileSystem;

    fn firefox_root() -> MockFileSystem {
        let fs = MockFileSystem::new();
        fs.add_file("firefox/installs.ini", "");
        fs.add_file("firefox/x9.default-release.bak", "");
        fs.add_dir("firefox/ab12.default");
        fs.add_dir("firefox/cd34.Default-Release");
        fs.add_dir("firefox/ef56.default-release");
        fs
    }

    #[test]
    fn test_matches_case_insensitively() {
        let fs = firefox_root();

        let name = find_profile_dir(&fs, Path::new("/mock/firefox"), ".DEFAULT-release").unwrap();
        assert_eq!(name, "cd34.Default-Release");
    }

    #[test]
    fn test_first_match_in_listing_order_wins() {
        let fs = firefox_root();

        let name = find_profile_dir(&fs, Path::new("/mock/firefox"), "default-release").unwrap();
        assert_eq!(name, "cd34.Default-Release");
    }

    #[test]
    fn test_ignores_files() {
        let fs = MockFileSystem::new();
        fs.add_file("firefox/a.default-release", "");
        fs.add_dir("firefox/b.default-release");

        let name = find_profile_dir(&fs, Path::new("/mock/firefox"), ".default-release").unwrap();
        assert_eq!(name, "b.default-release");
    }

    #[test]
    fn test_empty_suffix_returns_first_directory() {
        let fs = firefox_root();

        let name = find_profile_dir(&fs, Path::new("/mock/firefox"), "").unwrap();
        assert_eq!(name, "ab12.default");
    }

    #[test]
    fn test_no_match() {
        let fs = firefox_root();

        let err = find_profile_dir(&fs, Path::new("/mock/firefox"), ".dev-edition").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        match err {
            DiscoveryError::NoMatchingDir { parent, suffix } => {
                assert_eq!(parent, Path::new("/mock/firefox"));
                assert_eq!(suffix, ".dev-edition");
            }
            other => panic!("Expected NoMatchingDir, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_parent_is_listing_error() {
        let fs = firefox_root();

        let err = find_profile_dir(&fs, Path::new("/mock/chromium"), "default").unwrap_err();
        assert!(matches!(err, DiscoveryError::ListDir { .. }));
        assert_eq!(err.kind(), ErrorKind::Access);
    }

    #[test]
    fn test_parent_is_a_file() {
        let fs = firefox_root();

        let err =
            find_profile_dir(&fs, Path::new("/mock/firefox/installs.ini"), "").unwrap_err();
        assert!(matches!(err, DiscoveryError::ListDir { .. }));
    }
}
