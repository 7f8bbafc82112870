//! Bookmark file discovery orchestration
//!
//! `BookmarkLocator` binds the discovery operations to one [`FileSystem`] and
//! [`LocatorConfig`], and runs them as a pipeline:
//! 1. Resolve the search root (relative roots hang off the home directory)
//! 2. Find the profile directory by name suffix
//! 3. Pick the most recently modified file in the profile's data directory
//! 4. Confirm that file is readable
//!
//! # Example
//!
//! ```no_run
//! use bookmark_locator::{BookmarkLocator, LocatorConfig, ProfileQuery};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let locator = BookmarkLocator::with_real_fs(LocatorConfig::default());
//! let backup = locator.locate(&ProfileQuery::firefox_bookmark_backups())?;
//! println!("Latest bookmark backup: {}", backup.display());
//! # Ok(())
//! # }
//! ```

use super::{check_readable, find_latest_file, find_profile_dir, LatestFileOptions};
use crate::config::LocatorConfig;
use crate::error::DiscoveryError;
use crate::fs::{FileSystem, RealFileSystem};
use crate::validation::{validate_url, BookmarkUrl, UrlError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Where to look for a browser's bookmark data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileQuery {
    /// Directory holding the profiles. Relative paths are resolved against the home directory.
    pub root: PathBuf,
    /// Case-insensitive suffix identifying the profile directory.
    pub profile_suffix: String,
    /// Subdirectory of the profile to select the latest file from.
    pub data_dir: Option<PathBuf>,
}

impl ProfileQuery {
    pub fn new(root: impl Into<PathBuf>, profile_suffix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            profile_suffix: profile_suffix.into(),
            data_dir: None,
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    /// Firefox's rolling bookmark backups of the default release profile.
    pub fn firefox_bookmark_backups() -> Self {
        Self::new(".mozilla/firefox", ".default-release").with_data_dir("bookmarkbackups")
    }
}

pub struct BookmarkLocator {
    fs: Arc<dyn FileSystem>,
    config: LocatorConfig,
}

impl BookmarkLocator {
    pub fn new(fs: Arc<dyn FileSystem>, config: LocatorConfig) -> Self {
        Self { fs, config }
    }

    pub fn with_real_fs(config: LocatorConfig) -> Self {
        Self::new(Arc::new(RealFileSystem::new()), config)
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    pub fn home_dir(&self) -> Result<PathBuf, DiscoveryError> {
        self.fs.home_dir().map_err(DiscoveryError::HomeDir)
    }

    pub fn find_profile_dir(&self, parent: &Path, suffix: &str) -> Result<String, DiscoveryError> {
        find_profile_dir(&*self.fs, parent, suffix)
    }

    pub fn find_latest_file(&self, dir: &Path) -> Result<PathBuf, DiscoveryError> {
        find_latest_file(&*self.fs, dir, LatestFileOptions::from(&self.config))
    }

    pub fn check_readable(&self, path: &Path) -> Result<(), DiscoveryError> {
        check_readable(&*self.fs, path)
    }

    pub fn validate_url(&self, raw: &str) -> Result<BookmarkUrl, UrlError> {
        validate_url(raw)
    }

    /// Runs the full discovery pipeline and returns the path of a readable data file.
    pub fn locate(&self, query: &ProfileQuery) -> Result<PathBuf, DiscoveryError> {
        let root = if query.root.is_absolute() {
            query.root.clone()
        } else {
            self.home_dir()?.join(&query.root)
        };
        debug!(root = %root.display(), suffix = %query.profile_suffix, "locating profile");

        let profile = self.find_profile_dir(&root, &query.profile_suffix)?;
        let mut data_dir = root.join(&profile);
        if let Some(sub) = &query.data_dir {
            data_dir.push(sub);
        }

        let latest = self.find_latest_file(&data_dir)?;
        self.check_readable(&latest)?;

        info!(profile = %profile, file = %latest.display(), "located bookmark file");
        Ok(latest)
    }
}
