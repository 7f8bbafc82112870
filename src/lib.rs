//! bookmark-locator - find and vet browser bookmark data files
//!
//! Low-level helpers for a bookmark exporter: given a browser's profile tree,
//! locate the profile directory by name suffix, pick its most recently
//! modified data file, confirm that file can really be read, and check
//! bookmark URLs before they are used.
//!
//! # Core Concepts
//!
//! - **FileSystem**: every operation goes through the [`FileSystem`] trait, so
//!   tests can swap the real disk for [`MockFileSystem`]
//! - **Profile directory**: a per-account subdirectory identified by a suffix
//!   such as `.default-release`, matched case-insensitively
//! - **Read-capability check**: permission-bit check followed by an actual
//!   open/close of the file
//!
//! # Example Usage
//!
//! ```no_run
//! use bookmark_locator::{find_latest_file, find_profile_dir, check_readable, LatestFileOptions, RealFileSystem};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fs = RealFileSystem::new();
//! let root = Path::new("/home/alice/.mozilla/firefox");
//!
//! let profile = find_profile_dir(&fs, root, ".default-release")?;
//! let latest = find_latest_file(&fs, &root.join(profile).join("bookmarkbackups"), LatestFileOptions::default())?;
//! check_readable(&fs, &latest)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod fs;
pub mod util;
pub mod validation;

pub use config::{ConfigError, LatestFilePolicy, LocatorConfig};
pub use discovery::{
    check_readable, find_latest_file, find_profile_dir, BookmarkLocator, LatestFileOptions,
    ProfileQuery,
};
pub use error::{DiscoveryError, ErrorKind};
pub use fs::{FileSystem, MockFileSystem, PermissionBits, RealFileSystem};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};
pub use validation::{validate_url, BookmarkUrl, UrlError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
