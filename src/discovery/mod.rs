//! Profile directory search, latest-file selection and read probing
//!
//! Each operation is a stateless function over a [`FileSystem`](crate::fs::FileSystem);
//! [`BookmarkLocator`] chains them into the full discovery pipeline.

mod latest_file;
mod locator;
mod profile_dir;
mod readable;

pub use latest_file::{find_latest_file, LatestFileOptions};
pub use locator::{BookmarkLocator, ProfileQuery};
pub use profile_dir::find_profile_dir;
pub use readable::check_readable;
