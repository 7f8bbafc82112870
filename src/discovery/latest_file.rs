use crate::config::{LatestFilePolicy, LocatorConfig};
use crate::error::DiscoveryError;
use crate::fs::{DirEntry, FileSystem};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, trace};

/// Selection rules for [`find_latest_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatestFileOptions {
    /// Entries whose name starts with this character are skipped.
    pub hidden_prefix: char,
    pub policy: LatestFilePolicy,
}

impl Default for LatestFileOptions {
    fn default() -> Self {
        Self {
            hidden_prefix: '.',
            policy: LatestFilePolicy::Strict,
        }
    }
}

impl From<&LocatorConfig> for LatestFileOptions {
    fn from(config: &LocatorConfig) -> Self {
        Self {
            hidden_prefix: config.hidden_prefix,
            policy: config.latest_file_policy,
        }
    }
}

/// Returns the full path of the most recently modified visible, non-directory
/// entry of `dir`.
///
/// Entries are compared in listing order and a candidate replaces the current
/// best when it is at least as new, so among equal timestamps the entry listed
/// last wins. Symlinks are judged by their own mtime and are never followed, so
/// a dangling link does not fail the scan.
pub fn find_latest_file<F: FileSystem + ?Sized>(
    fs: &F,
    dir: &Path,
    options: LatestFileOptions,
) -> Result<PathBuf, DiscoveryError> {
    let entries = fs.read_dir(dir).map_err(|source| DiscoveryError::ListDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let Some(first) = entries.first() else {
        return Err(DiscoveryError::EmptyDirectory(dir.to_path_buf()));
    };

    let mut best = match options.policy {
        LatestFilePolicy::Compatible => Some((0, modified_time(fs, first)?)),
        LatestFilePolicy::Strict => None,
    };

    for (index, entry) in entries.iter().enumerate() {
        if entry.is_dir() || entry.is_hidden(options.hidden_prefix) {
            trace!(entry = %entry.name, "skipping directory or hidden entry");
            continue;
        }

        let modified = modified_time(fs, entry)?;
        if best.map_or(true, |(_, best_modified)| modified >= best_modified) {
            best = Some((index, modified));
        }
    }

    let (index, _) = best.ok_or_else(|| DiscoveryError::NoQualifyingFiles(dir.to_path_buf()))?;
    let latest = &entries[index];
    debug!(dir = %dir.display(), latest = %latest.name, policy = %options.policy, "selected latest file");

    Ok(latest.path.clone())
}

fn modified_time<F: FileSystem + ?Sized>(
    fs: &F,
    entry: &DirEntry,
) -> Result<SystemTime, DiscoveryError> {
    fs.symlink_metadata(entry.path())
        .map(|meta| meta.modified)
        .map_err(|source| DiscoveryError::EntryMetadata {
            name: entry.name.clone(),
            source,
        })
}
