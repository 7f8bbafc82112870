use crate::fs::PermissionBits;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Broad category of a failure, for callers deciding how to report or retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No matching directory, or nothing to select in a directory
    NotFound,
    /// Read permission bits are all clear
    Permission,
    /// An underlying list, stat or open call failed
    Access,
    /// Malformed or hostless URL
    Validation,
}

/// Errors from profile discovery and access checks.
///
/// Variants that describe a single file carry its base name only.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to read directory {}: {source}", .path.display())]
    ListDir { path: PathBuf, source: io::Error },

    #[error("not found a directory of suffix ({suffix}) in {} directory", .parent.display())]
    NoMatchingDir { parent: PathBuf, suffix: String },

    #[error("no files in the directory {}", .0.display())]
    EmptyDirectory(PathBuf),

    #[error("no visible regular files in the directory {}", .0.display())]
    NoQualifyingFiles(PathBuf),

    #[error("failed to read metadata of {name}: {source}")]
    EntryMetadata { name: String, source: io::Error },

    #[error("unable to stat {name}: {source}")]
    Stat { name: String, source: io::Error },

    #[error("{name} does not have read permission({permissions})")]
    NoReadPermission {
        name: String,
        permissions: PermissionBits,
    },

    #[error("unable to open {name}: {source}")]
    Open { name: String, source: io::Error },

    #[error("failed to resolve home directory: {0}")]
    HomeDir(#[source] io::Error),
}

impl DiscoveryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DiscoveryError::NoMatchingDir { .. }
            | DiscoveryError::EmptyDirectory(_)
            | DiscoveryError::NoQualifyingFiles(_) => ErrorKind::NotFound,
            DiscoveryError::NoReadPermission { .. } => ErrorKind::Permission,
            DiscoveryError::ListDir { .. }
            | DiscoveryError::EntryMetadata { .. }
            | DiscoveryError::Stat { .. }
            | DiscoveryError::Open { .. }
            | DiscoveryError::HomeDir(_) => ErrorKind::Access,
        }
    }
}
