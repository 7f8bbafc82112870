//! FileSystem trait definition

use super::PermissionBits;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Metadata about a file
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub size: u64,
    pub file_type: FileType,
    pub modified: SystemTime,
    pub permissions: PermissionBits,
}

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
    Symlink,
    /// Sockets, FIFOs and device nodes
    Other,
}

impl FileMetadata {
    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }

    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }

    pub fn len(&self) -> u64 {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// A directory entry returned by read_dir
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub file_type: FileType,
}

impl DirEntry {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.name
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }

    /// True if the name starts with `marker`, e.g. `.` for dotfiles.
    pub fn is_hidden(&self, marker: char) -> bool {
        self.name.starts_with(marker)
    }
}

/// Abstraction over file system operations for testability
pub trait FileSystem: Send + Sync {
    /// List the immediate children of a directory, sorted by name
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Get file/directory metadata, following symlinks
    fn metadata(&self, path: &Path) -> io::Result<FileMetadata>;

    /// Get metadata of the entry itself. A symlink reports its own type and
    /// mtime, and succeeds even when its target is missing.
    fn symlink_metadata(&self, path: &Path) -> io::Result<FileMetadata>;

    /// Open a file for reading. The handle is closed when dropped.
    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read + Send>>;

    /// Resolve the current user's home directory
    fn home_dir(&self) -> io::Result<PathBuf>;
}
