use super::{DirEntry, FileMetadata, FileSystem, FileType, PermissionBits};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
fn permission_bits(meta: &fs::Metadata) -> PermissionBits {
    use std::os::unix::fs::PermissionsExt;
    PermissionBits::from_mode(meta.permissions().mode())
}

#[cfg(not(unix))]
fn permission_bits(meta: &fs::Metadata) -> PermissionBits {
    if meta.permissions().readonly() {
        PermissionBits::from_mode(0o444)
    } else {
        PermissionBits::from_mode(0o666)
    }
}

fn file_type_of(file_type: fs::FileType) -> FileType {
    if file_type.is_symlink() {
        FileType::Symlink
    } else if file_type.is_dir() {
        FileType::Directory
    } else if file_type.is_file() {
        FileType::File
    } else {
        FileType::Other
    }
}

fn to_file_metadata(meta: &fs::Metadata) -> io::Result<FileMetadata> {
    Ok(FileMetadata {
        size: meta.len(),
        file_type: file_type_of(meta.file_type()),
        modified: meta.modified()?,
        permissions: permission_bits(meta),
    })
}

impl FileSystem for RealFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut result = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            // Classify the entry itself; links are not followed.
            let file_type = file_type_of(entry.file_type()?);

            result.push(DirEntry {
                path,
                name,
                file_type,
            });
        }

        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    fn metadata(&self, path: &Path) -> io::Result<FileMetadata> {
        to_file_metadata(&fs::metadata(path)?)
    }

    fn symlink_metadata(&self, path: &Path) -> io::Result<FileMetadata> {
        to_file_metadata(&fs::symlink_metadata(path)?)
    }

    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        let file = fs::File::open(path)?;
        Ok(Box::new(file))
    }

    fn home_dir(&self) -> io::Result<PathBuf> {
        dirs::home_dir().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "unable to determine the current user's home directory",
            )
        })
    }
}
