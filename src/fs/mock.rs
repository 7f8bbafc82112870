use super::{DirEntry, FileMetadata, FileSystem, FileType, PermissionBits};
use std::collections::HashMap;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::SystemTime;

const DEFAULT_FILE_MODE: u32 = 0o644;
const DEFAULT_DIR_MODE: u32 = 0o755;
const DEFAULT_SYMLINK_MODE: u32 = 0o777;
const MAX_SYMLINK_HOPS: usize = 40;

#[derive(Debug, Clone)]
pub struct MockEntry {
    pub content: Option<Vec<u8>>,
    pub file_type: FileType,
    pub modified: SystemTime,
    pub permissions: PermissionBits,
    pub deny_open: bool,
    /// Link target, for `FileType::Symlink` entries
    pub target: Option<PathBuf>,
}

impl MockEntry {
    fn file(content: &[u8]) -> Self {
        Self {
            content: Some(content.to_vec()),
            file_type: FileType::File,
            modified: SystemTime::UNIX_EPOCH,
            permissions: PermissionBits::from_mode(DEFAULT_FILE_MODE),
            deny_open: false,
            target: None,
        }
    }

    fn dir() -> Self {
        Self {
            content: None,
            file_type: FileType::Directory,
            modified: SystemTime::UNIX_EPOCH,
            permissions: PermissionBits::from_mode(DEFAULT_DIR_MODE),
            deny_open: false,
            target: None,
        }
    }

    fn symlink(target: PathBuf) -> Self {
        Self {
            content: None,
            file_type: FileType::Symlink,
            modified: SystemTime::UNIX_EPOCH,
            permissions: PermissionBits::from_mode(DEFAULT_SYMLINK_MODE),
            deny_open: false,
            target: Some(target),
        }
    }
}

/// In-memory file system. Relative paths resolve against the root (`/mock` by default).
///
/// Every entry starts with a modification time of the Unix epoch and mode `0644`
/// (files) or `0755` (directories). Handles returned by `open_read` are counted
/// until dropped, see [`MockFileSystem::open_handles`].
pub struct MockFileSystem {
    files: RwLock<HashMap<PathBuf, MockEntry>>,
    root: PathBuf,
    home: RwLock<Option<PathBuf>>,
    open_handles: Arc<AtomicUsize>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            root,
            home: RwLock::new(None),
            open_handles: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.write_files();

        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut files, parent);
        }

        files.insert(path, MockEntry::file(content.as_bytes()));
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.write_files();

        Self::ensure_parents(&mut files, &path);
        files.insert(path, MockEntry::dir());
    }

    /// Adds a symbolic link. The target need not exist; relative targets
    /// resolve against the link's directory.
    pub fn add_symlink(&self, path: impl AsRef<Path>, target: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.write_files();

        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut files, parent);
        }

        files.insert(path, MockEntry::symlink(target.as_ref().to_path_buf()));
    }

    /// No-op if the path is unknown.
    pub fn set_modified(&self, path: impl AsRef<Path>, modified: SystemTime) {
        self.update(path.as_ref(), |entry| entry.modified = modified);
    }

    /// No-op if the path is unknown.
    pub fn set_permissions(&self, path: impl AsRef<Path>, permissions: PermissionBits) {
        self.update(path.as_ref(), |entry| entry.permissions = permissions);
    }

    /// Make `open_read` fail with `PermissionDenied` regardless of the permission bits.
    pub fn deny_open(&self, path: impl AsRef<Path>) {
        self.update(path.as_ref(), |entry| entry.deny_open = true);
    }

    pub fn set_home(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        self.add_dir(&path);
        *self.home.write().unwrap_or_else(PoisonError::into_inner) = Some(path);
    }

    /// Number of handles from `open_read` that have not been dropped yet.
    pub fn open_handles(&self) -> usize {
        self.open_handles.load(Ordering::SeqCst)
    }

    fn update(&self, path: &Path, apply: impl FnOnce(&mut MockEntry)) {
        let path = self.normalize_path(path);
        if let Some(entry) = self.write_files().get_mut(&path) {
            apply(entry);
        }
    }

    fn read_files(&self) -> RwLockReadGuard<'_, HashMap<PathBuf, MockEntry>> {
        self.files.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_files(&self) -> RwLockWriteGuard<'_, HashMap<PathBuf, MockEntry>> {
        self.files.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Follows symlinks from `path` to the entry they finally name.
    fn resolve<'a>(
        files: &'a HashMap<PathBuf, MockEntry>,
        path: &Path,
    ) -> io::Result<&'a MockEntry> {
        let mut current = path.to_path_buf();
        for _ in 0..MAX_SYMLINK_HOPS {
            let entry = files.get(&current).ok_or_else(not_found)?;
            match (&entry.file_type, &entry.target) {
                (FileType::Symlink, Some(target)) => {
                    current = match current.parent() {
                        Some(parent) => parent.join(target),
                        None => target.clone(),
                    };
                }
                _ => return Ok(entry),
            }
        }
        Err(io::Error::new(
            io::ErrorKind::Other,
            "too many levels of symbolic links",
        ))
    }

    fn ensure_parents(files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            files
                .entry(current.clone())
                .or_insert_with(MockEntry::dir);
        }
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

// Like the OS, errors do not repeat the path; callers add their own context.
fn not_found() -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, "no such file or directory")
}

fn to_file_metadata(entry: &MockEntry) -> FileMetadata {
    FileMetadata {
        size: entry.content.as_ref().map(|c| c.len() as u64).unwrap_or(0),
        file_type: entry.file_type,
        modified: entry.modified,
        permissions: entry.permissions,
    }
}

struct MockHandle {
    data: Cursor<Vec<u8>>,
    open_handles: Arc<AtomicUsize>,
}

impl Read for MockHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.data.read(buf)
    }
}

impl Drop for MockHandle {
    fn drop(&mut self) {
        self.open_handles.fetch_sub(1, Ordering::SeqCst);
    }
}

impl FileSystem for MockFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let path = self.normalize_path(path);
        let files = self.read_files();

        match files.get(&path) {
            None => return Err(not_found()),
            Some(entry) if entry.file_type != FileType::Directory => {
                return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a directory"));
            }
            Some(_) => {}
        }

        let mut entries: Vec<DirEntry> = files
            .iter()
            .filter(|(file_path, _)| file_path.parent() == Some(path.as_path()))
            .map(|(file_path, entry)| DirEntry {
                path: file_path.clone(),
                name: file_path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
                file_type: entry.file_type,
            })
            .collect();

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn metadata(&self, path: &Path) -> io::Result<FileMetadata> {
        let path = self.normalize_path(path);
        let files = self.read_files();
        Ok(to_file_metadata(Self::resolve(&files, &path)?))
    }

    fn symlink_metadata(&self, path: &Path) -> io::Result<FileMetadata> {
        let path = self.normalize_path(path);
        let files = self.read_files();
        Ok(to_file_metadata(files.get(&path).ok_or_else(not_found)?))
    }

    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        let path = self.normalize_path(path);
        let files = self.read_files();
        let entry = Self::resolve(&files, &path)?;

        if entry.deny_open {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"));
        }

        self.open_handles.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockHandle {
            data: Cursor::new(entry.content.clone().unwrap_or_default()),
            open_handles: Arc::clone(&self.open_handles),
        }))
    }

    fn home_dir(&self) -> io::Result<PathBuf> {
        self.home
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "home directory not set"))
    }
}
