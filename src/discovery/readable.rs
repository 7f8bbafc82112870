use crate::error::DiscoveryError;
use crate::fs::FileSystem;
use std::path::Path;
use tracing::trace;

/// Confirms that `path` can actually be read.
///
/// The permission bits are checked first for a precise diagnostic, then the
/// file is opened and the handle dropped straight away; permissive bits alone
/// do not guarantee that an open succeeds. Errors name the file by its base
/// name only.
pub fn check_readable<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<(), DiscoveryError> {
    let name = base_name(path);

    let meta = fs.metadata(path).map_err(|source| DiscoveryError::Stat {
        name: name.clone(),
        source,
    })?;

    if !meta.permissions.is_readable() {
        return Err(DiscoveryError::NoReadPermission {
            name,
            permissions: meta.permissions,
        });
    }

    let handle = fs.open_read(path).map_err(|source| DiscoveryError::Open {
        name: name.clone(),
        source,
    })?;
    drop(handle);

    trace!(file = %name, permissions = %meta.permissions, "file is readable");
    Ok(())
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
