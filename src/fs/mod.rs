//! FileSystem abstraction for testable file operations

mod mock;
mod permissions;
mod real;
mod r#trait;

pub use mock::{MockEntry, MockFileSystem};
pub use permissions::PermissionBits;
pub use r#trait::{DirEntry, FileMetadata, FileSystem, FileType};
pub use real::RealFileSystem;
