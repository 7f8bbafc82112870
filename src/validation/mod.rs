pub mod url;

pub use self::url::{validate_url, BookmarkUrl, UrlError};
