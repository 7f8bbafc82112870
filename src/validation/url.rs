//! Bookmark URL validation

use crate::error::ErrorKind;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::{ParseError, Url};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    /// The parser rejected the input; the parser's own error is kept as is.
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("invalid control character in URL: {0:?}")]
    ControlCharacter(char),

    #[error("missing protocol scheme")]
    MissingScheme,

    #[error("first path segment in URL cannot contain colon")]
    ColonInFirstSegment,

    #[error("hostname is empty")]
    EmptyHost,
}

impl UrlError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

/// A parsed URL whose host is known to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookmarkUrl(Url);

impl BookmarkUrl {
    pub fn host(&self) -> &str {
        self.0.host_str().unwrap_or_default()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_url(self) -> Url {
        self.0
    }
}

impl fmt::Display for BookmarkUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for BookmarkUrl {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_url(s)
    }
}

impl AsRef<Url> for BookmarkUrl {
    fn as_ref(&self) -> &Url {
        &self.0
    }
}

/// Parses `raw` and requires a non-empty host.
///
/// Control characters anywhere in the input are a parse failure. Relative
/// references such as `/just/a/path` or `file.html` carry no host and fail
/// with [`UrlError::EmptyHost`], as do scheme-only URLs like `mailto:` links
/// and an empty authority like `http://`. A reference that cannot be read as
/// relative either (`://example.com`, `1abc:def/x`) is a parse failure.
pub fn validate_url(raw: &str) -> Result<BookmarkUrl, UrlError> {
    if let Some(c) = raw.chars().find(char::is_ascii_control) {
        return Err(UrlError::ControlCharacter(c));
    }

    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(ParseError::RelativeUrlWithoutBase) => return Err(relative_reference_error(raw)),
        Err(ParseError::EmptyHost) => return Err(UrlError::EmptyHost),
        Err(e) => return Err(UrlError::Parse(e)),
    };

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(BookmarkUrl(url)),
        _ => Err(UrlError::EmptyHost),
    }
}

/// Classifies input without a scheme. Only the part before any query or
/// fragment is considered.
fn relative_reference_error(raw: &str) -> UrlError {
    let reference = raw.split(['?', '#']).next().unwrap_or_default();

    if reference.starts_with(':') {
        return UrlError::MissingScheme;
    }

    if !reference.starts_with('/') {
        let first_segment = reference.split('/').next().unwrap_or_default();
        if first_segment.contains(':') {
            return UrlError::ColonInFirstSegment;
        }
    }

    UrlError::EmptyHost
}
