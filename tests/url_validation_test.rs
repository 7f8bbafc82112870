use bookmark_locator::{validate_url, ErrorKind, UrlError};
use yare::parameterized;

#[parameterized(
    https_with_path = { "https://example.com/x", "example.com" },
    http_with_port = { "http://intranet.local:8080/wiki", "intranet.local" },
    ftp = { "ftp://ftp.example.org/pub/", "ftp.example.org" },
    ipv4 = { "http://192.168.1.1/admin", "192.168.1.1" },
    uppercase_host = { "HTTPS://EXAMPLE.COM", "example.com" },
)]
fn test_valid_bookmark_urls(raw: &str, host: &str) {
    let url = validate_url(raw).unwrap();
    assert_eq!(url.host(), host);
}

#[parameterized(
    absolute_path = { "/just/a/path" },
    bare_file = { "file.html" },
    mailto = { "mailto:someone@example.com" },
    local_file = { "file:///home/alice/bookmarks.html" },
    javascript = { "javascript:void(0)" },
    empty_authority = { "http://" },
)]
fn test_hostless_urls_rejected(raw: &str) {
    let err = validate_url(raw).unwrap_err();
    assert_eq!(err, UrlError::EmptyHost);
    assert_eq!(err.to_string(), "hostname is empty");
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[parameterized(
    tab = { "not a url \t" },
    newline = { "https://example.com/\nx" },
    delete = { "https://exa\u{7f}mple.com" },
)]
fn test_control_characters_fail_to_parse(raw: &str) {
    let err = validate_url(raw).unwrap_err();
    assert!(matches!(err, UrlError::ControlCharacter(_)));
}

#[parameterized(
    leading_colon = { "://example.com", UrlError::MissingScheme },
    colon_in_first_segment = { "1abc:def/x", UrlError::ColonInFirstSegment },
)]
fn test_unparseable_references_are_not_hostless(raw: &str, expected: UrlError) {
    let err = validate_url(raw).unwrap_err();
    assert_eq!(err, expected);
    assert_ne!(err, UrlError::EmptyHost);
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn test_parser_error_is_not_masked() {
    let err = validate_url("https://example.com:99999/").unwrap_err();
    assert_eq!(err, UrlError::Parse(url::ParseError::InvalidPort));
}
