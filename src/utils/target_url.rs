//! Target URL validation.
//!
//! Targets are stored exactly as submitted (after trimming surrounding
//! whitespace); they are parsed only to check that they are absolute
//! `http`/`https` URLs.

use url::Url;

/// Reasons a target URL is rejected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TargetUrlError {
    #[error("Target URL is empty")]
    Empty,

    #[error("Target URL contains control characters")]
    ControlCharacters,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Validates a target URL and returns the string to store.
///
/// # Errors
///
/// Returns a [`TargetUrlError`] if the trimmed input is empty, contains
/// control characters, does not parse as an absolute URL, or uses a scheme
/// other than `http`/`https`. Length is not limited.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(validate_target("  https://example.com/page ").unwrap(), "https://example.com/page");
/// assert!(validate_target("ftp://example.com").is_err());
/// ```
pub fn validate_target(input: &str) -> Result<String, TargetUrlError> {
    let target = input.trim();

    if target.is_empty() {
        return Err(TargetUrlError::Empty);
    }

    // These would be stripped by the parser but break the Location header.
    if target.chars().any(char::is_control) {
        return Err(TargetUrlError::ControlCharacters);
    }

    let url = Url::parse(target).map_err(|e| TargetUrlError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(target.to_string()),
        _ => Err(TargetUrlError::UnsupportedProtocol),
    }
}

/// Encodes a stored target for use as a `Location` header value.
///
/// Non-ASCII characters and ASCII characters that are not allowed in a URL
/// are percent-encoded as UTF-8. Everything else, including existing `%XX`
/// escapes, is kept.
pub fn encode_location(target: &str) -> String {
    let mut encoded = String::with_capacity(target.len());
    let mut buf = [0u8; 4];

    for c in target.chars() {
        if c.is_ascii() && !matches!(c, ' ' | '"' | '<' | '>' | '\\' | '^' | '`' | '{' | '}') {
            encoded.push(c);
        } else {
            encoded.push_str(&urlencoding::encode(c.encode_utf8(&mut buf)));
        }
    }

    encoded
}
