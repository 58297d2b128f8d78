//! Long URL validation shared by short URL defaults and redirect rule targets.

use url::Url;

/// Errors returned when a long URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LongUrlError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Validates a long URL and returns it parsed.
///
/// # Rules
///
/// 1. Must parse as an absolute URL
/// 2. Scheme must be `http` or `https`
/// 3. Must carry a non-empty host
///
/// Surrounding whitespace is ignored. The URL is not rewritten: callers store the
/// operator's input as typed once it passes validation.
///
/// # Errors
///
/// Returns [`LongUrlError::InvalidFormat`] for malformed input,
/// [`LongUrlError::UnsupportedProtocol`] for `javascript:`, `data:`, `ftp:` and
/// other non-HTTP(S) schemes, and [`LongUrlError::MissingHost`] when no host is present.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_long_url("https://example.com/m").is_ok());
/// assert!(validate_long_url("ftp://example.com").is_err());
/// ```
pub fn validate_long_url(input: &str) -> Result<Url, LongUrlError> {
    let url =
        Url::parse(input.trim()).map_err(|e| LongUrlError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(LongUrlError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(LongUrlError::MissingHost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_https() {
        let url = validate_long_url("https://example.com/m").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn test_accepts_http_with_port_and_query() {
        assert!(validate_long_url("http://localhost:3000/test?a=1").is_ok());
    }

    #[test]
    fn test_trims_whitespace() {
        assert!(validate_long_url("  https://example.com/ref  ").is_ok());
    }

    #[test]
    fn test_rejects_relative() {
        assert!(matches!(
            validate_long_url("example.com"),
            Err(LongUrlError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            validate_long_url(""),
            Err(LongUrlError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_dangerous_schemes() {
        for input in [
            "javascript:alert('xss')",
            "data:text/plain,Hello",
            "mailto:test@example.com",
            "ftp://example.com/file.txt",
            "file:///etc/passwd",
        ] {
            assert_eq!(
                validate_long_url(input).unwrap_err(),
                LongUrlError::UnsupportedProtocol,
                "{input} should be rejected"
            );
        }
    }
}
