//! Host extraction from HTTP request headers.

use axum::http::{HeaderMap, header};

/// Returns the request host without its port.
///
/// Handles hostnames, IPv4 addresses and bracketed IPv6 addresses. A missing
/// or non UTF-8 `Host` header yields `None`, which callers treat as the
/// default domain.
pub fn request_host(headers: &HeaderMap) -> Option<String> {
    let host = headers.get(header::HOST)?.to_str().ok()?.trim();
    if host.is_empty() {
        return None;
    }

    let host = if host.starts_with('[') {
        match host.find(']') {
            Some(end_bracket) => &host[..=end_bracket],
            None => host,
        }
    } else {
        host.split(':').next().unwrap_or(host)
    };

    Some(host.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_host(host: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static(host));
        headers
    }

    #[test]
    fn test_host_without_port() {
        assert_eq!(
            request_host(&headers_with_host("s.example.com")),
            Some("s.example.com".to_string())
        );
    }

    #[test]
    fn test_port_is_stripped() {
        assert_eq!(
            request_host(&headers_with_host("localhost:8080")),
            Some("localhost".to_string())
        );
        assert_eq!(
            request_host(&headers_with_host("192.168.1.1:9000")),
            Some("192.168.1.1".to_string())
        );
    }

    #[test]
    fn test_ipv6_host() {
        assert_eq!(
            request_host(&headers_with_host("[::1]:8080")),
            Some("[::1]".to_string())
        );
    }

    #[test]
    fn test_missing_host() {
        assert_eq!(request_host(&HeaderMap::new()), None);
    }

    #[test]
    fn test_invalid_utf8_host() {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_bytes(&[0xFF, 0xFE]) {
            headers.insert(header::HOST, value);
            assert_eq!(request_host(&headers), None);
        }
    }
}
