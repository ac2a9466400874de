use std::net::IpAddr;
use thiserror::Error;
use url::Url;

/// Errors produced when a URL fails validation.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The URL string could not be parsed at all.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL points at a private/internal IP address.
    #[error("Private IP address not allowed: {0}")]
    PrivateIp(String),
    /// The URL points at localhost.
    #[error("Localhost not allowed")]
    Localhost,
}

/// Validates a URL for use as a feed source or a browser-open target.
///
/// Only `http`/`https` are accepted, and hosts that are syntactically
/// loopback, link-local, or private-range addresses are rejected. Feed source
/// URLs are handed to the remote conversion service verbatim, so this keeps
/// the catalog from asking the proxy to probe internal hosts.
///
/// # Examples
///
/// ```
/// use headliner::util::validate_url;
///
/// assert!(validate_url("https://example.com/feed").is_ok());
/// assert!(validate_url("file:///etc/passwd").is_err());
/// assert!(validate_url("http://127.0.0.1/feed").is_err());
/// ```
pub fn validate_url(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str)?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    if let Some(host) = url.host_str() {
        if host == "localhost" {
            return Err(UrlValidationError::Localhost);
        }

        // IPv6 hosts arrive bracketed; strip before parsing
        let host_for_parse = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(host);

        if let Ok(ip) = host_for_parse.parse::<IpAddr>() {
            if ip.is_loopback() {
                return Err(UrlValidationError::Localhost);
            }
            if is_private_ip(&ip) {
                return Err(UrlValidationError::PrivateIp(ip.to_string()));
            }
        }
    }

    Ok(url)
}

fn is_private_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_private() || v4.is_loopback() || v4.is_link_local() || v4.is_unspecified()
        }
        IpAddr::V6(v6) => {
            if v6.is_loopback() || v6.is_unspecified() {
                return true;
            }
            let segments = v6.segments();
            // fc00::/7 unique local, fe80::/10 link local
            (segments[0] & 0xfe00) == 0xfc00 || (segments[0] & 0xffc0) == 0xfe80
        }
    }
}
