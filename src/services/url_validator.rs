//! URL validation and hostname derivation for the input list.

use url::Url;

use crate::types::errors::UrlError;

/// Parses a candidate line into an absolute URL.
///
/// A candidate is accepted iff it parses and carries an authority (host);
/// scheme-only values like `mailto:` are rejected.
pub fn parse(candidate: &str) -> Result<Url, UrlError> {
    let parsed = Url::parse(candidate).map_err(|_| UrlError::Invalid(candidate.to_string()))?;
    if !parsed.has_host() {
        return Err(UrlError::Invalid(candidate.to_string()));
    }
    Ok(parsed)
}

/// Whether a candidate is a well-formed absolute URL.
pub fn is_valid(candidate: &str) -> bool {
    parse(candidate).is_ok()
}

/// The URL's hostname.
pub fn hostname(url: &Url) -> String {
    url.host_str().unwrap_or_default().to_string()
}

/// The hostname with a leading "www." stripped.
pub fn domain(url: &Url) -> String {
    let host = hostname(url);
    match host.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    }
}
