use reqwest::Url;
use std::net::IpAddr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlValidationError {
    #[error("please enter a URL")]
    Empty,
    #[error("'{0}' is not a valid article URL (e.g. https://example.com/article)")]
    Malformed(String),
    #[error("the URL must include a full host name (e.g. example.com)")]
    InvalidHost,
}

/// Cleans up a user-supplied article URL before it is forwarded upstream.
///
/// Anything without an explicit `http(s)://` prefix gets `https://`
/// prepended, so non-http schemes read as malformed rather than special.
/// The host must be a dotted domain, `localhost`, or an IP address; bare
/// single-label hosts are rejected the same way the dashboard form always
/// has.
pub fn normalize_article_url(raw: &str) -> Result<String, UrlValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let parsed =
        Url::parse(&candidate).map_err(|_| UrlValidationError::Malformed(trimmed.to_string()))?;

    let host = parsed.host_str().ok_or(UrlValidationError::InvalidHost)?;
    let bare = host.trim_start_matches('[').trim_end_matches(']');
    let acceptable = host.eq_ignore_ascii_case("localhost")
        || bare.parse::<IpAddr>().is_ok()
        || host.split('.').filter(|label| !label.is_empty()).count() >= 2;
    if !acceptable {
        return Err(UrlValidationError::InvalidHost);
    }

    Ok(parsed.to_string())
}
