use reqwest::header::HeaderValue;
use std::time::Duration;

use crate::error::ValidationError;

/// Connection options for a Rooftop site.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Site URL, e.g. `https://example.rooftopcms.io`.
    ///
    /// Accepted forms:
    /// - `https://host` / `http://host`: used as-is
    /// - `//host`: protocol-relative, becomes `https://host`
    /// - `host`: no scheme, becomes `https://host`
    pub url: Option<String>,
    /// API token sent with every request.
    pub api_token: Option<String>,
    /// Per-request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
    /// Whether to verify TLS certificates.
    pub verify: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_token: None,
            timeout: None,
            verify: true,
        }
    }
}

impl ClientConfig {
    pub fn new(url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            api_token: Some(api_token.into()),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }
}

/// A [`ClientConfig`] that passed [`validate`], with its URL normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    pub base_url: String,
    pub api_token: String,
    pub timeout: Option<Duration>,
    pub verify: bool,
}

/// Checks the required fields and normalizes the URL scheme.
///
/// `url` is checked before `api_token`, so a config missing both reports the URL.
pub fn validate(config: &ClientConfig) -> Result<ValidatedConfig, ValidationError> {
    let url = non_empty(config.url.as_deref()).ok_or(ValidationError::MissingUrl)?;
    let api_token =
        non_empty(config.api_token.as_deref()).ok_or(ValidationError::MissingApiToken)?;

    if HeaderValue::from_str(api_token).is_err() {
        return Err(ValidationError::InvalidApiToken);
    }

    Ok(ValidatedConfig {
        base_url: normalize_url(url),
        api_token: api_token.to_string(),
        timeout: config.timeout,
        verify: config.verify,
    })
}

/// Applies the scheme rules documented on [`ClientConfig::url`] and drops a
/// trailing `/`.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    let normalized = if let Some(rest) = url.strip_prefix("//") {
        format!("https://{}", rest)
    } else if has_http_scheme(url) {
        url.to_string()
    } else {
        format!("https://{}", url)
    };

    match normalized.strip_suffix('/') {
        Some(stripped) if !stripped.ends_with(':') && !stripped.ends_with('/') => {
            stripped.to_string()
        }
        _ => normalized,
    }
}

fn has_http_scheme(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
