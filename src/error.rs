use reqwest::StatusCode;
use std::fmt;
use url::Url;

/// Raised synchronously while constructing a client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("url is required")]
    MissingUrl,
    #[error("apiToken is required")]
    MissingApiToken,
    #[error("apiToken contains characters that cannot be sent in an HTTP header")]
    InvalidApiToken,
}

/// Status portion of a [`ResponseError`].
///
/// `code` is `None` when no HTTP response was received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Status {
    pub code: Option<u16>,
}

/// A failed `get`: either the server answered with a non-success status, or
/// the request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseError {
    pub status: Status,
    pub error: String,
    /// The fully constructed request URL, including the query string.
    pub url: String,
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status.code {
            Some(code) => write!(
                f,
                "API request failed: HTTP {} for url ({}): {}",
                code, self.url, self.error
            ),
            None => write!(f, "API request failed for url ({}): {}", self.url, self.error),
        }
    }
}

impl std::error::Error for ResponseError {}

impl ResponseError {
    pub fn is_transport(&self) -> bool {
        self.status.code.is_none()
    }

    pub fn is_status(&self, code: u16) -> bool {
        self.status.code == Some(code)
    }

    /// The reqwest error chain followed by the target `(host:port)`.
    pub(crate) fn transport(err: &reqwest::Error, url: &Url) -> Self {
        Self {
            status: Status::default(),
            error: with_target(error_chain(err), url),
            url: url.to_string(),
        }
    }

    pub(crate) fn invalid_url(reason: impl fmt::Display, url: &str) -> Self {
        Self {
            status: Status::default(),
            error: format!("invalid request URL: {}", reason),
            url: url.to_string(),
        }
    }

    pub(crate) fn undecodable(status: StatusCode, err: &serde_json::Error, url: &str) -> Self {
        Self {
            status: Status {
                code: Some(status.as_u16()),
            },
            error: format!("failed to parse response JSON: {}", err),
            url: url.to_string(),
        }
    }

    /// Builds the error for a non-success response, preferring the message in
    /// a WordPress REST error body when there is one.
    pub(crate) fn from_status(status: StatusCode, url: &str, body: &str) -> Self {
        let error = match serde_json::from_str::<WpErrorResponse>(body) {
            Ok(wp) => format_wp_error(status, &wp),
            Err(_) => fallback_message(status),
        };

        Self {
            status: Status {
                code: Some(status.as_u16()),
            },
            error,
            url: url.to_string(),
        }
    }
}

/// Anything the client can fail with, for callers that want a single `?` type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to build HTTP client: {0}")]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Response(#[from] ResponseError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// WordPress REST errors look like
// {"code":"rest_no_route","message":"No route was found ...","data":{"status":404}}
#[derive(Debug, serde::Deserialize)]
struct WpErrorResponse {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<WpErrorData>,
}

#[derive(Debug, serde::Deserialize)]
struct WpErrorData {
    #[serde(default)]
    status: Option<u16>,
}

fn format_wp_error(status: StatusCode, e: &WpErrorResponse) -> String {
    let message = e.message.as_deref().map(str::trim).unwrap_or("");
    let code = e.code.as_deref().unwrap_or("");

    if message.is_empty() {
        let fallback = fallback_message(status);
        return if code.is_empty() {
            fallback
        } else {
            format!("{} ({})", fallback, code)
        };
    }

    let mut notes = Vec::new();
    if !code.is_empty() {
        notes.push(code.to_string());
    }
    if let Some(s) = e.data.as_ref().and_then(|d| d.status) {
        if s != status.as_u16() {
            notes.push(format!("reported status {}", s));
        }
    }

    if notes.is_empty() {
        message.to_string()
    } else {
        format!("{} ({})", message, notes.join(", "))
    }
}

fn fallback_message(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("HTTP {} {}", status.as_u16(), reason),
        None => format!("HTTP {}", status.as_u16()),
    }
}

fn with_target(error: String, url: &Url) -> String {
    let Some(host) = url.host_str() else {
        return error;
    };
    match url.port_or_known_default() {
        Some(port) => format!("{} ({}:{})", error, host, port),
        None => format!("{} ({})", error, host),
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(e) = source {
        let msg = e.to_string();
        if !out.contains(&msg) {
            out.push_str(": ");
            out.push_str(&msg);
        }
        source = e.source();
    }
    out
}
