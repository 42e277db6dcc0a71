//! Shared HTTP plumbing for the API clients.

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

/// Fixed per-request budget; there is no retry or backoff on top of it.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the client both APIs share.
pub fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(REQUEST_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
}

/// Failure surfaced from a one-shot API call.
///
/// Non-success statuses are bucketed into the categories the UI reports;
/// there is no partial-result recovery.
#[derive(Debug)]
pub enum ApiError {
    /// 401: the configured API key was rejected.
    InvalidCredentials,
    /// 429: the account is out of quota.
    QuotaExceeded,
    /// 5xx: the service itself failed.
    Upstream { status: u16, body: String },
    /// Any other non-success status.
    Http { status: u16, body: String },
    /// The request never completed (DNS, TLS, timeout, ...).
    Transport(reqwest::Error),
}

impl ApiError {
    pub fn from_status(status: reqwest::StatusCode, body: String) -> ApiError {
        match status.as_u16() {
            401 => ApiError::InvalidCredentials,
            429 => ApiError::QuotaExceeded,
            code if code >= 500 => ApiError::Upstream { status: code, body },
            code => ApiError::Http { status: code, body },
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidCredentials => {
                write!(f, "invalid API credentials (HTTP 401) - check your API key")
            }
            ApiError::QuotaExceeded => {
                write!(f, "API quota exceeded (HTTP 429) - try again later")
            }
            ApiError::Upstream { status, body } => {
                write!(f, "upstream API failure (HTTP {status}): {body}")
            }
            ApiError::Http { status, body } => {
                write!(f, "API error (HTTP {status}): {body}")
            }
            ApiError::Transport(source) => write!(f, "network error: {source}"),
        }
    }
}

impl StdError for ApiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ApiError::Transport(source) => Some(source),
            _ => None,
        }
    }
}
