//! MBTA client error types.

use std::fmt;

/// Errors from the MBTA HTTP client.
#[derive(Debug)]
pub enum MbtaError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    ApiError { status: u16, message: String },

    /// Rate limited by the API (unauthenticated clients hit this quickly)
    RateLimited,
}

impl fmt::Display for MbtaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MbtaError::Http(e) => write!(f, "HTTP error: {e}"),
            MbtaError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            MbtaError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            MbtaError::RateLimited => write!(f, "rate limited by MBTA API"),
        }
    }
}

impl std::error::Error for MbtaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MbtaError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for MbtaError {
    fn from(err: reqwest::Error) -> Self {
        MbtaError::Http(err)
    }
}
