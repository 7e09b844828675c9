//! EMT client error types.

use std::fmt;

/// Errors from the EMT Mobility Labs HTTP client.
#[derive(Debug)]
pub enum EmtError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned a non-success HTTP status code
    Api { status: u16, message: String },

    /// HTTP succeeded but the Mobility Labs envelope carried a failure code
    Upstream { code: String, description: String },

    /// The envelope reported success but carried no `data`
    MissingData,

    /// Rate limited by the API
    RateLimited,

    /// Access token rejected, or login credentials invalid
    Unauthorized,

    /// Login response did not include an access token
    MissingToken,

    /// Credentials could not be turned into request headers
    InvalidCredentials(&'static str),
}

impl fmt::Display for EmtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmtError::Http(e) => write!(f, "HTTP error: {e}"),
            EmtError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            EmtError::Api { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            EmtError::Upstream { code, description } => {
                write!(f, "EMT returned code {code}: {description}")
            }
            EmtError::MissingData => write!(f, "response contained no data"),
            EmtError::RateLimited => write!(f, "rate limited by EMT API"),
            EmtError::Unauthorized => write!(f, "unauthorized (invalid access token or credentials)"),
            EmtError::MissingToken => write!(f, "login response did not contain an access token"),
            EmtError::InvalidCredentials(what) => write!(f, "invalid credentials: {what}"),
        }
    }
}

impl std::error::Error for EmtError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EmtError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for EmtError {
    fn from(err: reqwest::Error) -> Self {
        EmtError::Http(err)
    }
}
