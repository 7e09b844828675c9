//! Geocoding API error types.

/// Errors that can occur when interacting with the Geocoding API.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// HTTP succeeded but the geocoder reported a failure status
    #[error("geocoder status {status}: {message}")]
    Status { status: String, message: String },
}
