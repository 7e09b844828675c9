//! Mobility Labs API response DTOs.
//!
//! Every Mobility Labs endpoint wraps its payload in the same envelope:
//!
//! ```json
//! {"code": "00", "description": "...", "datetime": "...", "data": [...]}
//! ```
//!
//! Station records are kept as raw JSON here; the normalizer in
//! `convert` decides which vendor fields are required.

use serde::Deserialize;
use serde_json::Value;

/// Codes Mobility Labs uses for a successful response.
///
/// `"00"` is a plain success, `"01"` is what login returns on success.
const SUCCESS_CODES: [&str; 2] = ["00", "01"];

/// Common response wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct MobilityLabsResponse {
    /// Result code. See [`MobilityLabsResponse::is_success`].
    pub code: String,

    /// Human-readable description of the result.
    #[serde(default)]
    pub description: Option<String>,

    /// Endpoint-specific payload.
    #[serde(default)]
    pub data: Value,
}

impl MobilityLabsResponse {
    pub fn is_success(&self) -> bool {
        SUCCESS_CODES.contains(&self.code.as_str())
    }
}

/// One entry of the login response `data` array.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub access_token: String,
}
