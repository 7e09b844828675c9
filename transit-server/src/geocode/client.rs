//! Google Maps Geocoding API client.

use async_trait::async_trait;

use crate::tools::Geocoder;

use super::error::GeocodeError;
use super::types::{GeocodeCandidate, GeocodeResponse};

/// Default endpoint for the Geocoding API (JSON output).
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Configuration for the geocoding client.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Endpoint URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GeocoderConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom endpoint URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the Google Maps Geocoding API.
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GoogleGeocoder {
    /// Create a new geocoding client.
    pub fn new(config: GeocoderConfig) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Geocode an address, best candidate first.
    ///
    /// `region` biases results towards a ccTLD region ("es"), `language`
    /// selects the language of returned addresses. An address with no
    /// match yields an empty list, not an error.
    pub async fn geocode(
        &self,
        address: &str,
        region: &str,
        language: &str,
    ) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        tracing::debug!(address, region, language, "geocoding address");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("address", address),
                ("region", region),
                ("language", language),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let response: GeocodeResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: e.to_string(),
            })?;

        match response.status.as_str() {
            "OK" => Ok(response.results),
            "ZERO_RESULTS" => Ok(Vec::new()),
            _ => Err(GeocodeError::Status {
                message: response.error_message.unwrap_or_default(),
                status: response.status,
            }),
        }
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn geocode(
        &self,
        address: &str,
        region: &str,
        language: &str,
    ) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        GoogleGeocoder::geocode(self, address, region, language).await
    }
}
