//! EMT Mobility Labs HTTP client.
//!
//! Covers the two Mobility Labs product families the tools need: BiciMad
//! stations and EMT bus-network incidents. Both are served from the same
//! host and accept the same access token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use crate::domain::StationId;
use crate::tools::{BikeShareApi, BusNetworkApi};

use super::auth::AuthStrategy;
use super::error::EmtError;
use super::types::{LoginData, MobilityLabsResponse};

/// Default base URL for the Mobility Labs API.
const DEFAULT_BASE_URL: &str = "https://openapi.emtmadrid.es/v1";

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How much of an unparsable body to keep for error messages.
const BODY_SNIPPET_LEN: usize = 500;

/// Configuration for the EMT client.
#[derive(Debug, Clone)]
pub struct EmtConfig {
    /// How to obtain the access token
    pub auth: AuthStrategy,
    /// Base URL for the API (defaults to production Mobility Labs)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl EmtConfig {
    /// Create a new config with the given auth strategy.
    pub fn new(auth: AuthStrategy) -> Self {
        Self {
            auth,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
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

/// Mobility Labs API client.
///
/// Holds a resolved access token; it never logs in again after
/// construction.
#[derive(Debug, Clone)]
pub struct EmtClient {
    http: reqwest::Client,
    base_url: String,
}

impl EmtClient {
    /// Resolve the auth strategy and build a ready-to-use client.
    ///
    /// With [`AuthStrategy::LoginExchange`] this performs one login request.
    pub async fn connect(config: EmtConfig) -> Result<Self, EmtError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let token = match &config.auth {
            AuthStrategy::PreSharedToken(token) => token.clone(),
            AuthStrategy::LoginExchange { client_id, passkey } => {
                tracing::info!(client_id = %client_id, "logging in to Mobility Labs");
                login(&base_url, client_id, passkey, timeout).await?
            }
        };

        Self::with_token(&token, base_url, timeout)
    }

    /// Build a client from an already-issued access token.
    pub fn with_token(
        token: &str,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, EmtError> {
        let mut headers = HeaderMap::new();

        // Mobility Labs uses "accessToken" for authentication
        let token = HeaderValue::from_str(token)
            .map_err(|_| EmtError::InvalidCredentials("access token"))?;
        headers.insert(HeaderName::from_static("accesstoken"), token);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Raw BiciMad station records within `radius_m` meters of a point.
    pub async fn stations_around(
        &self,
        lng: f64,
        lat: f64,
        radius_m: u32,
    ) -> Result<Vec<Value>, EmtError> {
        let url = format!(
            "{}/transport/bicimad/stations/arroundxy/{}/{}/{}/",
            self.base_url, lng, lat, radius_m
        );
        into_records(self.get_data(&url).await?)
    }

    /// Raw BiciMad station records for one station id.
    ///
    /// The API answers with a list; it is empty when the id is unknown.
    pub async fn station_info(&self, id: StationId) -> Result<Vec<Value>, EmtError> {
        let url = format!("{}/transport/bicimad/stations/{}/", self.base_url, id);
        into_records(self.get_data(&url).await?)
    }

    /// Bus-network incidents for a line, or `"all"` for the whole network.
    ///
    /// The payload is returned as-is; only a null or absent `data` is an error.
    pub async fn issues(&self, category: &str) -> Result<Value, EmtError> {
        let url = format!(
            "{}/transport/busemtmad/lines/incidents/{}/",
            self.base_url, category
        );
        match self.get_data(&url).await? {
            Value::Null => Err(EmtError::MissingData),
            data => Ok(data),
        }
    }

    async fn get_data(&self, url: &str) -> Result<Value, EmtError> {
        tracing::debug!(%url, "EMT request");
        let response = self.http.get(url).send().await?;
        let body = read_body(response).await?;
        unwrap_envelope(&body)
    }
}

#[async_trait]
impl BikeShareApi for EmtClient {
    async fn stations_around(
        &self,
        lng: f64,
        lat: f64,
        radius_m: u32,
    ) -> Result<Vec<Value>, EmtError> {
        EmtClient::stations_around(self, lng, lat, radius_m).await
    }

    async fn station_info(&self, id: StationId) -> Result<Vec<Value>, EmtError> {
        EmtClient::station_info(self, id).await
    }
}

#[async_trait]
impl BusNetworkApi for EmtClient {
    async fn issues(&self, category: &str) -> Result<Value, EmtError> {
        EmtClient::issues(self, category).await
    }
}

/// Exchange a client id and passkey for an access token.
async fn login(
    base_url: &str,
    client_id: &str,
    passkey: &str,
    timeout: Duration,
) -> Result<String, EmtError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("x-clientid"),
        HeaderValue::from_str(client_id).map_err(|_| EmtError::InvalidCredentials("client id"))?,
    );
    headers.insert(
        HeaderName::from_static("passkey"),
        HeaderValue::from_str(passkey).map_err(|_| EmtError::InvalidCredentials("passkey"))?,
    );

    let http = reqwest::Client::builder().timeout(timeout).build()?;
    let url = format!("{base_url}/mobilitylabs/user/login/");

    let response = http.get(&url).headers(headers).send().await?;
    let body = read_body(response).await?;
    let data = unwrap_envelope(&body)?;

    let logins: Vec<LoginData> = serde_json::from_value(data).map_err(|e| EmtError::Json {
        message: e.to_string(),
        body: Some(snippet(&body)),
    })?;

    logins
        .into_iter()
        .next()
        .map(|l| l.access_token)
        .ok_or(EmtError::MissingToken)
}

/// Map HTTP status to errors and return the body text.
async fn read_body(response: reqwest::Response) -> Result<String, EmtError> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(EmtError::Unauthorized);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(EmtError::RateLimited);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(EmtError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    Ok(response.text().await?)
}

/// Parse the Mobility Labs wrapper and return its `data` on success.
fn unwrap_envelope(body: &str) -> Result<Value, EmtError> {
    let envelope: MobilityLabsResponse =
        serde_json::from_str(body).map_err(|e| EmtError::Json {
            message: e.to_string(),
            body: Some(snippet(body)),
        })?;

    if !envelope.is_success() {
        return Err(EmtError::Upstream {
            code: envelope.code,
            description: envelope.description.unwrap_or_default(),
        });
    }

    Ok(envelope.data)
}

fn into_records(data: Value) -> Result<Vec<Value>, EmtError> {
    match data {
        Value::Array(records) => Ok(records),
        // A null list is a failure, distinct from an empty one
        Value::Null => Err(EmtError::MissingData),
        other => Err(EmtError::Json {
            message: "expected an array of station records".to_string(),
            body: Some(snippet(&other.to_string())),
        }),
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_LEN).collect()
}
