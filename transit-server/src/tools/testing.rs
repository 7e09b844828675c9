//! Stub upstream clients for tool tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use axum::{Json, Router};
use serde_json::{Value, json};

use crate::domain::StationId;
use crate::emt::{EmtClient, EmtError};
use crate::geocode::{GeocodeCandidate, GeocodeError};

use super::api::{BikeShareApi, BusNetworkApi, Geocoder};

/// A raw BiciMad record as the vendor sends it.
pub fn raw_station(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "number": format!("{id}a"),
        "name": name,
        "address": "Calle de Alcalá 1",
        "total_bases": 24,
        "dock_bikes": 9,
        "free_bases": 15,
        "activate": 1,
    })
}

/// A real [`EmtClient`] talking to an in-process server that answers every
/// request with `body`.
pub async fn emt_client_answering(body: Value) -> EmtClient {
    let router = Router::new().fallback(move || {
        let body = body.clone();
        async move { Json(body) }
    });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    EmtClient::with_token("test-token", format!("http://{addr}/v1"), Duration::from_secs(5))
        .unwrap()
}

fn upstream_failure() -> EmtError {
    EmtError::Upstream {
        code: "90".to_string(),
        description: "stubbed failure".to_string(),
    }
}

/// Geocoder returning a fixed candidate list and recording queries.
pub struct StubGeocoder {
    candidates: Option<Vec<GeocodeCandidate>>,
    queries: Mutex<Vec<(String, String, String)>>,
}

impl StubGeocoder {
    pub fn returning(candidates: Vec<GeocodeCandidate>) -> Self {
        Self {
            candidates: Some(candidates),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            candidates: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<(String, String, String)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn geocode(
        &self,
        address: &str,
        region: &str,
        language: &str,
    ) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        self.queries.lock().unwrap().push((
            address.to_string(),
            region.to_string(),
            language.to_string(),
        ));
        self.candidates.clone().ok_or(GeocodeError::Status {
            status: "UNKNOWN_ERROR".to_string(),
            message: "stubbed failure".to_string(),
        })
    }
}

/// Bike-share client returning fixed records; `None` simulates failure.
pub struct StubBikeShare {
    around: Option<Vec<Value>>,
    info: Option<Vec<Value>>,
    around_calls: Mutex<Vec<(f64, f64, u32)>>,
    info_calls: Mutex<Vec<StationId>>,
}

impl StubBikeShare {
    pub fn new(around: Option<Vec<Value>>, info: Option<Vec<Value>>) -> Self {
        Self {
            around,
            info,
            around_calls: Mutex::new(Vec::new()),
            info_calls: Mutex::new(Vec::new()),
        }
    }

    /// Recorded `(lng, lat, radius)` arguments.
    pub fn around_calls(&self) -> Vec<(f64, f64, u32)> {
        self.around_calls.lock().unwrap().clone()
    }

    pub fn info_calls(&self) -> Vec<StationId> {
        self.info_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BikeShareApi for StubBikeShare {
    async fn stations_around(
        &self,
        lng: f64,
        lat: f64,
        radius_m: u32,
    ) -> Result<Vec<Value>, EmtError> {
        self.around_calls.lock().unwrap().push((lng, lat, radius_m));
        self.around.clone().ok_or_else(upstream_failure)
    }

    async fn station_info(&self, id: StationId) -> Result<Vec<Value>, EmtError> {
        self.info_calls.lock().unwrap().push(id);
        self.info.clone().ok_or_else(upstream_failure)
    }
}

/// Bus-network client returning a fixed payload.
pub struct StubBusNetwork {
    payload: Option<Value>,
    categories: Mutex<Vec<String>>,
}

impl StubBusNetwork {
    pub fn new(payload: Option<Value>) -> Self {
        Self {
            payload,
            categories: Mutex::new(Vec::new()),
        }
    }

    pub fn categories(&self) -> Vec<String> {
        self.categories.lock().unwrap().clone()
    }
}

#[async_trait]
impl BusNetworkApi for StubBusNetwork {
    async fn issues(&self, category: &str) -> Result<Value, EmtError> {
        self.categories.lock().unwrap().push(category.to_string());
        self.payload.clone().ok_or_else(upstream_failure)
    }
}
