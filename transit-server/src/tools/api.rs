//! Upstream collaborators the tool sets depend on.
//!
//! These traits let the tools be exercised with stub clients; the real
//! implementations live next to their HTTP clients.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::StationId;
use crate::emt::EmtError;
use crate::geocode::{GeocodeCandidate, GeocodeError};

/// Address to coordinates lookup.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Candidates for `address`, best match first. No match is `Ok(vec![])`.
    async fn geocode(
        &self,
        address: &str,
        region: &str,
        language: &str,
    ) -> Result<Vec<GeocodeCandidate>, GeocodeError>;
}

/// BiciMad station queries, returning raw vendor records.
#[async_trait]
pub trait BikeShareApi: Send + Sync {
    /// Stations within `radius_m` meters of (`lng`, `lat`).
    async fn stations_around(
        &self,
        lng: f64,
        lat: f64,
        radius_m: u32,
    ) -> Result<Vec<Value>, EmtError>;

    /// Records for a single station; empty when the id is unknown.
    async fn station_info(&self, id: StationId) -> Result<Vec<Value>, EmtError>;
}

/// EMT bus-network queries.
#[async_trait]
pub trait BusNetworkApi: Send + Sync {
    /// Current incidents for `category` (a line number, or `"all"`).
    async fn issues(&self, category: &str) -> Result<Value, EmtError>;
}
