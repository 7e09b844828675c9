//! BiciMad bike-share tools.

use std::sync::Arc;

use crate::domain::{StationId, StationInfo, StationRecord};
use crate::emt::{normalize_station, normalize_stations};
use crate::envelope::Envelope;

use super::api::{BikeShareApi, Geocoder};
use super::{API_ERROR, MALFORMED_RECORD};

/// Search radius around a point, in meters.
pub const SEARCH_RADIUS_M: u32 = 500;

/// Region and language hints sent with every geocoding request.
const GEOCODE_REGION: &str = "es";
const GEOCODE_LANGUAGE: &str = "es";

const GEOCODE_MISS: &str = "Could not geocode address";
const GEOCODE_FAILED: &str = "Geocoding service returned an error";

/// Station lookups by coordinates, address, or id.
#[derive(Clone)]
pub struct BikeShareTools {
    geocoder: Arc<dyn Geocoder>,
    bikes: Arc<dyn BikeShareApi>,
}

impl BikeShareTools {
    pub fn new(geocoder: Arc<dyn Geocoder>, bikes: Arc<dyn BikeShareApi>) -> Self {
        Self { geocoder, bikes }
    }

    /// Stations within [`SEARCH_RADIUS_M`] of a point.
    pub async fn stations_near_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Envelope<Vec<StationRecord>> {
        let raw = match self
            .bikes
            .stations_around(longitude, latitude, SEARCH_RADIUS_M)
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(latitude, longitude, error = %e, "station search failed");
                return Envelope::error(API_ERROR);
            }
        };

        match normalize_stations(&raw) {
            Ok(stations) => Envelope::success(stations),
            Err(e) => {
                tracing::warn!(error = %e, "malformed station record in search results");
                Envelope::error(MALFORMED_RECORD)
            }
        }
    }

    /// Stations near an address, using the geocoder's first candidate.
    pub async fn stations_near_address(&self, address: &str) -> Envelope<Vec<StationRecord>> {
        let candidates = match self
            .geocoder
            .geocode(address, GEOCODE_REGION, GEOCODE_LANGUAGE)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!(address, error = %e, "geocoding failed");
                return Envelope::error(GEOCODE_FAILED);
            }
        };

        let Some(best) = candidates.first() else {
            tracing::debug!(address, "no geocoding candidates");
            return Envelope::error(GEOCODE_MISS);
        };

        let location = best.location();
        self.stations_near_coordinates(location.lat, location.lng)
            .await
    }

    /// A single station by id.
    ///
    /// An unknown id is a success with an empty payload, not an error.
    /// When the API returns several records only the first is used.
    pub async fn station_by_id(&self, id: StationId) -> Envelope<StationInfo> {
        let raw = match self.bikes.station_info(id).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(%id, error = %e, "station lookup failed");
                return Envelope::error(API_ERROR);
            }
        };

        let Some(first) = raw.first() else {
            return Envelope::success(StationInfo::NotFound);
        };

        match normalize_station(first) {
            Ok(record) => Envelope::success(StationInfo::Found(record)),
            Err(e) => {
                tracing::warn!(%id, error = %e, "malformed station record");
                Envelope::error(MALFORMED_RECORD)
            }
        }
    }
}
