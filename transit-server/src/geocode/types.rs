//! Geocoding API response DTOs.
//!
//! Only the fields needed to locate a candidate are modelled; the API
//! returns much more per result.

use serde::Deserialize;

use crate::domain::GeoLocation;

/// Top-level geocode response.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    /// `OK`, `ZERO_RESULTS`, or an error status such as `REQUEST_DENIED`.
    pub status: String,

    #[serde(default)]
    pub results: Vec<GeocodeCandidate>,

    /// Present alongside error statuses.
    pub error_message: Option<String>,
}

/// One geocoding candidate. Candidates arrive best match first.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeocodeCandidate {
    #[serde(default)]
    pub formatted_address: Option<String>,

    pub geometry: Geometry,
}

impl GeocodeCandidate {
    /// Build a candidate at the given point.
    pub fn at(lat: f64, lng: f64) -> Self {
        Self {
            formatted_address: None,
            geometry: Geometry {
                location: GeoLocation::new(lat, lng),
            },
        }
    }

    pub fn location(&self) -> GeoLocation {
        self.geometry.location
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Geometry {
    pub location: GeoLocation,
}
