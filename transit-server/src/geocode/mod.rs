//! Address geocoding via the Google Maps Geocoding API.
//!
//! Turns a free-text address into candidate coordinates, best match first.

mod client;
mod error;
mod types;

pub use client::{GeocoderConfig, GoogleGeocoder};
pub use error::GeocodeError;
pub use types::{GeocodeCandidate, GeocodeResponse, Geometry};
