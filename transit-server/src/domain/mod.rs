//! Domain types for the transit tool server.
//!
//! These are the shapes agent tools consume. Vendor field names from the
//! upstream APIs never leak past this layer.

mod location;
mod station;

pub use location::GeoLocation;
pub use station::{InvalidStationId, StationId, StationInfo, StationNumber, StationRecord};
