//! Agent-facing tools.
//!
//! Each tool makes at most two sequential upstream calls and always
//! answers with an [`Envelope`](crate::envelope::Envelope). Upstream
//! failures are logged and translated, never propagated.

mod api;
mod bike;
mod incidents;
mod registry;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{BikeShareApi, BusNetworkApi, Geocoder};
pub use bike::{BikeShareTools, SEARCH_RADIUS_M};
pub use incidents::IncidentTools;
pub use registry::{
    CURRENT_INCIDENTS, STATION_INFO, STATIONS_NEAR_ADDRESS, STATIONS_NEAR_COORDINATES,
    ToolCallError, ToolDefinition, ToolRegistry,
};

/// Reason given when an upstream transit API call fails.
pub(crate) const API_ERROR: &str = "API returned an error";

/// Reason given when an upstream record lacks a required field.
pub(crate) const MALFORMED_RECORD: &str = "Malformed station record";
