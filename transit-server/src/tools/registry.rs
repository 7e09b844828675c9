//! Tool names, descriptions, input schemas and dispatch.
//!
//! Names are part of the contract with agent prompts and must not change.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::domain::StationId;

use super::bike::BikeShareTools;
use super::incidents::IncidentTools;

pub const STATIONS_NEAR_ADDRESS: &str = "get_closest_bike_stations_to_address";
pub const STATIONS_NEAR_COORDINATES: &str = "get_closest_bike_stations_to_coordinates";
pub const STATION_INFO: &str = "get_bike_station_info";
pub const CURRENT_INCIDENTS: &str = "get_current_incidents";

/// A tool as advertised to the agent runtime.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    /// JSON Schema for the `arguments` object.
    pub input_schema: Value,
}

/// Errors raised before a tool runs. Tool failures are envelopes, not these.
#[derive(Debug, thiserror::Error)]
pub enum ToolCallError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    #[error("failed to serialize tool result: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct AddressArgs {
    address: String,
}

#[derive(Debug, Deserialize)]
struct CoordinateArgs {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct StationArgs {
    station_id: StationId,
}

/// All tools exposed by this server.
#[derive(Clone)]
pub struct ToolRegistry {
    bike: BikeShareTools,
    incidents: IncidentTools,
}

impl ToolRegistry {
    pub fn new(bike: BikeShareTools, incidents: IncidentTools) -> Self {
        Self { bike, incidents }
    }

    /// Definitions in the order they are listed to clients.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                name: STATIONS_NEAR_ADDRESS,
                description: "Returns a list of the closest BiciMad bike stations to the provided address.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "address": {
                            "type": "string",
                            "description": "Street address or place name in Madrid"
                        }
                    },
                    "required": ["address"]
                }),
            },
            ToolDefinition {
                name: STATIONS_NEAR_COORDINATES,
                description: "Returns a list of the closest BiciMad bike stations to the provided geographical coordinates.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "latitude": {"type": "number"},
                        "longitude": {"type": "number"}
                    },
                    "required": ["latitude", "longitude"]
                }),
            },
            ToolDefinition {
                name: STATION_INFO,
                description: "Returns information about a BiciMad bike station.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "station_id": {
                            "type": ["integer", "string"],
                            "description": "Numeric BiciMad station id"
                        }
                    },
                    "required": ["station_id"]
                }),
            },
            ToolDefinition {
                name: CURRENT_INCIDENTS,
                description: "Returns a list of current incidents in Madrid's bus network.",
                input_schema: json!({"type": "object", "properties": {}}),
            },
        ]
    }

    /// Run a tool by name and return its envelope as JSON.
    pub async fn call(&self, name: &str, arguments: Value) -> Result<Value, ToolCallError> {
        tracing::debug!(tool = name, "tool call");

        let result = match name {
            STATIONS_NEAR_ADDRESS => {
                let args: AddressArgs = parse_args(name, arguments)?;
                serde_json::to_value(self.bike.stations_near_address(&args.address).await)?
            }
            STATIONS_NEAR_COORDINATES => {
                let args: CoordinateArgs = parse_args(name, arguments)?;
                serde_json::to_value(
                    self.bike
                        .stations_near_coordinates(args.latitude, args.longitude)
                        .await,
                )?
            }
            STATION_INFO => {
                let args: StationArgs = parse_args(name, arguments)?;
                serde_json::to_value(self.bike.station_by_id(args.station_id).await)?
            }
            CURRENT_INCIDENTS => serde_json::to_value(self.incidents.current_incidents().await)?,
            _ => return Err(ToolCallError::UnknownTool(name.to_string())),
        };

        Ok(result)
    }
}

/// Deserialize tool arguments; a missing arguments object counts as empty.
fn parse_args<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T, ToolCallError> {
    let arguments = if arguments.is_null() {
        json!({})
    } else {
        arguments
    };

    serde_json::from_value(arguments).map_err(|e| ToolCallError::InvalidArguments {
        tool: tool.to_string(),
        message: e.to_string(),
    })
}
