//! EMT bus-network incident tool.

use std::sync::Arc;

use serde_json::Value;

use crate::envelope::Envelope;

use super::API_ERROR;
use super::api::BusNetworkApi;

/// Incident category covering the whole network.
const ALL_LINES: &str = "all";

/// Bus-network incident lookups.
///
/// The payload is passed through exactly as EMT returns it.
#[derive(Clone)]
pub struct IncidentTools {
    bus: Arc<dyn BusNetworkApi>,
}

impl IncidentTools {
    pub fn new(bus: Arc<dyn BusNetworkApi>) -> Self {
        Self { bus }
    }

    /// Current incidents across all lines.
    pub async fn current_incidents(&self) -> Envelope<Value> {
        match self.bus.issues(ALL_LINES).await {
            Ok(payload) => Envelope::success(payload),
            Err(e) => {
                tracing::warn!(error = %e, "incident lookup failed");
                Envelope::error(API_ERROR)
            }
        }
    }
}
