//! Application state for the web layer.

use std::sync::Arc;

use crate::tools::ToolRegistry;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Registered tools, backed by the upstream clients
    pub tools: Arc<ToolRegistry>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(tools: ToolRegistry) -> Self {
        Self {
            tools: Arc::new(tools),
        }
    }
}
