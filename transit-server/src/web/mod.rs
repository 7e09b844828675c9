//! Web layer for the transit tool server.
//!
//! Exposes the tool registry to agent runtimes over HTTP.

mod routes;
mod rpc;
mod state;

pub use routes::{SERVER_NAME, create_router};
pub use rpc::{RpcError, RpcRequest, RpcResponse};
pub use state::AppState;
