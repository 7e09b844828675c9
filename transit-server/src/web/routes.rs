//! HTTP route handlers.
//!
//! `/mcp` speaks the subset of the Model Context Protocol an agent runtime
//! needs to discover and call tools: `initialize`, `ping`, `tools/list`
//! and `tools/call`, as JSON-RPC 2.0 over plain HTTP POST.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use crate::tools::ToolCallError;

use super::rpc::*;
use super::state::AppState;

/// Name reported to clients during `initialize`.
pub const SERVER_NAME: &str = "EMT Madrid API";

/// Protocol revision offered when the client does not ask for one.
const DEFAULT_PROTOCOL_VERSION: &str = "2025-03-26";

const INSTRUCTIONS: &str = "This server allows interacting with the API of Madrid's municipal \
transportation authority (EMT). Includes access to information related to BiciMad (Madrid's \
municipal bike rental service) and Madrid's bus network.";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/mcp", post(mcp))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// JSON-RPC endpoint. Accepts a single message or a batch.
async fn mcp(State(state): State<AppState>, body: Bytes) -> Response {
    let incoming: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "unparsable JSON-RPC body");
            let error = RpcError::new(PARSE_ERROR, format!("invalid JSON: {e}"));
            return Json(RpcResponse::failure(Value::Null, error)).into_response();
        }
    };

    match incoming {
        Value::Array(batch) if batch.is_empty() => {
            let error = RpcError::new(INVALID_REQUEST, "empty batch");
            Json(RpcResponse::failure(Value::Null, error)).into_response()
        }
        Value::Array(batch) => {
            let mut responses = Vec::with_capacity(batch.len());
            for message in batch {
                if let Some(response) = handle_message(&state, message).await {
                    responses.push(response);
                }
            }
            if responses.is_empty() {
                StatusCode::ACCEPTED.into_response()
            } else {
                Json(responses).into_response()
            }
        }
        message => match handle_message(&state, message).await {
            Some(response) => Json(response).into_response(),
            None => StatusCode::ACCEPTED.into_response(),
        },
    }
}

/// Handle one message. Notifications produce no response.
async fn handle_message(state: &AppState, message: Value) -> Option<RpcResponse> {
    let id_hint = message.get("id").cloned().unwrap_or(Value::Null);

    let request: RpcRequest = match serde_json::from_value(message) {
        Ok(request) => request,
        Err(e) => {
            let error = RpcError::new(INVALID_REQUEST, format!("invalid request: {e}"));
            return Some(RpcResponse::failure(id_hint, error));
        }
    };

    if request.jsonrpc != "2.0" {
        let error = RpcError::new(INVALID_REQUEST, "jsonrpc must be \"2.0\"");
        return Some(RpcResponse::failure(id_hint, error));
    }

    let Some(id) = request.id else {
        tracing::debug!(method = %request.method, "notification");
        return None;
    };

    Some(
        match handle_request(state, &request.method, request.params).await {
            Ok(result) => RpcResponse::success(id, result),
            Err(error) => RpcResponse::failure(id, error),
        },
    )
}

async fn handle_request(state: &AppState, method: &str, params: Value) -> Result<Value, RpcError> {
    match method {
        "initialize" => Ok(initialize_result(&params)),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(tools_list_result(state)),
        "tools/call" => tools_call(state, params).await,
        _ => Err(RpcError::method_not_found(method)),
    }
}

fn initialize_result(params: &Value) -> Value {
    let protocol_version = params
        .get("protocolVersion")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);

    json!({
        "protocolVersion": protocol_version,
        "capabilities": {
            "tools": {"listChanged": false}
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        },
        "instructions": INSTRUCTIONS
    })
}

fn tools_list_result(state: &AppState) -> Value {
    let tools: Vec<Value> = state
        .tools
        .definitions()
        .into_iter()
        .map(|tool| {
            json!({
                "name": tool.name,
                "description": tool.description,
                "inputSchema": tool.input_schema,
            })
        })
        .collect();

    json!({ "tools": tools })
}

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

async fn tools_call(state: &AppState, params: Value) -> Result<Value, RpcError> {
    let params: CallParams = serde_json::from_value(params)
        .map_err(|e| RpcError::invalid_params(format!("invalid tools/call params: {e}")))?;

    let envelope = state
        .tools
        .call(&params.name, params.arguments)
        .await
        .map_err(|e| match e {
            ToolCallError::Serialize(_) => RpcError::new(INTERNAL_ERROR, e.to_string()),
            _ => RpcError::invalid_params(e.to_string()),
        })?;

    let is_error = envelope.get("status").and_then(Value::as_str) == Some("error");

    Ok(json!({
        "content": [{"type": "text", "text": envelope.to_string()}],
        "structuredContent": envelope,
        "isError": is_error,
    }))
}
