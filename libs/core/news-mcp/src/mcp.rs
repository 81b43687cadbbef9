//! MCP (Model Context Protocol) handler
//!
//! JSON-RPC 2.0 envelope around the [`Dispatcher`]. Tool failures are
//! reported inside a successful response as an `isError` result; JSON-RPC
//! errors are reserved for protocol problems.

use crate::dispatch::Dispatcher;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

/// MCP request structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpRequest {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl McpRequest {
    /// Requests without an id expect no response
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// MCP response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

/// MCP error structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl McpResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(McpError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct ServerInfo {
    name: &'static str,
    version: &'static str,
}

/// MCP request handler
pub struct McpHandler {
    dispatcher: Dispatcher,
    server_info: ServerInfo,
}

impl McpHandler {
    /// The advertised server name follows the dispatcher's mode
    pub fn new(dispatcher: Dispatcher) -> Self {
        let server_info = ServerInfo {
            name: dispatcher.catalogue().mode().server_name(),
            version: env!("CARGO_PKG_VERSION"),
        };
        Self {
            dispatcher,
            server_info,
        }
    }

    pub fn server_name(&self) -> &'static str {
        self.server_info.name
    }

    /// Handle an MCP request. Notifications yield `None`.
    pub async fn handle(&self, request: McpRequest) -> Option<McpResponse> {
        if request.is_notification() {
            debug!(method = %request.method, "Notification received");
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "ping" => McpResponse::success(request.id, json!({})),
            "tools/list" => self.handle_list_tools(request.id),
            "tools/call" => self.handle_call_tool(request.id, request.params).await,
            method => {
                warn!(method = %method, "Method not found");
                McpResponse::error(request.id, METHOD_NOT_FOUND, "Method not found")
            }
        };
        Some(response)
    }

    fn handle_initialize(&self, id: Option<Value>) -> McpResponse {
        McpResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "serverInfo": self.server_info,
                "capabilities": {
                    "tools": {}
                }
            }),
        )
    }

    fn handle_list_tools(&self, id: Option<Value>) -> McpResponse {
        McpResponse::success(id, json!({ "tools": self.dispatcher.list() }))
    }

    async fn handle_call_tool(&self, id: Option<Value>, params: Value) -> McpResponse {
        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return McpResponse::error(id, INVALID_PARAMS, "Missing tool name");
        };
        let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

        let result = self.dispatcher.call(name, &arguments).await;
        match serde_json::to_value(&result) {
            Ok(value) => McpResponse::success(id, value),
            Err(e) => McpResponse::error(id, INTERNAL_ERROR, e.to_string()),
        }
    }

    /// Parse and handle one JSON line. Notifications yield `None`.
    pub async fn handle_json(&self, line: &str) -> Option<String> {
        let response = match serde_json::from_str::<McpRequest>(line) {
            Ok(request) => self.handle(request).await?,
            Err(e) => {
                warn!(error = %e, "Unparsable request");
                McpResponse::error(None, PARSE_ERROR, format!("Parse error: {e}"))
            }
        };

        match serde_json::to_string(&response) {
            Ok(json) => Some(json),
            Err(e) => {
                warn!(error = %e, "Failed to serialize response");
                None
            }
        }
    }
}
