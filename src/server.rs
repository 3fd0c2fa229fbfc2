//! Line-delimited JSON-RPC server.
//!
//! Reads one request per line and writes one response per line. Requests
//! without an `id` are notifications and get no response. The loop ends on
//! `shutdown` or end of input.

pub mod protocol;

use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use self::protocol::{
    CallToolParams, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, JsonRpcRequest,
    JsonRpcResponse, METHOD_NOT_FOUND, PARSE_ERROR, PROTOCOL_VERSION
};
use crate::{
    error::{AppResult, io_error},
    tools::{Tool, Toolbox}
};

/// Server name reported by `initialize`
pub const SERVER_NAME: &str = "sql-tool-server";

pub struct Server {
    toolbox: Toolbox
}

impl Server {
    pub fn new(toolbox: Toolbox) -> Self {
        Self {
            toolbox
        }
    }

    /// Serve on the process stdin and stdout.
    pub async fn run_stdio(&self) -> AppResult<()> {
        info!("serving tools on stdio");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve requests from `reader` until `shutdown` or end of input.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> AppResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin
    {
        let mut lines = reader.lines();
        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| io_error("Failed to read request", e))?
        {
            if line.trim().is_empty() {
                continue;
            }
            let (response, stop) = match parse_request(&line) {
                Ok(request) => {
                    let stop = request.method == "shutdown";
                    let notification = request.id.is_none();
                    let response = self.handle_request(request).await;
                    (if notification { None } else { Some(response) }, stop)
                }
                Err(response) => (Some(response), false)
            };
            if let Some(response) = response {
                write_response(&mut writer, &response).await?;
            }
            if stop {
                break;
            }
        }
        info!("server stopped");
        Ok(())
    }

    /// Answer a single request.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();
        debug!(method = %request.method, "request");

        match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "notifications/initialized" | "initialized" => JsonRpcResponse::success(id, json!({})),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.handle_list_tools(id),
            "tools/call" => self.handle_call_tool(id, request.params).await,
            "shutdown" => {
                info!("shutdown requested");
                JsonRpcResponse::success(id, Value::Null)
            }
            other => {
                JsonRpcResponse::error(id, METHOD_NOT_FOUND, format!("Method not found: {}", other))
            }
        }
    }

    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION")
                },
                "capabilities": {
                    "tools": {
                        "listChanged": false
                    }
                }
            })
        )
    }

    fn handle_list_tools(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::success(id, json!({ "tools": self.toolbox.definitions() }))
    }

    async fn handle_call_tool(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match params.map(serde_json::from_value) {
            Some(Ok(params)) => params,
            Some(Err(e)) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, format!("Invalid params: {}", e));
            }
            None => return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params")
        };
        let Some(tool) = Tool::from_name(&params.name) else {
            return JsonRpcResponse::error(
                id,
                INVALID_PARAMS,
                format!("Tool not found: {}", params.name)
            );
        };

        let response = self.toolbox.call(tool, &params.arguments).await;
        match serde_json::to_value(&response) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string())
        }
    }
}

/// Decode one request line, or the error response owed for it.
///
/// Text that is not JSON is a parse error with a null id. JSON that is not a
/// JSON-RPC 2.0 request is an invalid request, answered with the caller's id
/// when one can be read.
fn parse_request(line: &str) -> Result<JsonRpcRequest, JsonRpcResponse> {
    let value: Value = serde_json::from_str(line).map_err(|e| {
        warn!(error = %e, "unparsable request line");
        JsonRpcResponse::error(None, PARSE_ERROR, format!("Parse error: {}", e))
    })?;
    let id = value.get("id").cloned();
    let request: JsonRpcRequest = serde_json::from_value(value).map_err(|e| {
        warn!(error = %e, "malformed request");
        JsonRpcResponse::error(id.clone(), INVALID_REQUEST, format!("Invalid Request: {}", e))
    })?;
    if request.jsonrpc != "2.0" {
        return Err(JsonRpcResponse::error(
            id,
            INVALID_REQUEST,
            format!("Invalid Request: unsupported jsonrpc version '{}'", request.jsonrpc)
        ));
    }
    Ok(request)
}

async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &JsonRpcResponse
) -> AppResult<()> {
    let mut line = serde_json::to_string(response)
        .map_err(|e| io_error("Failed to encode response", e.into()))?;
    line.push('\n');
    writer
        .write_all(line.as_bytes())
        .await
        .map_err(|e| io_error("Failed to write response", e))?;
    writer
        .flush()
        .await
        .map_err(|e| io_error("Failed to write response", e))
}
