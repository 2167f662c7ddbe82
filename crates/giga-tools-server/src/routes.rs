//! HTTP routes of the tool server.

use axum::extract::rejection::JsonRejection;
use axum::extract::Query;
use axum::routing::{get, post};
use axum::{Json, Router};
use giga_ai::tools::{DateTimeTool, ToolArguments, DATETIME_TOOL_NAME};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;

use crate::clock::{self, Reading};
use crate::error::ServerError;

const DEFAULT_ZONE: &str = "UTC";

pub fn router() -> Router {
    Router::new()
        .route("/datetime", get(datetime).fallback(method_not_allowed))
        .route("/tools/list", get(list_tools).fallback(method_not_allowed))
        .route("/tools/call", post(call_tool).fallback(method_not_allowed))
}

pub async fn serve(listener: TcpListener) -> std::io::Result<()> {
    axum::serve(listener, router()).await
}

#[derive(Debug, Deserialize)]
struct DateTimeQuery {
    timezone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    name: String,
    #[serde(default)]
    arguments: ToolArguments,
}

fn zone_or_default(timezone: Option<&str>) -> &str {
    timezone
        .map(str::trim)
        .filter(|tz| !tz.is_empty())
        .unwrap_or(DEFAULT_ZONE)
}

async fn datetime(Query(query): Query<DateTimeQuery>) -> Result<Json<Reading>, ServerError> {
    let zone = zone_or_default(query.timezone.as_deref());
    debug!(timezone = %zone, "datetime request");
    clock::now_in(zone)
        .map(Json)
        .map_err(|e| ServerError::BadRequest(e.to_string()))
}

async fn list_tools() -> Json<Value> {
    Json(json!({ "tools": [DateTimeTool::descriptor()] }))
}

async fn call_tool(
    call: Result<Json<ToolCall>, JsonRejection>,
) -> Result<Json<Value>, ServerError> {
    let Json(call) = call.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    debug!(tool = %call.name, "tool call");
    match call.name.as_str() {
        DATETIME_TOOL_NAME => {
            let zone = zone_or_default(call.arguments.get("timezone").and_then(Value::as_str));
            let reading = clock::now_in(zone).map_err(|e| ServerError::Internal(e.to_string()))?;
            Ok(Json(json!({ "name": call.name, "result": reading })))
        }
        _ => Err(ServerError::ToolNotFound(call.name.clone())),
    }
}

async fn method_not_allowed() -> ServerError {
    ServerError::MethodNotAllowed
}
