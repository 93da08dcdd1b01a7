//! Conversions from failures into MCP tool errors.
//!
//! Planner failures are reported inside a `CallToolResult` with `is_error`
//! set, so the calling model sees the message instead of a protocol fault.

use log::debug;
use rmcp::model::{CallToolResult, Content};
use tasked_core::PlannerError;

pub fn tool_error(error: PlannerError) -> CallToolResult {
    debug!("tool call failed ({:?}): {error}", error.kind());
    CallToolResult::error(vec![Content::text(error.to_string())])
}

pub fn missing_parameter(name: &str) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!("{name} required"))])
}

pub fn serialization_error(error: serde_json::Error) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!(
        "failed to encode result: {error}"
    ))])
}
