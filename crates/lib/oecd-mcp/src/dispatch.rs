//! Name-based tool invocation.
//!
//! [`ToolDispatcher::call`] is total: every outcome, including unknown
//! names, validation failures, source errors and handler panics, becomes a
//! `CallToolResult`. Failures carry a single `Error: <message>` text block
//! with the error flag set.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use oecd_core::StatisticsSource;
use rmcp::model::{CallToolResult, Content, JsonObject};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ToolError;
use crate::tools::{ToolResult, find_tool};

/// Routes tool calls to catalog handlers over a shared statistics source.
#[derive(Clone)]
pub struct ToolDispatcher {
    source: Arc<dyn StatisticsSource>,
}

impl ToolDispatcher {
    #[must_use]
    pub fn new(source: Arc<dyn StatisticsSource>) -> Self {
        Self { source }
    }

    #[must_use]
    pub fn source(&self) -> &Arc<dyn StatisticsSource> {
        &self.source
    }

    /// Runs a tool by name, surfacing failures as `ToolError`.
    ///
    /// Missing arguments are treated as an empty object.
    ///
    /// # Errors
    /// Returns `ToolError::UnknownTool` for unregistered names, or whatever
    /// the handler failed with. A panicking handler yields
    /// `ToolError::Panicked`.
    pub async fn try_call(&self, name: &str, arguments: Option<JsonObject>) -> ToolResult {
        let entry = find_tool(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        let args = Value::Object(arguments.unwrap_or_default());
        debug!(tool = entry.name, "calling tool");

        let call = (entry.handler)(self.source.as_ref(), args);
        match AssertUnwindSafe(call).catch_unwind().await {
            Ok(result) => result,
            Err(payload) => Err(ToolError::Panicked(panic_message(payload.as_ref()))),
        }
    }

    /// Runs a tool by name and wraps any failure in an error envelope.
    pub async fn call(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        match self.try_call(name, arguments).await {
            Ok(result) => result,
            Err(err) => {
                warn!(tool = name, error = %err, "tool call failed");
                error_result(&err)
            }
        }
    }
}

/// Envelope for a failed call.
#[must_use]
pub fn error_result(err: &ToolError) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!("Error: {err}"))])
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "tool handler panicked".to_string()
    }
}
