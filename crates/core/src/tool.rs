//! Tool dispatch seam — the abstraction the orchestration loop talks to.
//!
//! The model emits [`ToolCall`]s; the dispatcher turns each one into a
//! [`ToolResult`] (success payload or error text) plus an optional structured
//! [`Artifact`] the run accumulates. The concrete dispatcher with the closed
//! set of weather tools lives in `skybrief-tools`.

use crate::error::ToolError;
use crate::provider::ToolDefinition;
use crate::weather::{ReportDescriptor, WeatherAnalysis, WeatherReport};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A request to execute a tool, as emitted by the chat model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique call ID (matches the model's tool_use id)
    pub id: String,

    /// Name of the tool to execute
    pub name: String,

    /// Arguments as a JSON value
    pub arguments: serde_json::Value,
}

/// The result of a tool execution, consumed exactly once by appending it to
/// the conversation. Never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// The call ID this result is for
    pub call_id: String,

    /// Whether the tool executed successfully
    pub success: bool,

    /// Human-readable output (or error text) fed back to the model
    pub output: String,

    /// Optional structured payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ToolResult {
    /// A successful result with structured data.
    pub fn ok(call_id: impl Into<String>, output: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            call_id: call_id.into(),
            success: true,
            output: output.into(),
            data: Some(data),
        }
    }

    /// A failed result whose error text is fed back to the model so it can
    /// recover conversationally.
    pub fn error(call_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            success: false,
            output: output.into(),
            data: None,
        }
    }
}

/// A structured artifact produced by a successful tool dispatch.
///
/// The orchestration run keeps at most one of each kind: the tool chain is
/// linear (weather → analysis → report), and a later artifact of the same
/// kind overwrites an earlier one within the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Artifact {
    Weather(WeatherReport),
    Analysis(WeatherAnalysis),
    Report(ReportDescriptor),
}

/// The outcome of dispatching one tool call.
#[derive(Debug, Clone)]
pub struct Dispatch {
    /// The result appended to the conversation.
    pub result: ToolResult,

    /// Structured artifact for the run accumulator, if the call produced one.
    pub artifact: Option<Artifact>,
}

/// The dispatcher the orchestration loop drives.
///
/// Upstream failures and malformed arguments surface as error-text
/// [`ToolResult`]s inside `Ok(Dispatch)` so the model can react in natural
/// language; only an unknown tool name — a contract violation — is an `Err`.
#[async_trait]
pub trait ToolDispatcher: Send + Sync {
    /// Tool definitions to advertise to the model.
    fn definitions(&self) -> Vec<ToolDefinition>;

    /// Execute one tool call.
    async fn dispatch(&self, call: &ToolCall) -> std::result::Result<Dispatch, ToolError>;
}
