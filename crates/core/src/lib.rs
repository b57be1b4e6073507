//! # skybrief Core
//!
//! Domain types, traits, and error definitions for the skybrief weather
//! assistant. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator (the chat model, the weather API, the tool
//! dispatcher) is defined as a trait here. Implementations live in their
//! respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod message;
pub mod provider;
pub mod tool;
pub mod weather;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use message::{Conversation, ConversationId, Message, MessageToolCall, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, StopReason, ToolDefinition};
pub use tool::{Artifact, Dispatch, ToolCall, ToolDispatcher, ToolResult};
pub use weather::{
    ActivityAdvice, AnalysisKind, ClothingAdvice, HealthAdvice, ReportDescriptor, ReportFormat,
    RiskLevel, WeatherAnalysis, WeatherReport,
};
