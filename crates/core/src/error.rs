//! Error types for the skybrief domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all skybrief operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Chat model errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Tool dispatch errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Weather collaborator errors ---
    #[error("Weather error: {0}")]
    Weather(#[from] WeatherError),

    // --- Report writer errors ---
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    // --- Monitoring history store errors ---
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The orchestration loop hit its round-trip cap before the model
    /// produced a final answer.
    #[error("Tool loop exceeded after {rounds} round-trips")]
    ToolLoopExceeded { rounds: u32 },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum ToolError {
    /// The model asked for a tool that is not part of the declared set.
    /// This is a contract violation between the definitions we advertised
    /// and the dispatch table, so it propagates to the run's caller.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),

    #[error("Tool execution failed: {tool_name} — {reason}")]
    ExecutionFailed { tool_name: String, reason: String },
}

/// Failures from the upstream weather provider.
#[derive(Debug, Clone, Error)]
pub enum WeatherError {
    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Weather API authentication failed")]
    AuthFailed,

    #[error("Weather API rate limit exceeded")]
    RateLimited,

    #[error("Weather API unavailable: {0}")]
    Unavailable(String),

    #[error("Weather API not configured: {0}")]
    NotConfigured(String),
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to render report: {0}")]
    Render(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("History file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("History file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}
