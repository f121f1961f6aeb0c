//! Error types for outbound bot actions.

use thiserror::Error;

/// Error type for outbound API calls.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The bot is not connected to its transport.
    #[error("bot is not connected")]
    NotConnected,
    /// The API call timed out.
    #[error("API call timed out")]
    Timeout,
    /// The platform rejected the call.
    #[error("API error ({code}): {message}")]
    Api { code: i64, message: String },
    /// The triggering update carries no chat to address the action at.
    #[error("missing session info")]
    MissingSession,
    /// Other error.
    #[error("{0}")]
    Other(String),
}

/// Result type for API calls.
pub type ApiResult<T> = Result<T, ApiError>;
