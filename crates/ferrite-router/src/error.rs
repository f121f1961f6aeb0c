//! Error types for the routing layer.

use thiserror::Error;

use ferrite_core::ApiError;

/// Errors surfaced by dispatch.
///
/// [`RouteError::NotFound`] is a sentinel, produced only by the default
/// not-found handler when no route matched and no fallback was configured
/// anywhere in the router tree. Everything else is a genuine handler
/// failure, propagated verbatim to the dispatch caller.
#[derive(Debug, Error)]
pub enum RouteError {
    /// No route matched the update.
    #[error("no route matched the update")]
    NotFound,

    /// An outbound action failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A handler failed with an application-level error.
    #[error(transparent)]
    Handler(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl RouteError {
    /// Wraps an arbitrary application error as a handler failure.
    pub fn handler<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Handler(Box::new(err))
    }

    /// Returns `true` if this is the "no route matched" sentinel.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Result type for handlers and dispatch.
pub type RouteResult<T> = Result<T, RouteError>;
