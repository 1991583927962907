//! Error types shared across the memoraid crates.
//!
//! Provider errors are defined here, in core, so the quiz service can
//! downcast and classify them for retry decisions without string matching.

use thiserror::Error;
use uuid::Uuid;

use crate::questions::ParseQuestionsError;

/// Errors that can occur when interacting with a generative-model provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (invalid or missing API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Returns `true` if this error is permanent and should not be retried.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            ProviderError::AuthenticationFailed(_) | ProviderError::ModelNotFound(_)
        )
    }

    /// Returns the retry-after delay in milliseconds, if applicable.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            ProviderError::RateLimited { retry_after_ms } => Some(*retry_after_ms),
            _ => None,
        }
    }
}

/// Errors from a `MemoryStore` backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with the given id.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: Uuid },

    /// A uniqueness or referential constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backend itself failed.
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(kind: &'static str, id: Uuid) -> Self {
        StoreError::NotFound { kind, id }
    }
}

/// Errors surfaced by the quiz service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The submitted answer was empty; the scorer is never invoked.
    #[error("answer is required")]
    EmptyAnswer,

    /// The named model/provider is not registered with the service.
    #[error("unknown model provider: {0}")]
    UnknownProvider(String),

    /// The user has no memories to quiz on.
    #[error("no memories found for user {0}")]
    NoMemories(Uuid),

    /// The model response could not be parsed into questions.
    #[error(transparent)]
    ParseQuestions(#[from] ParseQuestionsError),

    /// A store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The provider failed after exhausting retries.
    #[error("model provider failed: {0}")]
    Provider(#[source] anyhow::Error),
}
