//! Error types for the chalkmate domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all chalkmate operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Completion-service errors ---
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    // --- Roster / speaker-selection errors ---
    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

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

/// Failures of the external text-completion service.
///
/// These are *recoverable by contract*: every call site in the classroom
/// crate maps them to a documented default (random scores, neutral
/// assessment, error-text reply) instead of propagating them upward.
#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Roster misconfiguration. Unlike completion failures these are fatal:
/// an empty candidate pool means the persona set itself is broken.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("No eligible speaker candidate: {0}")]
    NoEligibleCandidate(String),

    #[error("Unknown persona: {0}")]
    UnknownPersona(String),
}
