//! Error types for webhook handling, configuration and the Web API client.

use thiserror::Error;

/// Errors raised at the Slack boundary.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Transport failure talking to the Web API.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The Web API answered `ok: false`.
    #[error("Slack API error: {0}")]
    ApiError(String),

    /// The request body is JSON but not a usable payload.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

/// Convenience alias for results with [`WebhookError`].
pub type Result<T> = std::result::Result<T, WebhookError>;
