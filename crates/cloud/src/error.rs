//! Error types for the cloud store crate.

use finance_tracker_core::Error as CoreError;
use thiserror::Error;

/// Result type alias for cloud store operations.
pub type Result<T> = std::result::Result<T, CloudError>;

/// Retry policy class for API failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiRetryClass {
    Retryable,
    Permanent,
    ReauthRequired,
}

/// Errors that can occur while talking to the hosted database.
#[derive(Debug, Error)]
pub enum CloudError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error response from the REST API
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid request (missing required data, unexpected response shape, etc.)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication error (missing or invalid key/token)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CloudError {
    /// Create an API error from status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// HTTP status if this is an API error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Classify error for retry policy. Callers decide whether to retry; the
    /// client never does.
    /// A unique-constraint conflict is permanent: the row already exists.
    pub fn retry_class(&self) -> ApiRetryClass {
        if self.is_unique_violation() {
            return ApiRetryClass::Permanent;
        }
        match self {
            Self::Api { status, .. } => match *status {
                401 | 403 => ApiRetryClass::ReauthRequired,
                408 | 423 | 425 | 429 => ApiRetryClass::Retryable,
                500..=599 => ApiRetryClass::Retryable,
                _ => ApiRetryClass::Permanent,
            },
            Self::Http(_) => ApiRetryClass::Retryable,
            Self::Json(_) => ApiRetryClass::Permanent,
            Self::InvalidRequest(_) => ApiRetryClass::Permanent,
            Self::Auth(_) => ApiRetryClass::ReauthRequired,
            Self::Config(_) => ApiRetryClass::Permanent,
        }
    }

    /// Returns true when PostgREST rejected a write on a unique constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Api { status, message } => *status == 409 || message.starts_with("23505"),
            _ => false,
        }
    }
}

impl From<CloudError> for CoreError {
    fn from(err: CloudError) -> Self {
        match err.status_code() {
            Some(status) => CoreError::remote_with_status(status, err.to_string()),
            None => CoreError::remote(err.to_string()),
        }
    }
}
