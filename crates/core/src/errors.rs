//! Error types shared across the core crate.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by core services and collaborator implementations.
#[derive(Debug, Error)]
pub enum Error {
    /// The hosted store rejected or failed a request.
    #[error("Remote store error: {message}")]
    Remote {
        status: Option<u16>,
        message: String,
    },

    /// The local snapshot store could not be read or written.
    #[error("Local storage error: {0}")]
    LocalStorage(String),

    /// Input rejected before reaching a collaborator.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a remote error without an HTTP status (transport failures).
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            status: None,
            message: message.into(),
        }
    }

    /// Create a remote error carrying the status returned by the service.
    pub fn remote_with_status(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn local_storage(message: impl Into<String>) -> Self {
        Self::LocalStorage(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// HTTP status if the remote service answered with one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => *status,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_exposes_status() {
        let err = Error::remote_with_status(409, "duplicate key");
        assert_eq!(err.status_code(), Some(409));
        assert_eq!(err.to_string(), "Remote store error: duplicate key");
    }

    #[test]
    fn transport_error_has_no_status() {
        assert_eq!(Error::remote("connection reset").status_code(), None);
        assert_eq!(Error::validation("blank").status_code(), None);
    }
}
