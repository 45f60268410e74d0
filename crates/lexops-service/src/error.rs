//! Service error types.
//!
//! Every call across the service seam surfaces failures through
//! [`ServiceError`].  SDK errors are flattened into [`ServiceError::Api`] with
//! the operation name and the full error chain, except the "resource not
//! found" family which gets its own variant because waiters treat it as a
//! transient state.

use aws_sdk_lexmodelsv2::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

/// Unified error type for the lexops service layer.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A managed-service API call failed.
    #[error("{operation} failed: {reason}")]
    Api {
        operation: &'static str,
        reason: String,
    },

    /// The addressed resource does not exist (yet).
    #[error("{operation}: resource not found: {reason}")]
    NotFound {
        operation: &'static str,
        reason: String,
    },

    /// The service answered but left out a field the workflow depends on.
    #[error("{operation} returned no `{field}`")]
    MissingField {
        operation: &'static str,
        field: &'static str,
    },

    /// A request structure could not be assembled.
    #[error("invalid request for {operation}: {reason}")]
    InvalidRequest {
        operation: &'static str,
        reason: String,
    },

    /// A presigned upload or download returned a non-success status.
    #[error("transfer to {host} returned HTTP {status}")]
    TransferStatus { host: String, status: u16 },

    /// The HTTP client failed before a status was received.  `source`
    /// carries no URL.
    #[error("transfer to {host} failed: {source}")]
    Transfer {
        host: String,
        #[source]
        source: reqwest::Error,
    },

    /// A presigned URL could not be parsed.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error while building clients.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the service crate.
pub type Result<T> = std::result::Result<T, ServiceError>;

impl ServiceError {
    /// Whether this error means the resource is not there (yet).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Flatten an SDK error into a [`ServiceError`] tagged with `operation`.
    pub(crate) fn from_sdk<E, R>(operation: &'static str, err: SdkError<E, R>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
        R: std::fmt::Debug + Send + Sync + 'static,
    {
        let reason = DisplayErrorContext(&err).to_string();
        match err.code() {
            Some("ResourceNotFoundException") => Self::NotFound { operation, reason },
            _ => Self::Api { operation, reason },
        }
    }

    /// Wrap a transport failure, dropping the presigned URL from it.
    pub(crate) fn transfer(host: &str, err: reqwest::Error) -> Self {
        Self::Transfer {
            host: host.to_string(),
            source: err.without_url(),
        }
    }

    /// Wrap a request-builder failure.
    pub(crate) fn invalid_request(operation: &'static str, err: impl std::fmt::Display) -> Self {
        Self::InvalidRequest {
            operation,
            reason: err.to_string(),
        }
    }
}
