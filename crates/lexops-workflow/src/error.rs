//! Workflow error types.
//!
//! Every orchestration step surfaces failures through [`WorkflowError`].
//! Service and local-file errors are wrapped unchanged so callers can still
//! tell a throttled API call from a missing bot directory.

use crate::waiter::WaitKind;

/// Unified error type for bot lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    // -- Upstream crate errors -----------------------------------------------
    /// A call across the service seam failed.
    #[error(transparent)]
    Service(#[from] lexops_service::ServiceError),

    /// Packaging or unpacking the local definition failed.
    #[error(transparent)]
    Bundle(#[from] lexops_bundle::BundleError),

    // -- Lookup errors -------------------------------------------------------
    /// No bot with the deployed name showed up in the listing.
    #[error("bot `{name}` not found after {attempts} attempts")]
    BotNotFound { name: String, attempts: u32 },

    // -- Waiter errors -------------------------------------------------------
    /// A waiter ran out of attempts before reaching its success state.
    #[error("timed out waiting for {kind} on `{resource}` after {attempts} attempts")]
    WaitTimedOut {
        kind: WaitKind,
        resource: String,
        attempts: u32,
    },

    /// A waiter reached a failure state.
    #[error("{kind} on `{resource}` failed in state {state}: {}", reasons.join("; "))]
    WaitFailed {
        kind: WaitKind,
        resource: String,
        state: String,
        reasons: Vec<String>,
    },

    // -- Export errors -------------------------------------------------------
    /// A completed export did not carry a download URL.
    #[error("export `{export_id}` completed without a download url")]
    MissingDownloadUrl { export_id: String },

    // -- Input errors --------------------------------------------------------
    /// A version string is neither `DRAFT` nor a decimal number.
    #[error("invalid bot version `{0}`")]
    InvalidVersion(String),

    /// Coordinates or request fields failed validation.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

/// Convenience alias used throughout the workflow crate.
pub type Result<T> = std::result::Result<T, WorkflowError>;

impl WorkflowError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
