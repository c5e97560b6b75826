//! Error types for bridge operations.

use keyfob_common::KeyfobAsyncError;
use thiserror::Error;

/// Errors returned synchronously by [`CredentialBridge`](crate::CredentialBridge).
///
/// Failures reported by the security-key capability are not errors here:
/// they travel inside the relayed response as a non-zero error code.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The request text could not be deserialized.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    /// The request was parsed but could not be scheduled.
    #[error("unable to schedule request: {0}")]
    Spawn(#[from] KeyfobAsyncError),
}

/// Errors from reading or submitting the login form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginFormError {
    /// No element with the given identifier exists.
    #[error("no element with id '{0}'")]
    MissingElement(String),

    /// An element exists but is not of the expected kind.
    #[error("element '{id}' is not a {expected}")]
    UnexpectedElement {
        /// The element identifier.
        id: String,
        /// The kind of element that was expected.
        expected: &'static str,
    },

    /// The browser refused to submit the form.
    #[error("unable to submit form: {0}")]
    SubmitFailed(String),

    /// The document is not reachable from the current context.
    #[error("document not available: {0}")]
    NotAvailable(String),
}

/// Errors from parsing bridge settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings text could not be deserialized.
    #[error("invalid settings: {0}")]
    Invalid(#[from] serde_json::Error),
}
