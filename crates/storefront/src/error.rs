//! Error types for the storefront client.
//!
//! Nothing here is fatal: every failure is reported per-operation and prior
//! in-memory state is left unchanged. Errors that reach the user expose a
//! `user_message()` that prefers the server-supplied `detail` string and
//! falls back to a generic message.

use thiserror::Error;

/// Fallback message shown when the server gives no failure detail.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors that can occur when talking to the remote store API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed (connection refused, DNS, etc.).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The server responded with a non-success status.
    #[error("API returned HTTP {status}: {}", detail.as_deref().unwrap_or("(no detail)"))]
    Status {
        /// HTTP status code.
        status: reqwest::StatusCode,
        /// Optional human-readable failure detail from the response body.
        detail: Option<String>,
    },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl ApiError {
    /// Human-readable message suitable for showing to the user.
    ///
    /// Server-supplied `detail` wins; everything else collapses to the
    /// generic fallback so transport internals never leak into the UI.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::NotFound(what) => format!("{what} could not be found."),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Errors reported by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// A cart mutation was attempted without a signed-in user.
    ///
    /// Reported before any network call is made.
    #[error("not signed in")]
    NotSignedIn,

    /// The remote call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl CartError {
    /// Human-readable message suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotSignedIn => "Please sign in to manage your cart.".to_string(),
            Self::Api(err) => err.user_message(),
        }
    }
}
