//! Bearer credential for authenticated store API requests.
//!
//! The storefront authenticates cart operations with a bearer token issued by
//! the remote auth service at login. Holding a token is what makes a session
//! "signed in"; the token itself is never logged or printed.

use secrecy::{ExposeSecret, SecretString};

/// Bearer token attached to authenticated requests.
///
/// Implements `Debug` manually to redact the token value.
#[derive(Clone)]
pub struct BearerToken(SecretString);

impl BearerToken {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Expose the raw token for building an `Authorization` header.
    #[must_use]
    pub fn reveal(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("BearerToken").field(&"[REDACTED]").finish()
    }
}

impl From<String> for BearerToken {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

impl From<&str> for BearerToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}
