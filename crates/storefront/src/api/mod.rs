//! REST client for the remote store API.
//!
//! # Architecture
//!
//! - Plain REST over `reqwest`; the remote service is the source of truth,
//!   there is NO local sync of cart state beyond fetch-after-write
//! - Wire payloads are camelCase JSON, kept separate from domain types;
//!   conversions live next to the endpoint definitions
//! - Cart endpoints require a bearer credential attached per-request;
//!   catalog endpoints are public
//! - No retries, timeouts, or in-flight coordination: requests run to
//!   completion or error
//!
//! # Example
//!
//! ```rust,ignore
//! use amberleaf_storefront::api::ApiClient;
//!
//! let client = ApiClient::from_config(&config);
//!
//! // Public catalog access
//! let products = client.list_products().await?;
//!
//! // Authenticated cart access
//! let cart = client.fetch_cart(&token).await?;
//! ```

mod cart;
mod catalog;

use std::sync::Arc;

use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::BearerToken;
use crate::config::StoreConfig;
use crate::error::ApiError;

/// Failure body shape: `{ "detail": "..." }` with the detail optional.
#[derive(Debug, Deserialize)]
struct FailureBody {
    detail: Option<String>,
}

/// Client for the remote store API.
///
/// Cheaply cloneable; all clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client for the given API base URL.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                http: reqwest::Client::new(),
                base_url,
            }),
        }
    }

    /// Create a new client from configuration.
    #[must_use]
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    /// Build an endpoint URL from path segments.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.inner.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Build a request, attaching the bearer credential when present.
    fn request(
        &self,
        method: Method,
        segments: &[&str],
        token: Option<&BearerToken>,
    ) -> reqwest::RequestBuilder {
        let mut request = self.inner.http.request(method, self.endpoint(segments));
        if let Some(token) = token {
            request = request.bearer_auth(token.reveal());
        }
        request
    }

    /// Send a request and map non-success statuses to `ApiError::Status`.
    ///
    /// The failure `detail` string is extracted from the body when the server
    /// provides one; a body that is not valid JSON yields no detail.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<FailureBody>(&body)
                .ok()
                .and_then(|failure| failure.detail);
            tracing::debug!(
                %status,
                body = %body.chars().take(200).collect::<String>(),
                "store API returned non-success status"
            );
            return Err(ApiError::Status { status, detail });
        }

        Ok(response)
    }

    /// Send a request and deserialize the JSON response body.
    async fn execute_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.execute(request).await?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "failed to parse store API response"
            );
            ApiError::Parse(e)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(Url::parse(base).unwrap())
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let client = client("https://api.amberleaf.shop/");
        let url = client.endpoint(&["cart", "add"]);
        assert_eq!(url.as_str(), "https://api.amberleaf.shop/cart/add");
    }

    #[test]
    fn test_endpoint_preserves_base_path() {
        let client = client("https://api.amberleaf.shop/v1/");
        let url = client.endpoint(&["cart", "remove", "p1"]);
        assert_eq!(url.as_str(), "https://api.amberleaf.shop/v1/cart/remove/p1");
    }

    #[test]
    fn test_endpoint_without_trailing_slash() {
        let client = client("http://127.0.0.1:8080");
        let url = client.endpoint(&["products"]);
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/products");
    }

    #[test]
    fn test_failure_body_parsing() {
        let body: FailureBody = serde_json::from_str(r#"{"detail":"Out of stock"}"#).unwrap();
        assert_eq!(body.detail.as_deref(), Some("Out of stock"));

        let body: FailureBody = serde_json::from_str("{}").unwrap();
        assert!(body.detail.is_none());
    }
}
